//! Conformance case execution

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::ExpectStrategy;
use crate::discover;
use crate::error::{HarnessError, HarnessResult};
use crate::exec;
use crate::expect;

/// Conformance test runner for one interpreter binary.
pub struct LoxRunner {
    interpreter: PathBuf,
    strategy: ExpectStrategy,
    filter: Option<String>,
}

/// Result of running a single case.
///
/// Dropped after reporting; only the pass/fail identity survives into the
/// run report.
#[derive(Debug, Clone)]
pub struct CaseResult {
    /// Test file path
    pub path: PathBuf,
    /// Case outcome
    pub outcome: CaseOutcome,
    /// Wall-clock time spent on the case
    pub duration: Duration,
    /// Actual output (normalized in fixture mode)
    pub got: String,
    /// Expected output
    pub expected: String,
    /// Error message for a case that could not be evaluated
    pub error: Option<String>,
}

/// Case outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Output matched the expectation exactly
    Pass,
    /// Output did not match
    Fail,
    /// The case could not be evaluated (e.g. missing fixture)
    Error,
}

impl LoxRunner {
    /// Create a runner for the given interpreter binary.
    pub fn new(interpreter: impl AsRef<Path>, strategy: ExpectStrategy) -> Self {
        Self {
            interpreter: interpreter.as_ref().to_path_buf(),
            strategy,
            filter: None,
        }
    }

    /// Restrict the run to paths containing `filter`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Collect the test files under `root`, applying the filter.
    pub fn collect_tests(&self, root: &Path) -> HarnessResult<Vec<PathBuf>> {
        let mut tests = discover::collect_tests(root)?;
        if let Some(ref filter) = self.filter {
            tests.retain(|p| p.to_string_lossy().contains(filter.as_str()));
        }
        Ok(tests)
    }

    /// Run a single case: derive the expectation, run the interpreter,
    /// compare.
    ///
    /// The expectation is derived before the interpreter output is read. A
    /// missing fixture turns into an errored [`CaseResult`] so the run can
    /// continue; a spawn failure propagates as a fatal error.
    pub fn run_case(&self, path: &Path) -> HarnessResult<CaseResult> {
        let start = Instant::now();

        let expected = match self.expectation(path) {
            Ok(expected) => expected,
            Err(err @ HarnessError::MissingFixture { .. }) => {
                return Ok(CaseResult {
                    path: path.to_path_buf(),
                    outcome: CaseOutcome::Error,
                    duration: start.elapsed(),
                    got: String::new(),
                    expected: String::new(),
                    error: Some(err.to_string()),
                });
            }
            Err(err) => return Err(err),
        };

        let raw = exec::run_interpreter(&self.interpreter, path)?;
        let raw = String::from_utf8_lossy(&raw).into_owned();
        let got = match self.strategy {
            ExpectStrategy::Inline => raw,
            ExpectStrategy::Fixture => expect::normalize_output(&raw),
        };

        let outcome = if got == expected {
            CaseOutcome::Pass
        } else {
            CaseOutcome::Fail
        };

        Ok(CaseResult {
            path: path.to_path_buf(),
            outcome,
            duration: start.elapsed(),
            got,
            expected,
            error: None,
        })
    }

    fn expectation(&self, path: &Path) -> HarnessResult<String> {
        match self.strategy {
            ExpectStrategy::Inline => {
                let source = fs::read_to_string(path)?;
                Ok(expect::inline_expectation(&source))
            }
            ExpectStrategy::Fixture => expect::fixture_expectation(path),
        }
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::fs;

    // `echo <file>` prints the file path; `cat <file>` prints its content.
    // Both stand in for an interpreter taking the test file as sole argument.

    #[test]
    fn inline_case_passes_when_output_matches() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("case.lox");
        fs::write(&file, format!("// expect: {}\n", file.display())).unwrap();

        let runner = LoxRunner::new("echo", ExpectStrategy::Inline);
        let result = runner.run_case(&file).unwrap();
        assert_eq!(result.outcome, CaseOutcome::Pass);
    }

    #[test]
    fn inline_case_fails_on_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("case.lox");
        fs::write(&file, "// expect: nope\n").unwrap();

        let runner = LoxRunner::new("echo", ExpectStrategy::Inline);
        let result = runner.run_case(&file).unwrap();
        assert_eq!(result.outcome, CaseOutcome::Fail);
        assert_eq!(result.expected, "nope\n");
        assert_eq!(result.got, format!("{}\n", file.display()));
    }

    #[test]
    fn fixture_case_compares_against_the_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("case.lox");
        fs::write(&file, "print 1;\nprint 2;\n").unwrap();
        fs::write(dir.path().join("case.expect"), "print 1;\nprint 2;\n").unwrap();

        let runner = LoxRunner::new("cat", ExpectStrategy::Fixture);
        let result = runner.run_case(&file).unwrap();
        assert_eq!(result.outcome, CaseOutcome::Pass);
    }

    #[test]
    fn fixture_mode_normalizes_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("case.lox");
        fs::write(&file, "error: oops\nfile.lox:1\n^\nok\n").unwrap();
        fs::write(dir.path().join("case.expect"), "ok\n").unwrap();

        let runner = LoxRunner::new("cat", ExpectStrategy::Fixture);
        let result = runner.run_case(&file).unwrap();
        assert_eq!(result.outcome, CaseOutcome::Pass);
    }

    #[test]
    fn inline_mode_does_not_normalize() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("case.lox");
        // cat echoes the annotation line itself, so this cannot match.
        fs::write(&file, "error: oops\nx\ny\n// expect: z\n").unwrap();

        let runner = LoxRunner::new("cat", ExpectStrategy::Inline);
        let result = runner.run_case(&file).unwrap();
        assert_eq!(result.outcome, CaseOutcome::Fail);
        assert!(result.got.starts_with("error: oops\n"));
    }

    #[test]
    fn missing_fixture_is_an_errored_case_not_a_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("case.lox");
        fs::write(&file, "print 1;\n").unwrap();

        let runner = LoxRunner::new("cat", ExpectStrategy::Fixture);
        let result = runner.run_case(&file).unwrap();
        assert_eq!(result.outcome, CaseOutcome::Error);
        assert!(result.error.as_deref().unwrap().contains("case.expect"));
    }

    #[test]
    fn spawn_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("case.lox");
        fs::write(&file, "// expect: 1\n").unwrap();

        let runner = LoxRunner::new("/no/such/interpreter", ExpectStrategy::Inline);
        let err = runner.run_case(&file).unwrap_err();
        assert!(matches!(err, HarnessError::Spawn { .. }));
    }

    #[test]
    fn filter_narrows_the_collected_set() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("loop_while.lox"), "").unwrap();
        fs::write(dir.path().join("class_init.lox"), "").unwrap();

        let runner = LoxRunner::new("cat", ExpectStrategy::Inline).with_filter("loop");
        let tests = runner.collect_tests(dir.path()).unwrap();
        assert_eq!(tests.len(), 1);
        assert!(tests[0].ends_with("loop_while.lox"));
    }
}
