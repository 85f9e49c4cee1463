//! Expectation derivation and output normalization

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, HarnessResult};

/// Inline annotation marker. Text after the first occurrence on a line,
/// through the line terminator, contributes to the expected output.
pub const EXPECT_MARKER: &str = "// expect: ";

/// Diagnostic prefix recognized by [`normalize_output`].
pub const ERROR_PREFIX: &str = "error: ";

/// Extension of the sibling fixture file.
pub const FIXTURE_EXTENSION: &str = "expect";

/// Derive the expected output from inline `// expect: ` annotations.
///
/// Lines are scanned in file order with their terminators preserved, so a
/// `\r\n` file contributes `\r\n`-terminated fragments and an unterminated
/// final line contributes no terminator. Lines without the marker
/// contribute nothing.
pub fn inline_expectation(source: &str) -> String {
    let mut expected = String::new();
    for line in source.split_inclusive('\n') {
        if let Some(idx) = line.find(EXPECT_MARKER) {
            expected.push_str(&line[idx + EXPECT_MARKER.len()..]);
        }
    }
    expected
}

/// Path of the fixture paired with a test file: `foo.lox` → `foo.expect`.
pub fn fixture_path(source: &Path) -> PathBuf {
    source.with_extension(FIXTURE_EXTENSION)
}

/// Read the expected output from the sibling fixture file.
///
/// An absent fixture is an error carrying the fixture path — it must never
/// degrade into an empty expectation.
pub fn fixture_expectation(source: &Path) -> HarnessResult<String> {
    let path = fixture_path(source);
    match fs::read(&path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(HarnessError::MissingFixture { path })
        }
        Err(err) => Err(err.into()),
    }
}

/// Strip interpreter diagnostics from captured output before comparison.
///
/// Every line beginning with `error: ` is removed together with the two
/// lines immediately following it (file path and caret line of the
/// diagnostic). The three-line shape is a fixed convention of the
/// interpreter's diagnostic format; a truncated tail at end of output is
/// consumed without error. Lines outside these triplets keep their order.
pub fn normalize_output(raw: &str) -> String {
    let mut result = String::new();
    let mut lines = raw.split_inclusive('\n');
    while let Some(line) = lines.next() {
        if line.starts_with(ERROR_PREFIX) {
            lines.next();
            lines.next();
        } else {
            result.push_str(line);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_on_its_own_line() {
        assert_eq!(inline_expectation("// expect: hello\n"), "hello\n");
    }

    #[test]
    fn annotation_after_code() {
        let source = "print 1 + 2; // expect: 3\n";
        assert_eq!(inline_expectation(source), "3\n");
    }

    #[test]
    fn annotations_concatenate_in_file_order() {
        let source = "print \"a\"; // expect: a\nprint 1;\nprint \"b\"; // expect: b\n";
        assert_eq!(inline_expectation(source), "a\nb\n");
    }

    #[test]
    fn unannotated_source_yields_empty_expectation() {
        assert_eq!(inline_expectation("print 1;\nprint 2;\n"), "");
    }

    #[test]
    fn crlf_terminators_are_preserved() {
        let source = "print 1; // expect: 1\r\nprint 2; // expect: 2\r\n";
        assert_eq!(inline_expectation(source), "1\r\n2\r\n");
    }

    #[test]
    fn unterminated_final_line_contributes_no_terminator() {
        assert_eq!(inline_expectation("// expect: tail"), "tail");
    }

    #[test]
    fn fixture_path_replaces_the_source_extension() {
        assert_eq!(
            fixture_path(Path::new("tests/loop/while.lox")),
            Path::new("tests/loop/while.expect")
        );
    }

    #[test]
    fn missing_fixture_surfaces_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("case.lox");

        let err = fixture_expectation(&source).unwrap_err();
        assert!(matches!(err, HarnessError::MissingFixture { .. }));
        assert!(err.to_string().contains("case.expect"));
    }

    #[test]
    fn normalization_strips_a_diagnostic_triplet() {
        let raw = "error: oops\nfile.lox:1\n^\nok\n";
        assert_eq!(normalize_output(raw), "ok\n");
    }

    #[test]
    fn normalization_preserves_surrounding_lines() {
        let raw = "before\nerror: bad token\nfile.lox:3\n   ^\nafter\n";
        assert_eq!(normalize_output(raw), "before\nafter\n");
    }

    #[test]
    fn multiple_triplets_are_removed_independently() {
        let raw = "a\nerror: one\nx\ny\nb\nerror: two\nx\ny\nc\n";
        assert_eq!(normalize_output(raw), "a\nb\nc\n");
    }

    #[test]
    fn truncated_trailing_diagnostic_is_consumed() {
        let raw = "ok\nerror: boom\nonly one follower\n";
        assert_eq!(normalize_output(raw), "ok\n");
    }

    #[test]
    fn prefix_must_start_the_line() {
        let raw = "note: error: not a diagnostic\nnext\n";
        assert_eq!(normalize_output(raw), raw);
    }

    #[test]
    fn untouched_output_passes_through() {
        let raw = "1\n2\n3\n";
        assert_eq!(normalize_output(raw), raw);
    }
}
