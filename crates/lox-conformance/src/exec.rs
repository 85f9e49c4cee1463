//! Interpreter invocation

use std::path::Path;
use std::process::Command;

use crate::error::{HarnessError, HarnessResult};

/// Run `binary` on a single test file and capture its output.
///
/// The call blocks until the child exits; there is no timeout. Captured
/// stdout and stderr are concatenated (stdout first) into one stream — the
/// merge is best-effort, interleaving between the two streams is not
/// preserved. The child's exit code is not inspected: only the captured
/// output takes part in the comparison.
pub fn run_interpreter(binary: &Path, source: &Path) -> HarnessResult<Vec<u8>> {
    tracing::debug!("running {} {}", binary.display(), source.display());

    let output = Command::new(binary)
        .arg(source)
        .output()
        .map_err(|err| HarnessError::Spawn {
            command: format!("{} {}", binary.display(), source.display()),
            source: err,
        })?;

    let mut merged = output.stdout;
    merged.extend_from_slice(&output.stderr);
    Ok(merged)
}
