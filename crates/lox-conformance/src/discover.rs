//! Test file discovery

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, HarnessResult};

/// Extension a file must carry to count as a test case.
pub const SOURCE_EXTENSION: &str = "lox";

fn is_source(path: &Path) -> bool {
    path.extension().map(|e| e == SOURCE_EXTENSION).unwrap_or(false)
}

/// Collect test files under `root`.
///
/// A file root is returned directly (still subject to the extension
/// filter). A directory root is traversed with an explicit worklist: the
/// immediate `.lox` entries of a directory are collected before its
/// subdirectories are visited. Sibling order is whatever `read_dir`
/// yields — callers must not depend on ordering across siblings.
///
/// Anything without the `.lox` extension is skipped silently and never
/// counted. A root that is neither file nor directory is rejected before
/// any processing happens.
pub fn collect_tests(root: &Path) -> HarnessResult<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(if is_source(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }
    if !root.is_dir() {
        return Err(HarnessError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    let mut tests = Vec::new();
    let mut worklist = vec![root.to_path_buf()];

    while let Some(dir) = worklist.pop() {
        let mut subdirs = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                subdirs.push(path);
            } else if is_source(&path) {
                tests.push(path);
            }
        }
        // Files of this directory are already collected; descend afterwards.
        worklist.extend(subdirs);
    }

    Ok(tests)
}
