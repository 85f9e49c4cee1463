//! TOML configuration for the harness

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{HarnessError, HarnessResult};

/// Default config file probed in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "lox_conformance.toml";

/// Where the expected output of a case comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExpectStrategy {
    /// Inline `// expect: ` annotations in the test source.
    #[default]
    Inline,
    /// Pre-generated `.expect` fixture files.
    Fixture,
}

/// Whether the run aborts on the first failing case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailFast {
    Enabled,
    #[default]
    Disabled,
}

impl FailFast {
    pub fn is_enabled(self) -> bool {
        self == FailFast::Enabled
    }
}

/// Harness configuration loaded from a TOML file.
///
/// CLI flags override file values; every key has a default so an empty or
/// absent file is valid.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Expectation strategy for the runner.
    pub expect_from: ExpectStrategy,

    /// Abort on the first failing case.
    pub fail_fast: FailFast,

    /// Restrict the run to paths containing this substring.
    pub filter: Option<String>,
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let content = fs::read_to_string(path).map_err(|err| HarnessError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        toml::from_str(&content).map_err(|err| HarnessError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Load from the default location, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load_or_default() -> Self {
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if !default_path.exists() {
            return Self::default();
        }
        match Self::load(default_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Warning: {}", err);
                Self::default()
            }
        }
    }
}
