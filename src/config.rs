use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{CiVersionError, Result};

/// Environment snapshot the resolver runs against.
///
/// Read once at process start and passed explicitly, so the resolver itself
/// never touches ambient globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefInput {
    /// Full commit hash of the current run (opaque, not validated)
    pub commit_sha: String,
    /// Git ref being built, e.g. `refs/heads/main`
    pub git_ref: String,
}

impl RefInput {
    pub fn new(commit_sha: impl Into<String>, git_ref: impl Into<String>) -> Self {
        RefInput {
            commit_sha: commit_sha.into(),
            git_ref: git_ref.into(),
        }
    }

    /// Build the snapshot from `GITHUB_SHA` / `GITHUB_REF`, with optional
    /// per-field overrides (used by the CLI for local runs).
    pub fn resolve(commit_sha: Option<String>, git_ref: Option<String>) -> Result<Self> {
        let commit_sha = match commit_sha {
            Some(sha) => sha,
            None => env::var("GITHUB_SHA")
                .map_err(|_| CiVersionError::environment("GITHUB_SHA is not set"))?,
        };
        let git_ref = match git_ref {
            Some(r) => r,
            None => env::var("GITHUB_REF")
                .map_err(|_| CiVersionError::environment("GITHUB_REF is not set"))?,
        };

        Ok(RefInput {
            commit_sha,
            git_ref,
        })
    }
}

/// Complete configuration for ci-version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Runtime behavior toggles that do not affect the output contract.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Convert the shallow CI checkout into full history before describing.
    /// Disable when the checkout is already complete.
    #[serde(default = "default_fetch_unshallow")]
    pub fetch_unshallow: bool,

    /// Optional per-command timeout for the external git invocations.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_fetch_unshallow() -> bool {
    true
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            fetch_unshallow: true,
            timeout_secs: None,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `ci-version.toml` in current directory
/// 3. `ci-version.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./ci-version.toml").exists() {
        fs::read_to_string("./ci-version.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("ci-version.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| CiVersionError::config(e.to_string()))
}
