use crate::error::{CiVersionError, Result};

/// Mock query for testing without a git checkout.
pub struct MockGit {
    result: std::result::Result<String, String>,
}

impl MockGit {
    /// Mock that answers with a canned descriptor line
    pub fn with_line(line: impl Into<String>) -> Self {
        MockGit {
            result: Ok(line.into()),
        }
    }

    /// Mock that fails with the given diagnostic detail
    pub fn with_failure(detail: impl Into<String>) -> Self {
        MockGit {
            result: Err(detail.into()),
        }
    }
}

impl super::GitQuery for MockGit {
    fn describe(&self) -> Result<String> {
        self.result.clone().map_err(CiVersionError::git)
    }

    fn command_line(&self) -> String {
        "mock git describe".to_string()
    }
}
