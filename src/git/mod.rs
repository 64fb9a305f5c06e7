//! External version-control query abstraction
//!
//! The describe query is a collaborator, not something ci-version
//! reimplements: the trait hides whether the answer comes from the real git
//! CLI ([cli::GitCli]) or from a canned test double ([mock::MockGit]).
//! Resolver code depends on the [GitQuery] trait only.

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockGit;

use crate::error::Result;

/// One-shot query against the version-control tool.
pub trait GitQuery: Send + Sync {
    /// Produce the raw descriptor line combining the nearest tag, the commit
    /// count since that tag, and an abbreviated object id
    /// (e.g. `v1.2.3-5-gabcde`).
    ///
    /// A failure here is the single fatal path of a run; the error carries
    /// whatever diagnostic text the tool produced.
    fn describe(&self) -> Result<String>;

    /// Human-readable rendering of what `describe` executes, for diagnostics.
    fn command_line(&self) -> String;
}
