pub mod branch;
pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod resolver;
pub mod ui;
pub mod version;

pub use error::{CiVersionError, Result};
