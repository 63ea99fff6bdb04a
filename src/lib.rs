//! # `verify_hooks`
//!
//! Lifecycle hooks that keep a coding agent honest: a stop-time check that
//! tests ran and passed, a post-edit reminder naming the test command, and a
//! pre-commit gate that enforces branch policy and runs lint and tests.

#[cfg(feature = "cli")]
pub mod cli;
pub mod command;
pub mod config;
pub mod detect;
pub mod error;
pub mod git;
pub mod hook_logging;
pub mod hooks;
pub mod paths;
pub mod testing;
pub mod traits;

pub use command::RealCommandRunner;
pub use traits::{CommandOutput, CommandRunner};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
