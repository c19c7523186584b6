//! CLI commands
//!
//! Command implementations for the `release-changelog` binary.

mod progress;
mod release;
mod style;

pub use release::{ReleaseArgs, run_release};
