//! Process launching and environment plumbing.
//!
//! # Modules
//!
//! - [`command`] - Synchronous external command execution with captured output
//! - [`platform`] - Host architecture and privilege detection
//! - [`refresh`] - Merging persisted and well-known paths into the process PATH

pub mod command;
pub mod platform;
pub mod refresh;

pub use command::{run, run_ok, run_script, CommandResult};
pub use refresh::refresh_search_path;
