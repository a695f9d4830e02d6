//! Quartermaster - unattended installer for the Quarto CLI.
//!
//! Quartermaster gets the Quarto document renderer onto a machine by
//! trying a prioritized chain of independent installation strategies
//! (winget, scoop, conda, chocolatey, the GitHub release API, a portable
//! archive, and a direct vendor download) until one of them produces a
//! binary that actually runs and prints a version.
//!
//! # Modules
//!
//! - [`orchestrator`] - The try/verify/continue loop and final result record
//! - [`strategy`] - The seven installation methods
//! - [`probe`] - Authoritative "does the tool work" verification
//! - [`release`] - GitHub release metadata client
//! - [`download`] - Resumable HTTP downloads
//! - [`extract`] - Portable archive unpacking
//! - [`shell`] - Process launching, PATH refresh, platform detection
//! - [`report`] - Transcript logging and the reporter seam
//! - [`tool`] - The target tool descriptor
//! - [`error`] - Error types and result alias
//!
//! # Example
//!
//! ```no_run
//! use quartermaster::{install, RunConfiguration, ToolSpec};
//!
//! let result = install(&ToolSpec::quarto(), &RunConfiguration::default());
//! if result.success {
//!     println!(
//!         "{} via {}",
//!         result.version.unwrap_or_default(),
//!         result.method.unwrap_or_default()
//!     );
//! }
//! ```

pub mod download;
pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod probe;
pub mod release;
pub mod report;
pub mod shell;
pub mod strategy;
pub mod tool;

pub use error::{InstallerError, Result};
pub use orchestrator::{install, InstallResult, Orchestrator, RunConfiguration};
pub use probe::{probe, VerificationResult};
pub use report::{NullReporter, Reporter, Transcript};
pub use tool::ToolSpec;
