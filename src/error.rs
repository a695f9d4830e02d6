//! Error types for Quartermaster operations.
//!
//! This module defines [`InstallerError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `InstallerError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `InstallerError::Other`) for unexpected errors
//! - Errors inside a single installation strategy are caught at the
//!   orchestrator boundary and downgraded to warnings; only errors outside
//!   the strategy loop abort a run

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Quartermaster operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// An external command could not be launched or exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A download could not be completed.
    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// The release metadata API returned an unusable response.
    #[error("Release lookup failed for {repo}: {message}")]
    ReleaseLookupFailed { repo: String, message: String },

    /// No release asset matched the host architecture or the generic fallback.
    #[error("No release asset for architecture '{arch}' in {repo}")]
    NoMatchingAsset { repo: String, arch: String },

    /// An archive could not be unpacked.
    #[error("Failed to extract {archive}: {message}")]
    ExtractionFailed { archive: PathBuf, message: String },

    /// The transcript log file could not be created or written.
    #[error("Transcript error: {message}")]
    TranscriptError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error wrapper.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Quartermaster operations.
pub type Result<T> = std::result::Result<T, InstallerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = InstallerError::CommandFailed {
            command: "winget install".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("winget install"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn download_failed_displays_url_and_message() {
        let err = InstallerError::DownloadFailed {
            url: "https://example.com/pkg.msi".into(),
            message: "connection reset".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/pkg.msi"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn no_matching_asset_displays_arch_and_repo() {
        let err = InstallerError::NoMatchingAsset {
            repo: "quarto-dev/quarto-cli".into(),
            arch: "arm64".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("arm64"));
        assert!(msg.contains("quarto-dev/quarto-cli"));
    }

    #[test]
    fn extraction_failed_displays_archive() {
        let err = InstallerError::ExtractionFailed {
            archive: PathBuf::from("/tmp/quarto.tar.gz"),
            message: "unexpected EOF".into(),
        };
        assert!(err.to_string().contains("quarto.tar.gz"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: InstallerError = io_err.into();
        assert!(matches!(err, InstallerError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(InstallerError::TranscriptError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
