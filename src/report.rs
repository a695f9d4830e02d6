//! Run transcripts and leveled reporting.
//!
//! The orchestrator reports through an explicit [`Reporter`] passed in at
//! construction time rather than any ambient logger. The production
//! implementation is [`Transcript`]: a timestamped log file in the temp
//! directory (its path ends up in the final result) mirrored to `tracing`
//! and a styled console line. Hosts that want silence use [`NullReporter`];
//! tests assert against [`MemoryReporter`].

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use console::style;

use crate::error::{InstallerError, Result};

/// Reporting levels, in the order installers talk about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "OK",
            Level::Warning => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Destination for run progress and the final verdict.
pub trait Reporter {
    /// Progress and decisions.
    fn info(&mut self, msg: &str);

    /// A confirmed good outcome.
    fn success(&mut self, msg: &str);

    /// A failed attempt the run can survive.
    fn warning(&mut self, msg: &str);

    /// A failure that ends the run.
    fn error(&mut self, msg: &str);

    /// Where the transcript is being written, if anywhere.
    fn log_path(&self) -> Option<&Path> {
        None
    }
}

/// File-backed reporter used by real runs.
pub struct Transcript {
    path: PathBuf,
    file: File,
}

impl Transcript {
    /// Open a transcript in the system temp directory.
    pub fn begin(tool_name: &str) -> Result<Self> {
        Self::begin_in(&std::env::temp_dir(), tool_name)
    }

    /// Open a transcript under `dir`.
    pub fn begin_in(dir: &Path, tool_name: &str) -> Result<Self> {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!(
            "{}-install-{}.log",
            tool_name.to_lowercase(),
            stamp
        ));
        let mut file = File::create(&path).map_err(|e| InstallerError::TranscriptError {
            message: format!("cannot create {}: {}", path.display(), e),
        })?;
        writeln!(
            file,
            "[{}] [INFO] transcript opened",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
        .map_err(|e| InstallerError::TranscriptError {
            message: e.to_string(),
        })?;

        Ok(Self { path, file })
    }

    fn record(&mut self, level: Level, msg: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        // A transcript write failure must not take down the run.
        let _ = writeln!(self.file, "[{}] [{}] {}", stamp, level.tag(), msg);

        match level {
            Level::Info => {
                tracing::info!("{msg}");
                println!("{}", msg);
            }
            Level::Success => {
                tracing::info!("{msg}");
                println!("{}", style(msg).green());
            }
            Level::Warning => {
                tracing::warn!("{msg}");
                println!("{}", style(msg).yellow());
            }
            Level::Error => {
                tracing::error!("{msg}");
                eprintln!("{}", style(msg).red());
            }
        }
    }
}

impl Reporter for Transcript {
    fn info(&mut self, msg: &str) {
        self.record(Level::Info, msg);
    }

    fn success(&mut self, msg: &str) {
        self.record(Level::Success, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.record(Level::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.record(Level::Error, msg);
    }

    fn log_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Reporter that discards everything.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&mut self, _msg: &str) {}
    fn success(&mut self, _msg: &str) {}
    fn warning(&mut self, _msg: &str) {}
    fn error(&mut self, _msg: &str) {}
}

/// In-memory reporter for assertions in tests.
#[derive(Default)]
pub struct MemoryReporter {
    lines: Vec<(Level, String)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines in order.
    pub fn lines(&self) -> &[(Level, String)] {
        &self.lines
    }

    /// Whether any line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    /// Number of lines (any level) containing `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines.iter().filter(|(_, m)| m.contains(needle)).count()
    }
}

impl Reporter for MemoryReporter {
    fn info(&mut self, msg: &str) {
        self.lines.push((Level::Info, msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.lines.push((Level::Success, msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push((Level::Warning, msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push((Level::Error, msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn transcript_creates_log_file() {
        let temp = TempDir::new().unwrap();
        let transcript = Transcript::begin_in(temp.path(), "Quarto").unwrap();

        let path = transcript.log_path().unwrap().to_path_buf();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("quarto-install-"));
    }

    #[test]
    fn transcript_records_all_levels() {
        let temp = TempDir::new().unwrap();
        let mut transcript = Transcript::begin_in(temp.path(), "Quarto").unwrap();
        let path = transcript.log_path().unwrap().to_path_buf();

        transcript.info("checking");
        transcript.success("installed");
        transcript.warning("attempt failed");
        transcript.error("everything failed");
        drop(transcript);

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("[INFO] checking"));
        assert!(contents.contains("[OK] installed"));
        assert!(contents.contains("[WARN] attempt failed"));
        assert!(contents.contains("[ERROR] everything failed"));
    }

    #[test]
    fn transcript_fails_in_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        let result = Transcript::begin_in(&missing, "Quarto");
        assert!(matches!(
            result,
            Err(InstallerError::TranscriptError { .. })
        ));
    }

    #[test]
    fn memory_reporter_records_and_counts() {
        let mut reporter = MemoryReporter::new();
        reporter.info("first");
        reporter.warning("manual install: see docs");
        reporter.warning("unrelated");

        assert!(reporter.contains(Level::Warning, "see docs"));
        assert!(!reporter.contains(Level::Error, "see docs"));
        assert_eq!(reporter.count_containing("see docs"), 1);
        assert_eq!(reporter.lines().len(), 3);
    }

    #[test]
    fn null_reporter_has_no_log_path() {
        let reporter = NullReporter;
        assert!(reporter.log_path().is_none());
    }
}
