//! Strategy-chain orchestration.
//!
//! The orchestrator owns the ordered strategy list and the
//! try/verify/continue loop. Its run is a small state machine:
//!
//! ```text
//! Idle -> CheckingExisting -> Done[success]            (already working)
//!                          -> TryingStrategies -> Done[success]
//!                                              -> Done[exhausted]
//!                                              -> Done[fatalException]
//! ```
//!
//! One [`InstallResult`] is produced per run, no matter which terminal
//! state is reached. A strategy's own view of its outcome is never the
//! final word; the prober's verdict after a path refresh and a settle
//! delay is.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::probe::{self, VerificationResult};
use crate::report::{Reporter, Transcript};
use crate::shell::refresh;
use crate::strategy::{default_chain, Strategy};
use crate::tool::ToolSpec;

/// Method recorded when the tool was already present.
pub const METHOD_EXISTING: &str = "Existing";
/// Method sentinel for a run that died outside any strategy.
pub const METHOD_EXCEPTION: &str = "Exception";

/// Time given to installers for filesystem and PATH changes to become
/// visible before verification.
const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// The one external toggle for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfiguration {
    /// Run every strategy even if the tool already verifies.
    pub force_reinstall: bool,
}

/// Final outcome of one orchestrator run. Immutable once produced.
///
/// `success` implies `method` and `version` are present. On failure both
/// are absent, except that `method` holds [`METHOD_EXCEPTION`] when the
/// run itself (not a strategy) failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub success: bool,
    pub method: Option<String>,
    pub version: Option<String>,
    pub log_location: Option<PathBuf>,
}

impl InstallResult {
    fn installed(method: &str, version: String, log_location: Option<PathBuf>) -> Self {
        Self {
            success: true,
            method: Some(method.to_string()),
            version: Some(version),
            log_location,
        }
    }

    fn exhausted(log_location: Option<PathBuf>) -> Self {
        Self {
            success: false,
            method: None,
            version: None,
            log_location,
        }
    }

    fn run_failure(log_location: Option<PathBuf>) -> Self {
        Self {
            success: false,
            method: Some(METHOD_EXCEPTION.to_string()),
            version: None,
            log_location,
        }
    }
}

/// Owns the strategy chain and the probe/refresh collaborators.
///
/// The collaborators are injected so tests can script them; production
/// runs come from [`Orchestrator::for_tool`].
pub struct Orchestrator<'a> {
    strategies: Vec<Box<dyn Strategy + 'a>>,
    prober: Box<dyn Fn() -> VerificationResult + 'a>,
    refresher: Box<dyn Fn() -> Result<()> + 'a>,
    settle: Duration,
    docs_url: String,
}

impl<'a> Orchestrator<'a> {
    /// Build an orchestrator with explicit collaborators.
    pub fn new(
        strategies: Vec<Box<dyn Strategy + 'a>>,
        prober: impl Fn() -> VerificationResult + 'a,
        refresher: impl Fn() -> Result<()> + 'a,
        docs_url: impl Into<String>,
    ) -> Self {
        Self {
            strategies,
            prober: Box::new(prober),
            refresher: Box::new(refresher),
            settle: SETTLE_DELAY,
            docs_url: docs_url.into(),
        }
    }

    /// Production wiring: the default chain, real prober, real refresher.
    pub fn for_tool(tool: &'a ToolSpec) -> Self {
        let strategies: Vec<Box<dyn Strategy + 'a>> = default_chain(tool)
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn Strategy + 'a>)
            .collect();
        Self::new(
            strategies,
            move || probe::probe(tool),
            move || {
                refresh::refresh_search_path(tool);
                Ok(())
            },
            tool.docs_url.clone(),
        )
    }

    /// Override the settle delay (tests use zero).
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Run the chain and produce the final result.
    ///
    /// Never returns an error: a failure outside the strategy loop becomes
    /// a result with the [`METHOD_EXCEPTION`] sentinel.
    pub fn install(&self, config: &RunConfiguration, reporter: &mut dyn Reporter) -> InstallResult {
        let log_location = reporter.log_path().map(PathBuf::from);
        match self.run(config, reporter) {
            Ok(result) => result,
            Err(e) => {
                reporter.error(&format!("Installation run failed: {}", e));
                InstallResult::run_failure(log_location)
            }
        }
    }

    fn run(
        &self,
        config: &RunConfiguration,
        reporter: &mut dyn Reporter,
    ) -> Result<InstallResult> {
        let log_location = reporter.log_path().map(PathBuf::from);

        // CheckingExisting
        reporter.info("Checking for an existing working install");
        let existing = (self.prober)();
        if let Some(version) = existing.verified_version() {
            if !config.force_reinstall {
                reporter.success(&format!("Already installed: {}", version));
                return Ok(InstallResult::installed(
                    METHOD_EXISTING,
                    version,
                    log_location,
                ));
            }
            reporter.info(&format!(
                "Version {} present but reinstall forced",
                version
            ));
        }

        // TryingStrategies
        for strategy in &self.strategies {
            if !strategy.precondition() {
                reporter.info(&format!("{}: not available, skipping", strategy.name()));
                continue;
            }

            reporter.info(&format!("Trying install via {}", strategy.name()));
            (self.refresher)()?;

            let outcome = match strategy.attempt(reporter) {
                Ok(outcome) => outcome,
                Err(e) => {
                    // A later strategy may still succeed; a warning, not
                    // the end of the run.
                    reporter.warning(&format!("{} failed: {}", strategy.name(), e));
                    continue;
                }
            };

            if !outcome.reported_success {
                reporter.warning(&format!("{} did not complete", strategy.name()));
                continue;
            }

            std::thread::sleep(self.settle);
            (self.refresher)()?;

            let verdict = (self.prober)();
            match verdict.verified_version() {
                Some(version) => {
                    if let Some(raw) = &outcome.raw_version {
                        if raw != &version {
                            reporter.info(&format!(
                                "Installer reported {} but probe found {}",
                                raw, version
                            ));
                        }
                    }
                    reporter.success(&format!(
                        "Installed {} via {}",
                        version,
                        strategy.name()
                    ));
                    return Ok(InstallResult::installed(
                        strategy.name(),
                        version,
                        log_location,
                    ));
                }
                None => {
                    reporter.warning(&format!(
                        "{} reported success but verification failed, trying next",
                        strategy.name()
                    ));
                }
            }
        }

        // Exhausted: a normal terminal outcome with explicit remediation.
        reporter.error("All installation methods failed");
        reporter.info(&format!("Manual installation instructions: {}", self.docs_url));
        Ok(InstallResult::exhausted(log_location))
    }
}

/// Entry operation: install `tool`, writing a transcript to the temp
/// directory. This is what the CLI and any embedding host call.
pub fn install(tool: &ToolSpec, config: &RunConfiguration) -> InstallResult {
    let mut reporter = match Transcript::begin(&tool.name) {
        Ok(transcript) => transcript,
        Err(e) => {
            tracing::error!("could not open install transcript: {e}");
            return InstallResult::run_failure(None);
        }
    };

    Orchestrator::for_tool(tool).install(config, &mut reporter)
}
