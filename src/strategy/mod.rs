//! Installation strategies.
//!
//! Each strategy is one self-contained way of getting the tool onto the
//! machine. A strategy checks its own precondition (is the underlying
//! manager even present?), performs the install, and reports a *tentative*
//! outcome. It never decides overall success: the orchestrator re-probes
//! the tool after every attempt and only trusts that verdict.
//!
//! The closed set of production methods lives in [`Method`], tried in the
//! order of [`Method::PRIORITY`]. The [`Strategy`] trait is the seam the
//! orchestrator iterates over, which also lets tests substitute stubs.

mod chocolatey;
mod conda;
mod github;
mod portable;
mod scoop;
mod vendor;
mod winget;

use std::path::Path;

use crate::error::Result;
use crate::report::Reporter;
use crate::shell::command;
use crate::tool::ToolSpec;

/// What a single strategy believes happened. Never trusted as final truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TentativeOutcome {
    /// The strategy thinks the install worked.
    pub reported_success: bool,
    /// Version text the strategy saw, if any. Informational only; the
    /// probed version is authoritative.
    pub raw_version: Option<String>,
}

impl TentativeOutcome {
    pub fn reported(raw_version: Option<String>) -> Self {
        Self {
            reported_success: true,
            raw_version,
        }
    }

    pub fn failed() -> Self {
        Self {
            reported_success: false,
            raw_version: None,
        }
    }
}

/// One concrete installation method.
pub trait Strategy {
    /// Short name used in logs and in the final result's `method` field.
    fn name(&self) -> &'static str;

    /// Cheap check for whether this method can run at all. A false
    /// precondition means "skip", never "error".
    fn precondition(&self) -> bool;

    /// Perform the install. Errors are caught at the orchestrator
    /// boundary and treated like a reported failure.
    fn attempt(&self, reporter: &mut dyn Reporter) -> Result<TentativeOutcome>;
}

/// The closed set of production methods, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Winget,
    Scoop,
    CondaForge,
    Chocolatey,
    GithubRelease,
    PortableArchive,
    VendorPackage,
}

impl Method {
    /// Fixed try order. Package managers first (they handle upgrades and
    /// PATH wiring), then direct downloads, with the vendor URL as the
    /// last resort.
    pub const PRIORITY: [Method; 7] = [
        Method::Winget,
        Method::Scoop,
        Method::CondaForge,
        Method::Chocolatey,
        Method::GithubRelease,
        Method::PortableArchive,
        Method::VendorPackage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::Winget => "Winget",
            Method::Scoop => "Scoop",
            Method::CondaForge => "Conda",
            Method::Chocolatey => "Chocolatey",
            Method::GithubRelease => "GitHub API",
            Method::PortableArchive => "Portable",
            Method::VendorPackage => "Direct Download",
        }
    }
}

/// A [`Method`] bound to the tool it installs.
pub struct MethodStrategy<'a> {
    method: Method,
    tool: &'a ToolSpec,
}

impl<'a> MethodStrategy<'a> {
    pub fn new(method: Method, tool: &'a ToolSpec) -> Self {
        Self { method, tool }
    }
}

impl Strategy for MethodStrategy<'_> {
    fn name(&self) -> &'static str {
        self.method.name()
    }

    fn precondition(&self) -> bool {
        match self.method {
            Method::Winget => winget::available(),
            Method::Scoop => scoop::available(),
            Method::CondaForge => conda::available(),
            Method::Chocolatey => chocolatey::available(),
            // Download-based methods need only the network, checked by
            // the attempt itself.
            Method::GithubRelease | Method::PortableArchive | Method::VendorPackage => true,
        }
    }

    fn attempt(&self, reporter: &mut dyn Reporter) -> Result<TentativeOutcome> {
        match self.method {
            Method::Winget => winget::install(self.tool, reporter),
            Method::Scoop => scoop::install(self.tool, reporter),
            Method::CondaForge => conda::install(self.tool, reporter),
            Method::Chocolatey => chocolatey::install(self.tool, reporter),
            Method::GithubRelease => github::install(self.tool, reporter),
            Method::PortableArchive => portable::install(self.tool, reporter),
            Method::VendorPackage => vendor::install(self.tool, reporter),
        }
    }
}

/// All production strategies for `tool`, in priority order.
pub fn default_chain(tool: &ToolSpec) -> Vec<MethodStrategy<'_>> {
    Method::PRIORITY
        .iter()
        .map(|m| MethodStrategy::new(*m, tool))
        .collect()
}

/// Run a downloaded installer package silently.
///
/// Shared by the download-based strategies. The caller still re-verifies;
/// installer exit codes are necessary but not sufficient.
pub(crate) fn install_package_file(path: &Path) -> Result<command::CommandResult> {
    let path_str = path.display().to_string();
    if cfg!(target_os = "windows") {
        command::run("msiexec", &["/i", &path_str, "/quiet", "/norestart"])
    } else if path_str.ends_with(".deb") {
        command::run("dpkg", &["-i", &path_str])
    } else {
        command::run("installer", &["-pkg", &path_str, "-target", "/"])
    }
}
