//! GitHub release API strategy.
//!
//! Looks up the latest upstream release, downloads the installer asset for
//! the host architecture, and runs it silently.

use std::path::Path;

use crate::download;
use crate::error::{InstallerError, Result};
use crate::release::{self, GITHUB_API_BASE};
use crate::report::Reporter;
use crate::shell::{command, platform};
use crate::tool::ToolSpec;

use super::TentativeOutcome;

/// Installer package suffix for this platform.
fn asset_suffix() -> &'static str {
    if cfg!(target_os = "windows") {
        ".msi"
    } else if cfg!(target_os = "macos") {
        ".pkg"
    } else {
        ".deb"
    }
}

pub fn install(tool: &ToolSpec, reporter: &mut dyn Reporter) -> Result<TentativeOutcome> {
    install_from(GITHUB_API_BASE, super::install_package_file, tool, reporter)
}

/// Same as [`install`] with an injectable API base and installer runner,
/// so tests can point at a mock server and skip the real package manager.
pub fn install_from(
    api_base: &str,
    run_installer: impl Fn(&Path) -> Result<command::CommandResult>,
    tool: &ToolSpec,
    reporter: &mut dyn Reporter,
) -> Result<TentativeOutcome> {
    let release = release::latest_release(api_base, &tool.github_repo)?;
    let arch = platform::arch_token();

    let asset = release::select_asset(&release.assets, arch, asset_suffix()).ok_or_else(|| {
        InstallerError::NoMatchingAsset {
            repo: tool.github_repo.clone(),
            arch: arch.to_string(),
        }
    })?;

    reporter.info(&format!(
        "Downloading {} ({})",
        asset.name,
        release.version()
    ));
    let dest = std::env::temp_dir().join(&asset.name);
    download::download(&asset.browser_download_url, &dest)?;

    reporter.info(&format!("Running installer {}", asset.name));
    let result = run_installer(&dest)?;
    let _ = std::fs::remove_file(&dest);

    if result.success {
        Ok(TentativeOutcome::reported(Some(
            release.version().to_string(),
        )))
    } else {
        reporter.warning(&format!(
            "installer for {} exited with {:?}",
            asset.name, result.exit_code
        ));
        Ok(TentativeOutcome::failed())
    }
}
