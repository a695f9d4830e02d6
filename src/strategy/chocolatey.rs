//! Chocolatey strategy.
//!
//! A prior partial install can poison Chocolatey's package cache: the
//! stale lib directory makes every later install of the same package fail
//! the same way. Stale cache entries for this package id are removed
//! before attempting a fresh install. Cleanup is deliberately scoped to
//! this one package; other managers' caches are left alone.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::report::Reporter;
use crate::shell::command;
use crate::tool::ToolSpec;

use super::TentativeOutcome;

pub fn available() -> bool {
    command::run_ok("choco", &["--version"])
}

/// Chocolatey's install root.
fn choco_root() -> PathBuf {
    if let Ok(root) = std::env::var("ChocolateyInstall") {
        return PathBuf::from(root);
    }
    if let Ok(program_data) = std::env::var("ProgramData") {
        return PathBuf::from(program_data).join("chocolatey");
    }
    PathBuf::from(r"C:\ProgramData\chocolatey")
}

/// Remove cached package directories matching `package_id` under the
/// Chocolatey root. Returns the paths that were removed.
///
/// Both `lib` (completed installs) and `lib-bad` (failed installs) are
/// swept; a directory counts as matching when its name is the package id
/// or the id followed by a version suffix.
fn clean_stale_cache(root: &Path, package_id: &str) -> Vec<PathBuf> {
    let mut removed = Vec::new();

    for cache in ["lib", "lib-bad", "lib-bkp"] {
        let dir = root.join(cache);
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.filter_map(|e| e.ok()) {
            let name = entry.file_name().to_string_lossy().to_string();
            let matches = name == package_id
                || name
                    .strip_prefix(package_id)
                    .is_some_and(|rest| rest.starts_with('.'));
            if matches && fs::remove_dir_all(entry.path()).is_ok() {
                removed.push(entry.path());
            }
        }
    }

    removed
}

pub fn install(tool: &ToolSpec, reporter: &mut dyn Reporter) -> Result<TentativeOutcome> {
    let removed = clean_stale_cache(&choco_root(), &tool.choco_id);
    if !removed.is_empty() {
        reporter.info(&format!(
            "Removed {} stale chocolatey cache entr{} for {}",
            removed.len(),
            if removed.len() == 1 { "y" } else { "ies" },
            tool.choco_id
        ));
    }

    let result = command::run("choco", &["install", tool.choco_id.as_str(), "-y", "--force"])?;
    if result.success {
        Ok(TentativeOutcome::reported(None))
    } else {
        reporter.warning(&format!("choco install exited with {:?}", result.exit_code));
        Ok(TentativeOutcome::failed())
    }
}
