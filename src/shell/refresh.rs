//! Process search-path refresh.
//!
//! Installers write binaries to locations the process PATH inherited at
//! startup does not cover, and on Windows they update the persisted
//! machine/user PATH without touching running processes. Without a refresh
//! between install and verification, a strategy could succeed on disk and
//! still be judged a failure.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::shell::command;
use crate::tool::ToolSpec;

/// Merge persisted search paths and the tool's well-known install
/// directories into the process PATH.
pub fn refresh_search_path(tool: &ToolSpec) {
    let current = std::env::var("PATH").unwrap_or_default();
    let persisted = persisted_paths();
    let extras: Vec<PathBuf> = tool
        .well_known_dirs()
        .into_iter()
        .filter(|p| p.is_dir())
        .collect();

    let merged = merge_paths(&current, &persisted, &extras);
    // SAFETY: strategies run strictly sequentially; nothing else mutates
    // the environment during a run.
    unsafe { std::env::set_var("PATH", merged) };
}

/// Machine- and user-scope persisted PATH entries.
///
/// On Windows these live in the registry and are read through PowerShell
/// (the registry is an opaque collaborator here). Elsewhere there is no
/// separate persisted scope, so this contributes nothing.
fn persisted_paths() -> Vec<String> {
    if !cfg!(target_os = "windows") {
        return Vec::new();
    }

    let mut out = Vec::new();
    for scope in ["Machine", "User"] {
        let script = format!("[Environment]::GetEnvironmentVariable('Path','{}')", scope);
        if let Ok(result) = command::run_script(&script) {
            if result.success {
                out.extend(
                    result
                        .stdout
                        .trim()
                        .split(';')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
        }
    }
    out
}

/// Build the merged PATH string: current entries first, then persisted
/// entries, then extras, deduplicated in order of first appearance.
fn merge_paths(current: &str, persisted: &[String], extras: &[PathBuf]) -> String {
    let separator = if cfg!(windows) { ';' } else { ':' };

    let mut seen = HashSet::new();
    let mut parts: Vec<String> = Vec::new();

    let candidates = current
        .split(separator)
        .map(str::to_string)
        .chain(persisted.iter().cloned())
        .chain(extras.iter().map(|p| p.display().to_string()));

    for part in candidates {
        if part.is_empty() {
            continue;
        }
        if seen.insert(part.clone()) {
            parts.push(part);
        }
    }

    parts.join(&separator.to_string())
}
