//! Availability probing.
//!
//! The prober is the sole source of truth for "is the tool actually usable
//! now". Strategies self-report optimistically; only a probe verdict counts.

use regex::Regex;

use crate::shell::command;
use crate::tool::ToolSpec;

/// Version-shaped token: digits.digits with an optional patch component.
const VERSION_PATTERN: &str = r"\d+\.\d+(\.\d+)?";

/// Outcome of probing the target tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the tool ran and printed a parseable version.
    pub is_working: bool,
    /// Normalized version string, present only when working.
    pub clean_version: Option<String>,
}

impl VerificationResult {
    /// A working tool with its normalized version.
    pub fn working(version: impl Into<String>) -> Self {
        Self {
            is_working: true,
            clean_version: Some(version.into()),
        }
    }

    /// A missing or broken tool.
    pub fn not_working() -> Self {
        Self {
            is_working: false,
            clean_version: None,
        }
    }

    /// The verified version, present only for a working tool.
    pub fn verified_version(&self) -> Option<String> {
        if self.is_working {
            self.clean_version.clone()
        } else {
            None
        }
    }
}

/// Invoke the tool with its version-query arguments and check the result.
///
/// Success requires both a non-failure exit AND a version-shaped token in
/// the combined output. Some environments leave a stale shim on the search
/// path that exits 0 and prints nothing useful; the pattern match guards
/// against that false positive. Launch failures (not found, permission
/// denied) are a normal "not working" verdict, never an error.
pub fn probe(tool: &ToolSpec) -> VerificationResult {
    let args: Vec<&str> = tool.version_args.iter().map(String::as_str).collect();
    let result = match command::run(&tool.binary, &args) {
        Ok(r) => r,
        Err(_) => return VerificationResult::not_working(),
    };

    if !result.success {
        return VerificationResult::not_working();
    }

    let output = result.combined();
    match normalize_version(&output) {
        Some(version) => VerificationResult::working(version),
        None => VerificationResult::not_working(),
    }
}

/// First line of output, trimmed, if it contains a version-shaped token.
fn normalize_version(output: &str) -> Option<String> {
    let re = Regex::new(VERSION_PATTERN).ok()?;
    if !re.is_match(output) {
        return None;
    }
    let first_line = output.lines().next()?.trim();
    if first_line.is_empty() {
        return None;
    }
    Some(first_line.to_string())
}
