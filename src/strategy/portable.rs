//! Portable archive strategy.
//!
//! Downloads the self-contained archive and unpacks it into a per-user
//! directory. Needs no elevation, which makes it the workhorse fallback on
//! locked-down machines. Any existing portable install is removed first so
//! two versions never mix in one tree.

use std::fs;

use crate::download;
use crate::error::Result;
use crate::extract;
use crate::report::Reporter;
use crate::tool::ToolSpec;

use super::TentativeOutcome;

pub fn install(tool: &ToolSpec, reporter: &mut dyn Reporter) -> Result<TentativeOutcome> {
    let archive_name = tool.portable_archive_name();
    let url = format!("{}/{}", tool.vendor_base_url, archive_name);
    let archive_path = std::env::temp_dir().join(&archive_name);

    reporter.info(&format!("Downloading portable archive {}", archive_name));
    download::download(&url, &archive_path)?;

    let portable_dir = tool.portable_dir();
    if portable_dir.exists() {
        reporter.info(&format!(
            "Removing previous portable install at {}",
            portable_dir.display()
        ));
        fs::remove_dir_all(&portable_dir)?;
    }

    extract::extract_archive(&archive_path, &portable_dir)?;
    let _ = fs::remove_file(&archive_path);

    reporter.info(&format!("Extracted to {}", portable_dir.display()));
    Ok(TentativeOutcome::reported(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;

    #[test]
    fn unreachable_vendor_is_error_not_panic() {
        let mut tool = ToolSpec::quarto();
        tool.vendor_base_url = "http://127.0.0.1:9".to_string();
        let mut reporter = MemoryReporter::new();
        assert!(install(&tool, &mut reporter).is_err());
    }
}
