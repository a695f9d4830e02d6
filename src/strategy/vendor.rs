//! Direct vendor download strategy.
//!
//! Last resort: the vendor publishes its latest installer under a stable
//! URL, so no metadata lookup is needed. The package name encodes the host
//! architecture.

use crate::download;
use crate::error::Result;
use crate::report::Reporter;
use crate::tool::ToolSpec;

use super::TentativeOutcome;

pub fn install(tool: &ToolSpec, reporter: &mut dyn Reporter) -> Result<TentativeOutcome> {
    let package_name = tool.vendor_package_name();
    let url = format!("{}/{}", tool.vendor_base_url, package_name);
    let dest = std::env::temp_dir().join(&package_name);

    reporter.info(&format!("Downloading {}", url));
    download::download(&url, &dest)?;

    reporter.info(&format!("Running installer {}", package_name));
    let result = super::install_package_file(&dest)?;
    let _ = std::fs::remove_file(&dest);

    if result.success {
        Ok(TentativeOutcome::reported(None))
    } else {
        reporter.warning(&format!(
            "installer for {} exited with {:?}",
            package_name, result.exit_code
        ));
        Ok(TentativeOutcome::failed())
    }
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

    #[test]
    fn url_is_base_plus_package_name() {
        let tool = ToolSpec::quarto();
        let url = format!("{}/{}", tool.vendor_base_url, tool.vendor_package_name());
        assert!(url.starts_with("https://quarto.org/download/latest/quarto-"));
    }
}
