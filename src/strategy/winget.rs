//! Winget (Windows Package Manager) strategy.

use crate::error::Result;
use crate::report::Reporter;
use crate::shell::{command, platform};
use crate::tool::ToolSpec;

use super::TentativeOutcome;

pub fn available() -> bool {
    command::run_ok("winget", &["--version"])
}

pub fn install(tool: &ToolSpec, reporter: &mut dyn Reporter) -> Result<TentativeOutcome> {
    reporter.info("Refreshing winget sources");
    // Source update failures are harmless; the install still consults
    // whatever index is cached.
    let _ = command::run("winget", &["source", "update"]);

    let mut args = vec![
        "install",
        "--id",
        tool.winget_id.as_str(),
        "--silent",
        "--accept-package-agreements",
        "--accept-source-agreements",
        "--disable-interactivity",
    ];
    if platform::is_elevated() {
        args.extend(["--scope", "machine"]);
    }

    let result = command::run("winget", &args)?;
    if result.success {
        Ok(TentativeOutcome::reported(None))
    } else {
        reporter.warning(&format!(
            "winget install exited with {:?}",
            result.exit_code
        ));
        Ok(TentativeOutcome::failed())
    }
}
