//! Scoop (user-scope package manager) strategy.
//!
//! Scoop is unusual among the managers here: if it is missing entirely we
//! can bootstrap it from its official install script, because it installs
//! into the user profile without elevation. Bootstrapping is itself
//! fallible, so every step degrades to a reported failure rather than an
//! error that would end the run.

use crate::error::Result;
use crate::report::Reporter;
use crate::shell::command;
use crate::tool::ToolSpec;

use super::TentativeOutcome;

const BOOTSTRAP_SCRIPT: &str =
    "Set-ExecutionPolicy -ExecutionPolicy RemoteSigned -Scope CurrentUser -Force; \
     Invoke-RestMethod -Uri https://get.scoop.sh | Invoke-Expression";

fn scoop_present() -> bool {
    command::run_ok("scoop", &["--version"])
}

/// Scoop itself, or the PowerShell needed to bootstrap it.
pub fn available() -> bool {
    if scoop_present() {
        return true;
    }
    cfg!(target_os = "windows") && command::run_ok("powershell", &["-NoProfile", "-Command", "$true"])
}

pub fn install(tool: &ToolSpec, reporter: &mut dyn Reporter) -> Result<TentativeOutcome> {
    if !scoop_present() {
        reporter.info("Scoop not found, bootstrapping from get.scoop.sh");
        let bootstrap = command::run_script(BOOTSTRAP_SCRIPT)?;
        if !bootstrap.success || !scoop_present() {
            reporter.warning("Scoop bootstrap did not produce a working scoop");
            return Ok(TentativeOutcome::failed());
        }
    }

    // Already present in fresh installs, and re-adding is a no-op.
    let _ = command::run("scoop", &["bucket", "add", "main"]);

    let result = command::run("scoop", &["install", tool.scoop_package.as_str()])?;
    if result.success {
        Ok(TentativeOutcome::reported(None))
    } else {
        reporter.warning(&format!("scoop install exited with {:?}", result.exit_code));
        Ok(TentativeOutcome::failed())
    }
}
