//! Conda-family strategy.
//!
//! Installs from the community channel through whichever conda-compatible
//! binary is present, preferring mamba's speed when conda itself is absent.

use crate::error::Result;
use crate::report::Reporter;
use crate::shell::command;
use crate::tool::ToolSpec;

use super::TentativeOutcome;

const CANDIDATES: [&str; 3] = ["conda", "mamba", "micromamba"];

fn pick_binary() -> Option<&'static str> {
    CANDIDATES
        .into_iter()
        .find(|binary| command::run_ok(binary, &["--version"]))
}

pub fn available() -> bool {
    pick_binary().is_some()
}

pub fn install(tool: &ToolSpec, reporter: &mut dyn Reporter) -> Result<TentativeOutcome> {
    let Some(binary) = pick_binary() else {
        // Precondition raced against an environment change; treat as a
        // plain failed attempt.
        return Ok(TentativeOutcome::failed());
    };

    reporter.info(&format!(
        "Installing {} from {} via {}",
        tool.conda_package, tool.conda_channel, binary
    ));

    let result = command::run(
        binary,
        &[
            "install",
            "-y",
            "-c",
            tool.conda_channel.as_str(),
            tool.conda_package.as_str(),
        ],
    )?;

    if result.success {
        Ok(TentativeOutcome::reported(None))
    } else {
        reporter.warning(&format!(
            "{} install exited with {:?}",
            binary, result.exit_code
        ));
        Ok(TentativeOutcome::failed())
    }
}
