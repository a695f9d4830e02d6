//! External command execution.

use crate::error::{InstallerError, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Stdout and stderr concatenated, stdout first.
    ///
    /// Version banners land on either stream depending on the tool, so
    /// callers matching output should look at both.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Execute a program directly with captured output.
///
/// Fails only if the process cannot be launched; a non-zero exit is
/// reported through [`CommandResult::success`].
pub fn run(program: &str, args: &[&str]) -> Result<CommandResult> {
    let start = Instant::now();

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|_| InstallerError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            code: None,
        })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

/// Execute a program and return whether it exited successfully.
///
/// Used for strategy preconditions: a launch failure means the underlying
/// manager is simply absent, not an error.
pub fn run_ok(program: &str, args: &[&str]) -> bool {
    run(program, args).map(|r| r.success).unwrap_or(false)
}

/// Execute a command line through the platform shell.
///
/// PowerShell on Windows (the scoop bootstrap needs it), `sh -c` elsewhere.
pub fn run_script(line: &str) -> Result<CommandResult> {
    if cfg!(target_os = "windows") {
        run(
            "powershell",
            &["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command", line],
        )
    } else {
        run("sh", &["-c", line])
    }
}
