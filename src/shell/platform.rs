//! Host architecture and privilege detection.

/// Architecture token used in installer and asset names.
///
/// Distinguishes arm64 from the amd64 default; 32-bit x86 maps to "x86"
/// but no current strategy publishes assets for it.
pub fn arch_token() -> &'static str {
    match std::env::consts::ARCH {
        "aarch64" => "arm64",
        "x86" => "x86",
        _ => "amd64",
    }
}

/// Whether the process is running with administrative rights.
///
/// Winget installs machine-wide when elevated, per-user otherwise.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Whether the process is running with administrative rights.
#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    // `net session` requires an elevated token and fails cleanly without one.
    super::command::run_ok("net", &["session"])
}
