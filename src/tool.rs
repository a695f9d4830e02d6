//! Target tool descriptor.
//!
//! A [`ToolSpec`] names the tool being installed and carries everything the
//! strategies need to find it in each ecosystem: package ids, the GitHub
//! repository for release lookups, the vendor download base, and the
//! directories installers are known to drop binaries into.

use std::path::PathBuf;

use crate::shell::platform;

/// Describes one installable tool.
///
/// The production descriptor is [`ToolSpec::quarto`]; tests build their own
/// with paths pointing into scratch directories.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Display name, e.g. "Quarto".
    pub name: String,
    /// Binary invoked for verification, e.g. "quarto".
    pub binary: String,
    /// Arguments that make the binary print its version.
    pub version_args: Vec<String>,
    /// Winget package id.
    pub winget_id: String,
    /// Scoop package name (main bucket).
    pub scoop_package: String,
    /// Conda package name.
    pub conda_package: String,
    /// Conda channel the package lives in.
    pub conda_channel: String,
    /// Chocolatey package id.
    pub choco_id: String,
    /// GitHub repository for the release API, "owner/name".
    pub github_repo: String,
    /// Stable vendor download base URL (no trailing slash).
    pub vendor_base_url: String,
    /// Documentation URL shown when every strategy fails.
    pub docs_url: String,
}

impl ToolSpec {
    /// The Quarto CLI, the document renderer the reporting pipeline needs.
    pub fn quarto() -> Self {
        Self {
            name: "Quarto".into(),
            binary: "quarto".into(),
            version_args: vec!["--version".into()],
            winget_id: "Posit.Quarto".into(),
            scoop_package: "quarto".into(),
            conda_package: "quarto".into(),
            conda_channel: "conda-forge".into(),
            choco_id: "quarto".into(),
            github_repo: "quarto-dev/quarto-cli".into(),
            vendor_base_url: "https://quarto.org/download/latest".into(),
            docs_url: "https://quarto.org/docs/get-started/".into(),
        }
    }

    /// Directory used for portable (no-privilege) installs.
    pub fn portable_dir(&self) -> PathBuf {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("Programs").join(&self.binary)
    }

    /// Directories installers are known to place binaries in.
    ///
    /// Installers frequently drop binaries somewhere the process PATH
    /// inherited at startup does not cover; the path refresher appends
    /// whichever of these exist on disk so verification can find them.
    pub fn well_known_dirs(&self) -> Vec<PathBuf> {
        let mut dirs_out = Vec::new();

        if let Ok(program_files) = std::env::var("ProgramFiles") {
            dirs_out.push(PathBuf::from(program_files).join(&self.name).join("bin"));
        }
        if let Ok(program_data) = std::env::var("ProgramData") {
            dirs_out.push(PathBuf::from(program_data).join("chocolatey").join("bin"));
        }
        if let Some(home) = dirs::home_dir() {
            dirs_out.push(home.join("scoop").join("shims"));
            dirs_out.push(home.join(".local").join("bin"));
        }
        if let Some(local) = dirs::data_local_dir() {
            dirs_out.push(local.join("Programs").join(&self.name).join("bin"));
        }
        dirs_out.push(PathBuf::from("/opt").join(&self.binary).join("bin"));

        // Portable installs extract a versioned top-level directory.
        dirs_out.push(self.portable_dir().join("bin"));
        dirs_out.extend(portable_bin_dirs(&self.portable_dir()));

        dirs_out
    }

    /// Name of the architecture-specific vendor installer package.
    pub fn vendor_package_name(&self) -> String {
        let arch = platform::arch_token();
        if cfg!(target_os = "windows") {
            if arch == "arm64" {
                format!("{}-win-arm64.msi", self.binary)
            } else {
                format!("{}-win.msi", self.binary)
            }
        } else if cfg!(target_os = "macos") {
            format!("{}-macos.pkg", self.binary)
        } else {
            format!("{}-linux-{}.deb", self.binary, arch)
        }
    }

    /// Name of the self-contained portable archive for this host.
    pub fn portable_archive_name(&self) -> String {
        if cfg!(target_os = "windows") {
            format!("{}-win.zip", self.binary)
        } else if cfg!(target_os = "macos") {
            format!("{}-macos.tar.gz", self.binary)
        } else {
            format!("{}-linux-{}.tar.gz", self.binary, platform::arch_token())
        }
    }
}

/// Enumerate `<dir>/*/bin` for versioned portable layouts.
fn portable_bin_dirs(portable_root: &std::path::Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(portable_root) else {
        return Vec::new();
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path().join("bin"))
        .filter(|p| p.is_dir())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn quarto_spec_has_expected_ids() {
        let tool = ToolSpec::quarto();
        assert_eq!(tool.binary, "quarto");
        assert_eq!(tool.winget_id, "Posit.Quarto");
        assert_eq!(tool.github_repo, "quarto-dev/quarto-cli");
        assert!(tool.docs_url.starts_with("https://"));
    }

    #[test]
    fn vendor_package_name_is_arch_specific() {
        let tool = ToolSpec::quarto();
        let name = tool.vendor_package_name();
        assert!(name.starts_with("quarto"));
        if cfg!(target_os = "windows") {
            assert!(name.ends_with(".msi"));
        } else if cfg!(target_os = "linux") {
            assert!(name.ends_with(".deb"));
            assert!(name.contains(platform::arch_token()));
        }
    }

    #[test]
    fn portable_archive_name_matches_host_os() {
        let tool = ToolSpec::quarto();
        let name = tool.portable_archive_name();
        if cfg!(target_os = "windows") {
            assert_eq!(name, "quarto-win.zip");
        } else if cfg!(target_os = "macos") {
            assert_eq!(name, "quarto-macos.tar.gz");
        } else {
            assert!(name.ends_with(".tar.gz"));
            assert!(name.contains(platform::arch_token()));
        }
    }

    #[test]
    fn portable_bin_dirs_finds_versioned_layout() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("quarto-1.5.57").join("bin");
        fs::create_dir_all(&bin).unwrap();
        // A sibling without a bin directory must be ignored.
        fs::create_dir_all(temp.path().join("scratch")).unwrap();

        let found = portable_bin_dirs(temp.path());
        assert_eq!(found, vec![bin]);
    }

    #[test]
    fn portable_bin_dirs_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let found = portable_bin_dirs(&temp.path().join("absent"));
        assert!(found.is_empty());
    }

    #[test]
    fn well_known_dirs_includes_portable_bin() {
        let tool = ToolSpec::quarto();
        let portable_bin = tool.portable_dir().join("bin");
        assert!(tool.well_known_dirs().contains(&portable_bin));
    }
}
