//! GitHub release metadata client.
//!
//! Queries the upstream project's latest release and selects the asset
//! matching the host architecture. The API base is a parameter so tests can
//! point it at a local mock server.

use serde::Deserialize;

use crate::download;
use crate::error::{InstallerError, Result};

/// Production API base.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// A published release.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Release version with any leading `v` stripped.
    pub fn version(&self) -> &str {
        self.tag_name.trim_start_matches('v')
    }
}

/// One downloadable asset attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// Fetch the latest release for `repo` ("owner/name").
pub fn latest_release(api_base: &str, repo: &str) -> Result<Release> {
    let url = format!("{}/repos/{}/releases/latest", api_base, repo);
    let release: Release =
        download::fetch_json(&url).map_err(|e| InstallerError::ReleaseLookupFailed {
            repo: repo.to_string(),
            message: e.to_string(),
        })?;

    if release.assets.is_empty() {
        return Err(InstallerError::ReleaseLookupFailed {
            repo: repo.to_string(),
            message: "release has no assets".to_string(),
        });
    }
    Ok(release)
}

/// Pick the asset for this architecture and package suffix.
///
/// Prefers an exact architecture match in the asset name; falls back to the
/// first asset with the right suffix, since upstream omits the architecture
/// token from its default-architecture packages.
pub fn select_asset<'a>(
    assets: &'a [ReleaseAsset],
    arch: &str,
    suffix: &str,
) -> Option<&'a ReleaseAsset> {
    assets
        .iter()
        .find(|a| a.name.contains(arch) && a.name.ends_with(suffix))
        .or_else(|| assets.iter().find(|a| a.name.ends_with(suffix)))
}
