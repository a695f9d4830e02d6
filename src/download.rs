//! Network fetch capability.
//!
//! Installer packages can be hundreds of megabytes, so downloads go through
//! a resumable path first: a partial file left by an interrupted transfer is
//! continued with an HTTP Range request. Servers that ignore ranges get the
//! plain-GET fallback.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_RANGE, RANGE, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{InstallerError, Result};

const AGENT: &str = concat!("quartermaster/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared blocking client.
///
/// No overall timeout: large installer downloads legitimately take minutes.
/// The connect timeout still bounds unreachable hosts.
pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .connect_timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Fetch a JSON document.
pub fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let response = client
        .get(url)
        .header(USER_AGENT, AGENT)
        .send()?
        .error_for_status()
        .map_err(|e| InstallerError::DownloadFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    Ok(response.json()?)
}

/// Download `url` to `dest`, resuming a previous partial transfer if one
/// exists, falling back to a plain GET when resuming is not possible.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    match download_resumable(url, dest) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!("resumable download failed ({e}), retrying plain");
            download_plain(url, dest)
        }
    }
}

/// Range-continuation download via a `.part` sidecar file.
fn download_resumable(url: &str, dest: &Path) -> Result<()> {
    let part = dest.with_extension("part");
    let offset = fs::metadata(&part).map(|m| m.len()).unwrap_or(0);

    let client = client()?;
    let mut request = client.get(url).header(USER_AGENT, AGENT);
    if offset > 0 {
        request = request.header(RANGE, format!("bytes={}-", offset));
    }

    let mut response = request.send()?;
    let status = response.status();

    let mut file = if status == StatusCode::PARTIAL_CONTENT
        && response.headers().contains_key(CONTENT_RANGE)
    {
        OpenOptions::new().append(true).open(&part)?
    } else if status.is_success() {
        // Server ignored the range (or there was nothing to resume);
        // start over from byte zero.
        File::create(&part)?
    } else {
        return Err(InstallerError::DownloadFailed {
            url: url.to_string(),
            message: format!("HTTP {}", status),
        });
    };

    io::copy(&mut response, &mut file)?;
    file.flush()?;
    fs::rename(&part, dest)?;
    Ok(())
}

/// Single plain GET with no continuation.
fn download_plain(url: &str, dest: &Path) -> Result<()> {
    let client = client()?;
    let mut response = client
        .get(url)
        .header(USER_AGENT, AGENT)
        .send()?
        .error_for_status()
        .map_err(|e| InstallerError::DownloadFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let mut file = File::create(dest)?;
    io::copy(&mut response, &mut file)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn download_writes_body_to_dest() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/pkg.bin");
            then.status(200).body("installer-bytes");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("pkg.bin");
        download(&server.url("/pkg.bin"), &dest).unwrap();

        mock.assert();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "installer-bytes");
        assert!(!dest.with_extension("part").exists());
    }

    #[test]
    fn download_resumes_partial_file() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/pkg.bin")
                .header("range", "bytes=5-");
            then.status(206)
                .header("content-range", "bytes 5-14/15")
                .body("1234567890");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("pkg.bin");
        fs::write(dest.with_extension("part"), "ABCDE").unwrap();

        download(&server.url("/pkg.bin"), &dest).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "ABCDE1234567890");
    }

    #[test]
    fn download_restarts_when_server_ignores_range() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pkg.bin");
            then.status(200).body("full-body");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("pkg.bin");
        fs::write(dest.with_extension("part"), "stale").unwrap();

        download(&server.url("/pkg.bin"), &dest).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "full-body");
    }

    #[test]
    fn download_404_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.bin");
            then.status(404);
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("missing.bin");
        let err = download(&server.url("/missing.bin"), &dest);
        assert!(err.is_err());
    }

    #[test]
    fn fetch_json_deserializes() {
        #[derive(serde::Deserialize)]
        struct Payload {
            tag_name: String,
        }

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/release");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"tag_name":"v1.5.57"}"#);
        });

        let payload: Payload = fetch_json(&server.url("/release")).unwrap();
        assert_eq!(payload.tag_name, "v1.5.57");
    }
}
