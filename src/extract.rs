//! Archive extraction for portable installs.
//!
//! The portable archive format varies by host: zip on Windows, gzip-compressed
//! tar elsewhere. [`extract_archive`] dispatches on the file name.

use std::fs;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{InstallerError, Result};

/// Unpack `archive_path` into `dest`, picking the format from the file name.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let name = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if name.ends_with(".zip") {
        extract_zip(archive_path, dest)
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        extract_tar_gz(archive_path, dest)
    } else {
        Err(InstallerError::ExtractionFailed {
            archive: archive_path.to_path_buf(),
            message: "unsupported archive format".to_string(),
        })
    }
}

/// Unpack a gzip-compressed tar archive into `dest`, creating it first.
pub fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    let file = fs::File::open(archive_path)?;
    let decompressor = GzDecoder::new(file);
    let mut archive = Archive::new(decompressor);

    archive
        .unpack(dest)
        .map_err(|e| InstallerError::ExtractionFailed {
            archive: archive_path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(())
}

/// Unpack a zip archive into `dest`, creating it first.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    let file = fs::File::open(archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| InstallerError::ExtractionFailed {
            archive: archive_path.to_path_buf(),
            message: e.to_string(),
        })?;

    archive
        .extract(dest)
        .map_err(|e| InstallerError::ExtractionFailed {
            archive: archive_path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    fn make_tar_gz(dir: &Path, entry: &str, contents: &[u8]) -> std::path::PathBuf {
        let archive_path = dir.join("fixture.tar.gz");
        let file = fs::File::create(&archive_path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, entry, contents).unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        archive_path
    }

    fn make_zip(dir: &Path, entry: &str, contents: &[u8]) -> std::path::PathBuf {
        let archive_path = dir.join("fixture.zip");
        let file = fs::File::create(&archive_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);

        writer
            .start_file(entry, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents).unwrap();
        writer.finish().unwrap();

        archive_path
    }

    #[test]
    fn extracts_tar_gz_entries_into_dest() {
        let temp = TempDir::new().unwrap();
        let archive = make_tar_gz(temp.path(), "quarto-1.5.57/bin/quarto", b"#!/bin/sh\n");

        let dest = temp.path().join("out");
        extract_archive(&archive, &dest).unwrap();

        let extracted = dest.join("quarto-1.5.57").join("bin").join("quarto");
        assert_eq!(fs::read(extracted).unwrap(), b"#!/bin/sh\n");
    }

    #[test]
    fn extracts_zip_entries_into_dest() {
        let temp = TempDir::new().unwrap();
        let archive = make_zip(temp.path(), "quarto-1.5.57/bin/quarto.exe", b"MZbinary");

        let dest = temp.path().join("out");
        extract_archive(&archive, &dest).unwrap();

        let extracted = dest.join("quarto-1.5.57").join("bin").join("quarto.exe");
        assert_eq!(fs::read(extracted).unwrap(), b"MZbinary");
    }

    #[test]
    fn creates_missing_dest_directory() {
        let temp = TempDir::new().unwrap();
        let archive = make_tar_gz(temp.path(), "file.txt", b"data");

        let dest = temp.path().join("deeply").join("nested");
        extract_archive(&archive, &dest).unwrap();
        assert!(dest.join("file.txt").exists());
    }

    #[test]
    fn corrupt_archive_is_error() {
        let temp = TempDir::new().unwrap();
        let bogus = temp.path().join("bogus.tar.gz");
        fs::write(&bogus, b"not a gzip stream").unwrap();

        let result = extract_archive(&bogus, &temp.path().join("out"));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_extension_is_error() {
        let temp = TempDir::new().unwrap();
        let odd = temp.path().join("payload.rar");
        fs::write(&odd, b"whatever").unwrap();

        let result = extract_archive(&odd, &temp.path().join("out"));
        assert!(matches!(
            result,
            Err(InstallerError::ExtractionFailed { .. })
        ));
    }
}
