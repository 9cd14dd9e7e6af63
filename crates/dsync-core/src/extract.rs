//! Archive extraction with legacy entry-name decoding.
//!
//! Entry names in the upstream dataset are written by tooling that predates
//! the zip format's UTF-8 flag: the bytes are Big5, and decoding them as
//! cp437 or UTF-8 corrupts every non-ASCII name silently. The encoding is
//! therefore an explicit parameter, fixed to Big5 in production.

use crate::error::SyncError;
use encoding_rs::Encoding;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};

/// Extracts every entry of the zip archive at `archive` into `destination`,
/// decoding entry names with `encoding`. Pre-existing files are replaced.
///
/// Entries are not trusted to carry reliable directory markers: every entry
/// is written as a file at `destination/<name>`, with the directories
/// implied by the name's path segments created first. Entries whose name
/// ends in `/` are materialized as directories. Returns the decoded names
/// written as files, in archive order.
///
/// Any decode or I/O failure aborts the extraction; entries already written
/// stay on disk.
pub fn extract_archive(
    archive: &Path,
    destination: &Path,
    encoding: &'static Encoding,
) -> Result<Vec<String>, SyncError> {
    let file = File::open(archive).map_err(|e| SyncError::Extraction {
        name: archive.display().to_string(),
        source: e,
    })?;
    let mut zip = zip::ZipArchive::new(file)?;

    let mut extracted = Vec::new();
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let name = decode_entry_name(entry.name_raw(), encoding)?;
        ensure_relative(&name)?;

        if name.ends_with('/') {
            fs::create_dir_all(destination.join(&name)).map_err(|e| SyncError::Extraction {
                name: name.clone(),
                source: e,
            })?;
            continue;
        }

        let target = destination.join(&name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| SyncError::Extraction {
                name: name.clone(),
                source: e,
            })?;
        }
        let mut out = File::create(&target).map_err(|e| SyncError::Extraction {
            name: name.clone(),
            source: e,
        })?;
        io::copy(&mut entry, &mut out).map_err(|e| SyncError::Extraction {
            name: name.clone(),
            source: e,
        })?;
        extracted.push(name);
    }

    Ok(extracted)
}

fn decode_entry_name(raw: &[u8], encoding: &'static Encoding) -> Result<String, SyncError> {
    let (decoded, had_errors) = encoding.decode_without_bom_handling(raw);
    if had_errors {
        return Err(SyncError::EntryName {
            encoding: encoding.name(),
            name: raw.to_vec(),
        });
    }
    Ok(decoded.into_owned())
}

/// Rejects entry names that would land outside the destination directory.
fn ensure_relative(name: &str) -> Result<(), SyncError> {
    let escapes = Path::new(name)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(SyncError::Extraction {
            name: name.to_string(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "entry path escapes the destination",
            ),
        });
    }
    Ok(())
}
