//! Orchestration of one sync run.

use crate::checksum;
use crate::config::SyncConfig;
use crate::download;
use crate::error::SyncError;
use crate::extract;
use crate::fetch_head;
use crate::metadata::{self, RemoteMetadata};
use crate::payload;
use std::path::PathBuf;

/// Outcome of one sync run.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The known metadata matched the remote; nothing was downloaded.
    Fresh,
    /// The archive was downloaded and extracted.
    Synced {
        /// Path of the downloaded archive.
        archive: PathBuf,
        /// Base name of the payload entry, suffix stripped.
        payload: String,
        /// Decoded names of the extracted files, in archive order.
        files: Vec<String>,
    },
}

/// Runs the pipeline: probe, freshness check, then download, extraction and
/// payload lookup when stale.
///
/// `known` is the metadata of the last known-good fetch, typically
/// [`RemoteMetadata::from_env`]. The run is all-or-nothing: the first error
/// propagates and nothing is retried or cleaned up.
pub fn run(config: &SyncConfig, known: &RemoteMetadata) -> Result<SyncOutcome, SyncError> {
    let observed = fetch_head::probe(&config.url)?;
    tracing::debug!("remote metadata: {:?}", observed);

    if metadata::is_fresh(known, &observed) {
        tracing::info!("remote unchanged; skipping download");
        return Ok(SyncOutcome::Fresh);
    }

    let archive = download::fetch_archive(&config.url, &config.work_dir)?;
    match checksum::sha256_path(&archive) {
        Ok(digest) => tracing::info!("archive sha256 {}", digest),
        Err(err) => tracing::warn!("could not checksum {}: {:#}", archive.display(), err),
    }

    let files = extract::extract_archive(&archive, &config.work_dir, config.entry_encoding())?;
    tracing::info!(
        "extracted {} file(s) to {}",
        files.len(),
        config.work_dir.display()
    );

    let payload = payload::locate_payload(&files, &config.payload_suffix)?;
    tracing::info!("payload `{}`", payload);

    Ok(SyncOutcome::Synced {
        archive,
        payload,
        files,
    })
}
