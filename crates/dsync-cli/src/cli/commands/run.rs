//! `dsync run` – the full probe/download/extract pipeline.

use anyhow::Result;
use dsync_core::config::SyncConfig;
use dsync_core::metadata::RemoteMetadata;
use dsync_core::sync::{self, SyncOutcome};
use std::fs;

/// Run one sync pass. The metadata of the last known-good fetch comes from
/// the environment; after a download the working directory's listing is
/// printed.
pub fn run_sync(cfg: &SyncConfig) -> Result<()> {
    let known = RemoteMetadata::from_env();
    match sync::run(cfg, &known)? {
        SyncOutcome::Fresh => {
            println!("Remote unchanged; nothing to do.");
        }
        SyncOutcome::Synced {
            archive,
            payload,
            files,
        } => {
            println!("Downloaded {}", archive.display());
            println!("Extracted {} file(s); payload `{}`", files.len(), payload);
            for entry in fs::read_dir(&cfg.work_dir)? {
                println!("{}", entry?.path().display());
            }
        }
    }
    Ok(())
}
