//! `dsync extract` – extract a local archive and locate the payload.

use anyhow::Result;
use dsync_core::config::SyncConfig;
use dsync_core::{extract, payload};
use std::path::Path;

pub fn run_extract(cfg: &SyncConfig, archive: &Path) -> Result<()> {
    let files = extract::extract_archive(archive, &cfg.work_dir, cfg.entry_encoding())?;
    let name = payload::locate_payload(&files, &cfg.payload_suffix)?;
    println!(
        "Extracted {} file(s) to {}",
        files.len(),
        cfg.work_dir.display()
    );
    println!("Payload `{}`", name);
    Ok(())
}
