//! `dsync probe` – print the remote's current metadata.

use anyhow::Result;
use dsync_core::config::SyncConfig;
use dsync_core::fetch_head;

/// HEAD-probe the configured URL and print the metadata as KEY=value lines,
/// ready to export before the next `dsync run`.
pub fn run_probe(cfg: &SyncConfig) -> Result<()> {
    let metadata = fetch_head::probe(&cfg.url)?;
    println!(
        "CONTENT_LENGTH={}",
        metadata.content_length.as_deref().unwrap_or("")
    );
    println!(
        "LAST_MODIFIED={}",
        metadata.last_modified.as_deref().unwrap_or("")
    );
    println!("ETAG={}", metadata.etag.as_deref().unwrap_or(""));
    Ok(())
}
