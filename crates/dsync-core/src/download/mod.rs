//! Archive download: one full GET streamed to the working directory.
//!
//! The destination name is taken from the `Content-Disposition` response
//! header when present, otherwise a timestamped fallback name is generated.
//! Body bytes are written to disk as they arrive; progress is reported
//! whenever the cumulative byte count crosses a whole megabyte at a chunk
//! boundary.

mod content_disposition;
mod sink;

pub use content_disposition::parse_content_disposition_filename;

use crate::error::SyncError;
use sink::ArchiveSink;
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::str;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Prefix of the fallback archive name used when the server names no file.
const FALLBACK_PREFIX: &str = "dataset#7442@";

/// Fallback archive name embedding the given unix-millisecond timestamp.
pub(crate) fn fallback_archive_name(unix_millis: u128) -> String {
    format!("{}{}.zip", FALLBACK_PREFIX, unix_millis)
}

/// Downloads the archive at `url` into `work_dir` and returns its path.
///
/// Progress is logged once per downloaded megabyte. Non-success status fails
/// with [`SyncError::Remote`]; an I/O failure while the body is streaming
/// fails with [`SyncError::TransferIo`] and leaves the partially written
/// file in place for inspection.
pub fn fetch_archive(url: &str, work_dir: &Path) -> Result<PathBuf, SyncError> {
    let now_millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    fetch_archive_with(url, work_dir, fallback_archive_name(now_millis), |mib| {
        tracing::info!("downloaded {} MiB", mib);
    })
}

/// Like [`fetch_archive`], but with an explicit fallback name and progress
/// observer so callers (and tests) can substitute both.
pub fn fetch_archive_with<F: FnMut(u64)>(
    url: &str,
    work_dir: &Path,
    fallback_name: String,
    on_megabyte: F,
) -> Result<PathBuf, SyncError> {
    let sink = RefCell::new(ArchiveSink::new(work_dir, fallback_name, on_megabyte));
    let write_error: RefCell<Option<io::Error>> = RefCell::new(None);

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    // Abort when throughput drops below 1 KiB/s for 60s instead of capping
    // the total transfer time of large archives.
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    // Safety net so a completely stuck transfer eventually fails.
    easy.timeout(Duration::from_secs(3600))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                sink.borrow_mut().header_line(s);
            }
            true
        })?;
        transfer.write_function(|data| match sink.borrow_mut().write_chunk(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_error.borrow_mut().replace(e);
                // A short write makes curl abort the transfer with a write error.
                Ok(0)
            }
        })?;
        if let Err(e) = transfer.perform() {
            if e.is_write_error() {
                if let Some(io_err) = write_error.borrow_mut().take() {
                    return Err(SyncError::TransferIo(io_err));
                }
            }
            return Err(SyncError::Transfer(e));
        }
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(SyncError::Remote(code));
    }

    let sink = sink.into_inner();
    let bytes = sink.bytes_written();
    let path = sink.finish().map_err(SyncError::TransferIo)?;
    tracing::debug!("downloaded {} bytes to {}", bytes, path.display());
    Ok(path)
}
