//! Error taxonomy for a sync run.

use std::io;
use thiserror::Error;

/// Errors surfaced by a sync run.
///
/// Nothing is retried: the first failure aborts the run. Partial downloads
/// and partial extractions are left on disk so callers can inspect them.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Non-success status from the metadata probe or the download.
    #[error("remote returned HTTP {0}")]
    Remote(u32),

    /// Network-side failure issuing a request or reading the body.
    #[error("transfer failed: {0}")]
    Transfer(#[from] curl::Error),

    /// Disk-side failure while streaming the response body.
    #[error("could not write downloaded bytes: {0}")]
    TransferIo(#[source] io::Error),

    /// The archive could not be opened or an entry could not be read.
    #[error("could not read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An entry name did not decode cleanly in the configured encoding.
    #[error("entry name is not valid {encoding}: {name:?}")]
    EntryName {
        encoding: &'static str,
        name: Vec<u8>,
    },

    /// An extracted entry could not be written to the destination.
    #[error("could not write entry `{name}`: {source}")]
    Extraction {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The archive contained no entry with the expected payload suffix.
    #[error("no `{0}` entry found in the archive")]
    PayloadNotFound(String),
}
