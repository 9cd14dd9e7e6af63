//! Remote resource metadata and the freshness decision.

use std::env;

/// Identifying metadata of the remote archive, as reported by the server.
///
/// The three fields are opaque header values compared verbatim; no parsing
/// or normalization is applied. A field is `None` when the server (or the
/// environment) did not supply the corresponding value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMetadata {
    /// `Content-Length` header value.
    pub content_length: Option<String>,
    /// `Last-Modified` header value.
    pub last_modified: Option<String>,
    /// `ETag` header value.
    pub etag: Option<String>,
}

impl RemoteMetadata {
    /// Snapshot of the last known-good fetch, supplied through the
    /// `CONTENT_LENGTH`, `LAST_MODIFIED`, and `ETAG` environment variables.
    pub fn from_env() -> Self {
        Self {
            content_length: env::var("CONTENT_LENGTH").ok(),
            last_modified: env::var("LAST_MODIFIED").ok(),
            etag: env::var("ETAG").ok(),
        }
    }
}

/// Returns true only if every field is present on both sides and pairwise
/// equal.
///
/// An unset field never matches, not even against another unset field:
/// unknown state cannot confirm freshness, so the caller must download.
pub fn is_fresh(known: &RemoteMetadata, observed: &RemoteMetadata) -> bool {
    field_matches(&known.content_length, &observed.content_length)
        && field_matches(&known.last_modified, &observed.last_modified)
        && field_matches(&known.etag, &observed.etag)
}

fn field_matches(known: &Option<String>, observed: &Option<String>) -> bool {
    matches!((known, observed), (Some(a), Some(b)) if a == b)
}
