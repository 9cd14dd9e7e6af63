//! HTTP HEAD / metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers without the body
//! and capture `Content-Length`, `Last-Modified`, and `ETag` for the
//! freshness decision.

mod parse;

use crate::error::SyncError;
use crate::metadata::RemoteMetadata;
use std::str;
use std::time::Duration;

/// Performs a HEAD request and returns the resource's identifying metadata.
///
/// Follows redirects; only the final status is judged. Header values are
/// returned verbatim as opaque tokens, absent headers as unset fields.
/// One network round trip, no local state mutated.
pub fn probe(url: &str) -> Result<RemoteMetadata, SyncError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(SyncError::Remote(code));
    }

    Ok(parse::parse_metadata(&headers))
}
