//! Parse HTTP response header lines into RemoteMetadata.

use crate::metadata::RemoteMetadata;

/// Parse collected header lines into RemoteMetadata.
///
/// With redirects in play the lines span several responses; the last
/// occurrence of a header wins, which is the final response's value.
/// Values are kept verbatim (ETags keep their quotes) so they compare
/// one-to-one against a snapshot taken from the same server.
pub(crate) fn parse_metadata(lines: &[String]) -> RemoteMetadata {
    let mut content_length = None;
    let mut last_modified = None;
    let mut etag = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("last-modified") {
                last_modified = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("etag") {
                etag = Some(value.to_string());
            }
        }
    }

    RemoteMetadata {
        content_length,
        last_modified,
        etag,
    }
}
