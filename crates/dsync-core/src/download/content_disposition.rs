//! Content-Disposition filename extraction.

/// Extracts the filename from a raw `Content-Disposition` header value.
///
/// Takes the first `filename=` parameter's value up to the next `;`,
/// stripping surrounding single or double quotes. Returns `None` when no
/// usable token is present; callers fall back to a generated name.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    for param in header_value.split(';') {
        let param = param.trim();
        if let Some((name, value)) = param.split_once('=') {
            if name.trim().eq_ignore_ascii_case("filename") {
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}
