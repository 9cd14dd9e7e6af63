//! Payload identification among extracted entries.

use crate::error::SyncError;

/// Finds the payload entry: the last name in scan order ending with
/// `suffix` (case-sensitive, literal). Returns the name with the suffix
/// stripped, path segments preserved.
///
/// When several entries match, the last one in scan order wins; since the
/// extractor reports names in archive order this tie-break is deterministic
/// for a given archive, and the shadowed candidates are logged. Zero
/// matches is fatal: the archive did not contain the expected payload type.
pub fn locate_payload(names: &[String], suffix: &str) -> Result<String, SyncError> {
    let matched: Vec<&String> = names.iter().filter(|n| n.ends_with(suffix)).collect();
    let winner = match matched.last() {
        Some(name) => name.as_str(),
        None => return Err(SyncError::PayloadNotFound(suffix.to_string())),
    };
    if matched.len() > 1 {
        tracing::warn!(
            "{} entries end with `{}`; using `{}`",
            matched.len(),
            suffix,
            winner
        );
    }
    Ok(winner[..winner.len() - suffix.len()].to_string())
}
