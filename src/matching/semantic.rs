//! Semantic identifier normalization.
//!
//! Capability identifiers arrive in mixed shapes: full IRIs with fragments
//! (`http://vendor.com/caps#Heating`), path-style IRIs
//! (`http://vendor.com/caps/Heating`), or plain names. Matching compares
//! only the trailing segment.

use crate::model::CapabilityRecord;

/// Trailing path/fragment segment of an identifier.
///
/// Takes the text after the last `#`, then after the last `/`, trimmed on
/// both ends.
pub fn local_name(id: &str) -> &str {
    let mut tail = id.trim();
    if let Some((_, after)) = tail.rsplit_once('#') {
        tail = after;
    }
    if let Some((_, after)) = tail.rsplit_once('/') {
        tail = after;
    }
    tail.trim()
}

/// Whether a capability record satisfies a step's required capability
/// identifier.
///
/// The normalized requirement is compared against the record's normalized
/// semantic id, name, and generalized-by entries. An empty normalized
/// requirement never matches.
pub fn semantic_match(required: &str, record: &CapabilityRecord) -> bool {
    let req = local_name(required);
    if req.is_empty() {
        return false;
    }
    local_name(&record.semantic_id) == req
        || local_name(&record.name) == req
        || record.generalized_by.iter().any(|g| local_name(g) == req)
}
