//! Canonical paper identifiers
//!
//! A paper is keyed by its DOI when it has one, otherwise by the first
//! source identifier present. Keys are trimmed and lower-cased so the same
//! paper fetched from different sources lands on one registry entry.

use super::PaperRecord;

/// Normalize a raw identifier for comparison
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derive the canonical identifier of a record.
///
/// Priority: `doi`, `id`, `paperId`, `openalex_id`, `semantic_scholar_id`.
/// Blank candidates are skipped. Returns `None` when nothing resolves.
pub fn canonical_id(record: &PaperRecord) -> Option<String> {
    let candidates = [
        record.doi(),
        record.id.as_deref(),
        record.paper_id.as_deref(),
        record.openalex_id.as_deref(),
        record.semantic_scholar_id.as_deref(),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(normalize_id)
        .find(|id| !id.is_empty())
}

/// Identifiers a record may be referred to by elsewhere (`paperId`, `id`,
/// `doi`), normalized
pub fn alias_ids(record: &PaperRecord) -> impl Iterator<Item = String> + '_ {
    [record.paper_id.as_deref(), record.id.as_deref(), record.doi()]
        .into_iter()
        .flatten()
        .map(normalize_id)
        .filter(|id| !id.is_empty())
}
