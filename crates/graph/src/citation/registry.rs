//! Deduplicating paper registry
//!
//! One entry per canonical identifier, in first-insertion order. A record
//! whose key is already present is merged into the existing entry; merging
//! only ever fills gaps, it never clears a populated field.

use super::identifier::canonical_id;
use super::PaperRecord;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Registry of merged paper records keyed by canonical identifier
#[derive(Debug, Default, Clone)]
pub struct PaperRegistry {
    /// Entries in insertion order
    entries: Vec<(String, PaperRecord)>,

    /// Canonical identifier -> position in `entries`
    index: HashMap<String, usize>,

    /// Records skipped for lack of an identifier
    dropped: usize,
}

impl PaperRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from records in order
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PaperRecord>,
    {
        let mut registry = Self::new();
        for record in records {
            registry.insert(record.clone());
        }
        registry
    }

    /// Add a record, merging it into an existing entry with the same key.
    ///
    /// Returns the canonical identifier, or `None` if the record was dropped.
    pub fn insert(&mut self, record: PaperRecord) -> Option<String> {
        let Some(key) = canonical_id(&record) else {
            self.dropped += 1;
            trace!(title = ?record.title, "Dropping record without identifier");
            return None;
        };

        match self.index.get(&key) {
            Some(&pos) => merge_records(&mut self.entries[pos].1, record),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), record));
            }
        }

        Some(key)
    }

    /// Look up a merged record
    pub fn get(&self, key: &str) -> Option<&PaperRecord> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Check membership
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Preferred display identifier: the record's own `id` when present,
    /// else the registry key. `NodeIds` resolves collisions between these.
    pub fn node_id<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key)
            .and_then(|record| record.id.as_deref())
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(key)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PaperRecord)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Number of distinct papers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records dropped for lack of an identifier
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Merge `incoming` into `existing`, keeping every populated field of
/// `existing`.
///
/// `references` and `citations` are unioned by canonical identifier.
pub fn merge_records(existing: &mut PaperRecord, incoming: PaperRecord) {
    fill_text(&mut existing.doi, incoming.doi);
    fill_text(&mut existing.id, incoming.id);
    fill_text(&mut existing.paper_id, incoming.paper_id);
    fill_text(&mut existing.openalex_id, incoming.openalex_id);
    fill_text(&mut existing.semantic_scholar_id, incoming.semantic_scholar_id);
    fill_text(&mut existing.title, incoming.title);
    fill_text(&mut existing.venue, incoming.venue);

    if existing.year.map_or(true, |year| year == 0) && incoming.year.is_some() {
        existing.year = incoming.year;
    }
    if existing.citation_count.map_or(true, |count| count == 0) && incoming.citation_count.is_some() {
        existing.citation_count = incoming.citation_count;
    }

    if existing.authors.is_empty() {
        existing.authors = incoming.authors;
    }
    if existing.concepts.is_empty() {
        existing.concepts = incoming.concepts;
    }

    union_records(&mut existing.references, incoming.references);
    union_records(&mut existing.citations, incoming.citations);

    for (field, value) in incoming.extra {
        let keep = existing.extra.get(&field).map_or(false, |current| !is_empty_value(current));
        if !keep {
            existing.extra.insert(field, value);
        }
    }
}

fn fill_text(existing: &mut Option<String>, incoming: Option<String>) {
    let empty = existing.as_deref().map_or(true, |value| value.trim().is_empty());
    if empty && incoming.is_some() {
        *existing = incoming;
    }
}

/// Append records whose canonical identifier is not already listed.
///
/// An empty list adopts the incoming list as-is.
fn union_records(existing: &mut Vec<PaperRecord>, incoming: Vec<PaperRecord>) {
    if existing.is_empty() {
        *existing = incoming;
        return;
    }

    let mut seen: HashSet<String> = existing.iter().filter_map(canonical_id).collect();
    for record in incoming {
        if let Some(id) = canonical_id(&record) {
            if seen.insert(id) {
                existing.push(record);
            }
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
