//! Paper record model
//!
//! Records arrive from several bibliographic sources with inconsistent
//! shapes. Every recognized attribute gets an explicit field decoded
//! leniently: a value of the wrong type decodes as absent instead of
//! rejecting the whole record. Unrecognized attributes are kept in `extra`
//! and serialized back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bibliographic record for one paper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Digital Object Identifier (preferred canonical identifier)
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    /// Source-specific identifier, also used as the node-visible id
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Semantic Scholar paper id
    #[serde(
        rename = "paperId",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub paper_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub openalex_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub semantic_scholar_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::authors", skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,

    /// Publication year
    #[serde(default, deserialize_with = "lenient::year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    /// Number of papers citing this one, as reported by the source
    #[serde(
        rename = "citationCount",
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub citation_count: Option<u64>,

    /// Topic concepts; kept opaque
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub concepts: Vec<Value>,

    /// Embedded reference list (papers this one cites)
    #[serde(default, deserialize_with = "lenient::records", skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<PaperRecord>,

    /// Embedded citation list (papers citing this one)
    #[serde(default, deserialize_with = "lenient::records", skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<PaperRecord>,

    /// Unrecognized attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaperRecord {
    /// Create a record carrying only a DOI
    pub fn with_doi(doi: impl Into<String>) -> Self {
        Self {
            doi: Some(doi.into()),
            ..Default::default()
        }
    }

    /// DOI of the record, also honouring the upper-case `DOI` key some
    /// sources emit
    pub fn doi(&self) -> Option<&str> {
        self.doi
            .as_deref()
            .filter(|doi| !doi.trim().is_empty())
            .or_else(|| self.extra.get("DOI").and_then(Value::as_str))
    }

    /// Citation count, zero when missing or malformed
    pub fn citation_count(&self) -> u64 {
        self.citation_count.unwrap_or(0)
    }

    /// Title, if present and not blank
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// Venue, if present and not blank
    pub fn venue(&self) -> Option<&str> {
        non_blank(self.venue.as_deref())
    }

    /// Author names in order, skipping entries without a name
    pub fn author_names(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().filter_map(Author::name)
    }
}

/// An author entry: either a bare name or a structured object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Detailed(AuthorDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorDetails {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Author {
    /// Display name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Author::Name(name) => non_blank(Some(name)),
            Author::Detailed(details) => non_blank(details.name.as_deref()),
        }
    }
}

impl From<&str> for Author {
    fn from(name: &str) -> Self {
        Author::Name(name.to_string())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Field decoders that map wrongly-typed values to "absent"
mod lenient {
    use super::{Author, PaperRecord};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.floor() as u64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            _ => Vec::new(),
        })
    }

    pub fn authors<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Author>, D::Error> {
        Ok(list(deserializer)?
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    pub fn records<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<PaperRecord>, D::Error> {
        Ok(list(deserializer)?
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_record() {
        let record: PaperRecord = serde_json::from_value(json!({
            "doi": "10.1000/XYZ",
            "paperId": "abc123",
            "title": "Attention Is All You Need",
            "authors": [{"name": "Ashish Vaswani", "authorId": "1"}, "Noam Shazeer"],
            "year": 2017,
            "venue": "NeurIPS",
            "citationCount": 90000,
            "references": [{"doi": "10.1/r1"}],
            "fieldsOfStudy": ["Computer Science"]
        }))
        .unwrap();

        assert_eq!(record.doi(), Some("10.1000/XYZ"));
        assert_eq!(record.paper_id.as_deref(), Some("abc123"));
        assert_eq!(record.year, Some(2017));
        assert_eq!(record.citation_count(), 90000);
        assert_eq!(record.references.len(), 1);
        assert_eq!(
            record.author_names().collect::<Vec<_>>(),
            vec!["Ashish Vaswani", "Noam Shazeer"]
        );
        assert!(record.extra.contains_key("fieldsOfStudy"));
    }

    #[test]
    fn test_malformed_fields_decode_as_absent() {
        let record: PaperRecord = serde_json::from_value(json!({
            "doi": "10.1/a",
            "year": "unknown",
            "citationCount": "many",
            "authors": "Anonymous",
            "references": {"not": "a list"},
            "venue": null
        }))
        .unwrap();

        assert_eq!(record.year, None);
        assert_eq!(record.citation_count(), 0);
        assert!(record.authors.is_empty());
        assert!(record.references.is_empty());
        assert_eq!(record.venue(), None);
    }

    #[test]
    fn test_numeric_strings_and_numbers() {
        let record: PaperRecord = serde_json::from_value(json!({
            "id": 42,
            "year": " 2019 ",
            "citationCount": 12.7
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("42"));
        assert_eq!(record.year, Some(2019));
        assert_eq!(record.citation_count(), 12);
    }

    #[test]
    fn test_upper_case_doi_key() {
        let record: PaperRecord = serde_json::from_value(json!({"DOI": "10.5/UP"})).unwrap();
        assert_eq!(record.doi, None);
        assert_eq!(record.doi(), Some("10.5/UP"));
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        assert!(serde_json::from_value::<PaperRecord>(json!("10.1/a")).is_err());
    }

    #[test]
    fn test_invalid_embedded_entries_are_skipped() {
        let record: PaperRecord = serde_json::from_value(json!({
            "doi": "10.1/a",
            "references": [{"doi": "10.1/b"}, "junk", 7, {"paperId": "p"}]
        }))
        .unwrap();
        assert_eq!(record.references.len(), 2);
    }

    #[test]
    fn test_serialize_keeps_source_field_names() {
        let mut record = PaperRecord::with_doi("10.1/a");
        record.paper_id = Some("p1".into());
        record.citation_count = Some(3);
        record.extra.insert("url".into(), json!("https://example.org"));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["paperId"], "p1");
        assert_eq!(value["citationCount"], 3);
        assert_eq!(value["url"], "https://example.org");
        assert!(value.get("title").is_none());
    }
}
