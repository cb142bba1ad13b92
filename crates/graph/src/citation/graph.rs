//! Citation graph representation
//!
//! Edges are keyed by canonical identifier and synthesized from three
//! sources: seed → reference pairs, citing → seed pairs, and the reference
//! lists embedded in the records themselves.

use super::identifier::{alias_ids, canonical_id};
use super::registry::PaperRegistry;
use super::roles::{CandidateRole, PaperRoles, RoleSet};
use super::PaperRecord;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Edge in the citation graph: `citing` cites `cited`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CitationEdge {
    /// Citing paper key
    pub citing: String,

    /// Cited paper key
    pub cited: String,
}

/// In-memory citation graph with deduplicated, loop-free edges
#[derive(Debug, Default, Clone)]
pub struct CitationGraph {
    /// Edges in insertion order
    edges: Vec<CitationEdge>,

    /// Edge membership for O(1) duplicate detection
    seen: HashSet<(String, String)>,
}

impl CitationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize every edge implied by the inputs.
    ///
    /// Only registry members become endpoints.
    pub fn synthesize(
        registry: &PaperRegistry,
        roles: &PaperRoles,
        references: &[PaperRecord],
        citations: &[PaperRecord],
    ) -> Self {
        let mut graph = Self::new();

        let reference_ids: Vec<String> = references
            .iter()
            .filter_map(canonical_id)
            .filter(|id| registry.contains(id))
            .collect();

        // Seeds cite every supplied reference
        for seed in roles.seed.iter().filter(|id| registry.contains(id)) {
            for reference in &reference_ids {
                graph.add_edge(seed, reference);
            }
        }
        let from_references = graph.edge_count();

        // Every supplied citing paper cites the seeds
        for citing in citations.iter().filter_map(canonical_id) {
            if !registry.contains(&citing) {
                continue;
            }
            for seed in roles.seed.iter().filter(|id| registry.contains(id)) {
                graph.add_edge(&citing, seed);
            }
        }
        let from_citations = graph.edge_count() - from_references;

        // Reference lists embedded in the records
        let aliases = IdAliases::build(registry);
        for (key, paper) in registry.iter() {
            for reference in &paper.references {
                if let Some(target) = aliases.resolve(reference) {
                    graph.add_edge(key, target);
                }
            }
        }
        let from_embedded = graph.edge_count() - from_references - from_citations;

        debug!(
            from_references,
            from_citations,
            from_embedded,
            total = graph.edge_count(),
            "Citation edges synthesized"
        );

        graph
    }

    /// Add an edge to the graph.
    ///
    /// Self-loops and duplicate pairs are ignored; returns whether the edge
    /// was added.
    pub fn add_edge(&mut self, citing: &str, cited: &str) -> bool {
        if citing == cited {
            return false;
        }
        if !self.seen.insert((citing.to_string(), cited.to_string())) {
            return false;
        }

        self.edges.push(CitationEdge {
            citing: citing.to_string(),
            cited: cited.to_string(),
        });
        true
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[CitationEdge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, citing: &str, cited: &str) -> bool {
        self.seen.contains(&(citing.to_string(), cited.to_string()))
    }
}

/// Maps every known identifier variant of a registry member to its key.
///
/// Registry keys are inserted first so an alias of one paper can never
/// shadow the key of another.
#[derive(Debug, Default)]
pub struct IdAliases {
    map: HashMap<String, String>,
}

impl IdAliases {
    /// Build the table in one pass over the registry
    pub fn build(registry: &PaperRegistry) -> Self {
        let mut map: HashMap<String, String> = registry
            .iter()
            .map(|(key, _)| (key.to_string(), key.to_string()))
            .collect();

        for (key, paper) in registry.iter() {
            for alias in alias_ids(paper) {
                map.entry(alias).or_insert_with(|| key.to_string());
            }
        }

        Self { map }
    }

    /// Resolve a record (typically an embedded reference) to a registry key
    pub fn resolve(&self, record: &PaperRecord) -> Option<&str> {
        let id = canonical_id(record)?;
        self.get(&id)
    }

    /// Resolve a normalized identifier
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(String::as_str)
    }
}

/// Per-candidate count of direct links to seed papers
#[derive(Debug, Default, Clone)]
pub struct ConnectionIndex {
    /// Edges from a seed to the paper
    cited: HashMap<String, usize>,

    /// Edges from the paper to a seed
    citing: HashMap<String, usize>,
}

impl ConnectionIndex {
    /// Build the index in one pass over the edge set
    pub fn build(graph: &CitationGraph, seed: &RoleSet) -> Self {
        let mut index = Self::default();

        for edge in graph.edges() {
            if seed.contains(&edge.citing) {
                *index.cited.entry(edge.cited.clone()).or_insert(0) += 1;
            }
            if seed.contains(&edge.cited) {
                *index.citing.entry(edge.citing.clone()).or_insert(0) += 1;
            }
        }

        index
    }

    /// Number of seed connections for a candidate in the given role
    pub fn connections(&self, paper: &str, role: CandidateRole) -> usize {
        let counts = match role {
            CandidateRole::Cited => &self.cited,
            CandidateRole::Citing => &self.citing,
        };
        counts.get(paper).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> PaperRecord {
        serde_json::from_value(value).unwrap()
    }

    fn build(
        seeds: &[PaperRecord],
        references: &[PaperRecord],
        citations: &[PaperRecord],
    ) -> (PaperRegistry, PaperRoles, CitationGraph) {
        let registry =
            PaperRegistry::from_records(seeds.iter().chain(references).chain(citations));
        let roles = PaperRoles::classify(seeds, references, citations);
        let graph = CitationGraph::synthesize(&registry, &roles, references, citations);
        (registry, roles, graph)
    }

    #[test]
    fn test_graph_construction() {
        let mut graph = CitationGraph::new();

        // A cites B, B cites C
        assert!(graph.add_edge("a", "b"));
        assert!(graph.add_edge("b", "c"));

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge("a", "b"));
        assert!(graph.contains_edge("b", "c"));
        assert!(!graph.contains_edge("b", "a"));

        let order: Vec<(&str, &str)> = graph
            .edges()
            .iter()
            .map(|edge| (edge.citing.as_str(), edge.cited.as_str()))
            .collect();
        assert_eq!(order, vec![("a", "b"), ("b", "c")]);
    }

    #[test]
    fn test_duplicates_and_self_loops_rejected() {
        let mut graph = CitationGraph::new();

        assert!(graph.add_edge("a", "b"));
        assert!(!graph.add_edge("a", "b"));
        assert!(!graph.add_edge("a", "a"));
        assert!(graph.add_edge("b", "a"));

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge("b", "a"));
    }

    #[test]
    fn test_seed_and_citing_edges() {
        let seeds = vec![PaperRecord::with_doi("10.1/s1"), PaperRecord::with_doi("10.1/s2")];
        let references = vec![PaperRecord::with_doi("10.1/r")];
        let citations = vec![PaperRecord::with_doi("10.1/c")];

        let (_, _, graph) = build(&seeds, &references, &citations);

        assert!(graph.contains_edge("10.1/s1", "10.1/r"));
        assert!(graph.contains_edge("10.1/s2", "10.1/r"));
        assert!(graph.contains_edge("10.1/c", "10.1/s1"));
        assert!(graph.contains_edge("10.1/c", "10.1/s2"));
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_embedded_references_resolve_through_aliases() {
        let seeds = vec![record(json!({
            "doi": "10.1/s",
            "references": [{"paperId": "S2-R"}, {"doi": "10.1/unknown"}, {"doi": "10.1/S"}]
        }))];
        let references = vec![record(json!({"doi": "10.1/r", "paperId": "s2-r"}))];

        let (_, _, graph) = build(&seeds, &references, &[]);

        // seed -> r from the reference list and again from the embedded
        // list; the duplicate and the self-reference are dropped
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge("10.1/s", "10.1/r"));
    }

    #[test]
    fn test_embedded_references_link_non_seed_papers() {
        let seeds = vec![PaperRecord::with_doi("10.1/s")];
        let references = vec![
            record(json!({"doi": "10.1/r1", "references": [{"doi": "10.1/r2"}]})),
            PaperRecord::with_doi("10.1/r2"),
        ];

        let (_, _, graph) = build(&seeds, &references, &[]);

        assert!(graph.contains_edge("10.1/r1", "10.1/r2"));
    }

    #[test]
    fn test_alias_never_shadows_registry_key() {
        let papers = vec![
            record(json!({"doi": "10.1/a"})),
            record(json!({"doi": "10.1/b", "paperId": "10.1/A"})),
        ];
        let registry = PaperRegistry::from_records(&papers);
        let aliases = IdAliases::build(&registry);

        assert_eq!(aliases.get("10.1/a"), Some("10.1/a"));
        assert_eq!(aliases.get("10.1/b"), Some("10.1/b"));
    }

    #[test]
    fn test_connection_index() {
        let seeds = vec![PaperRecord::with_doi("10.1/s1"), PaperRecord::with_doi("10.1/s2")];
        let references = vec![PaperRecord::with_doi("10.1/r")];
        let citations = vec![PaperRecord::with_doi("10.1/c")];

        let (_, roles, graph) = build(&seeds, &references, &citations);
        let index = ConnectionIndex::build(&graph, &roles.seed);

        assert_eq!(index.connections("10.1/r", CandidateRole::Cited), 2);
        assert_eq!(index.connections("10.1/c", CandidateRole::Citing), 2);
        assert_eq!(index.connections("10.1/r", CandidateRole::Citing), 0);
        assert_eq!(index.connections("10.1/missing", CandidateRole::Cited), 0);
    }

    #[test]
    fn test_no_self_loops_when_seed_is_also_a_reference() {
        let seeds = vec![PaperRecord::with_doi("10.1/s")];
        let references = vec![PaperRecord::with_doi("10.1/s"), PaperRecord::with_doi("10.1/r")];
        let citations = vec![PaperRecord::with_doi("10.1/s")];

        let (_, _, graph) = build(&seeds, &references, &citations);

        assert!(graph.edges().iter().all(|edge| edge.citing != edge.cited));
        assert_eq!(graph.edge_count(), 1);
    }
}
