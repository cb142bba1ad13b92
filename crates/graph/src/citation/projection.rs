//! Projection of registry papers into display-ready nodes and edges

use super::graph::CitationGraph;
use super::registry::PaperRegistry;
use super::roles::NodeRole;
use super::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A node of the visualized network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node-visible identifier (record `id`, else canonical key)
    pub id: String,

    /// Short label drawn on the node
    pub label: String,

    /// Multi-line hover text
    #[serde(rename = "title")]
    pub tooltip: String,

    #[serde(rename = "isSeed")]
    pub is_seed: bool,

    #[serde(rename = "type")]
    pub role: NodeRole,

    #[serde(rename = "citationsCount")]
    pub citation_count: u64,

    pub year: Option<i32>,

    #[serde(rename = "journal")]
    pub venue: Option<String>,

    pub color: String,
}

/// A directed "cites" edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Builds display nodes from merged records
#[derive(Debug, Clone)]
pub struct NodeProjector {
    label_max_chars: usize,
}

impl NodeProjector {
    pub fn new(label_max_chars: usize) -> Self {
        Self { label_max_chars }
    }

    /// Project one paper
    pub fn project(&self, node_id: &str, paper: &PaperRecord, role: NodeRole) -> GraphNode {
        GraphNode {
            id: node_id.to_string(),
            label: self.label(paper),
            tooltip: tooltip(paper),
            is_seed: role == NodeRole::Seed,
            role,
            citation_count: paper.citation_count(),
            year: paper.year,
            venue: paper.venue().map(str::to_string),
            color: role.color().to_string(),
        }
    }

    /// Title cut to the label width, "..." marking a cut
    fn label(&self, paper: &PaperRecord) -> String {
        let title = paper.title().unwrap_or("Untitled");
        if title.chars().count() <= self.label_max_chars {
            return title.to_string();
        }
        let mut label: String = title.chars().take(self.label_max_chars).collect();
        label.push_str("...");
        label
    }
}

impl Default for NodeProjector {
    fn default() -> Self {
        Self::new(25)
    }
}

fn tooltip(paper: &PaperRecord) -> String {
    let mut lines = vec![paper.title().unwrap_or("Paper").to_string()];

    let year_venue: Vec<String> = paper
        .year
        .map(|year| year.to_string())
        .into_iter()
        .chain(paper.venue().map(str::to_string))
        .collect();
    if !year_venue.is_empty() {
        lines.push(year_venue.join(" • "));
    }

    let citations = paper.citation_count();
    if citations > 0 {
        lines.push(format!("{} citations", citations));
    }

    let names: Vec<&str> = paper.author_names().take(2).collect();
    if !names.is_empty() {
        let mut authors = names.join(", ");
        if paper.authors.len() > 2 {
            authors.push_str(" et al.");
        }
        lines.push(authors);
    }

    lines.join("\n")
}

/// Node-visible identifier for each included paper.
///
/// A record's own `id` is used while it is unique among the included
/// papers; colliding ids fall back to the registry key. Registry keys are
/// unique, so the assignment is injective.
#[derive(Debug, Default, Clone)]
pub struct NodeIds {
    ids: HashMap<String, String>,
}

impl NodeIds {
    pub fn assign(registry: &PaperRegistry, included: &HashSet<&str>) -> Self {
        let mut ids: HashMap<String, String> = registry
            .iter()
            .filter(|(key, _)| included.contains(key))
            .map(|(key, _)| (key.to_string(), registry.node_id(key).to_string()))
            .collect();

        // A fallback key can itself collide with another record's id,
        // so repeat until stable
        loop {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for id in ids.values() {
                *counts.entry(id.as_str()).or_insert(0) += 1;
            }

            let colliding: Vec<String> = ids
                .iter()
                .filter(|(key, id)| key != id && counts.get(id.as_str()).copied().unwrap_or(0) > 1)
                .map(|(key, _)| key.clone())
                .collect();
            if colliding.is_empty() {
                break;
            }

            debug!(count = colliding.len(), "Record ids collide, using registry keys");
            for key in colliding {
                ids.insert(key.clone(), key);
            }
        }

        Self { ids }
    }

    /// Identifier for a registry key; the key itself when not assigned
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.ids.get(key).map(String::as_str).unwrap_or(key)
    }
}

/// Keep edges whose endpoints are both in `included`, mapped to
/// node-visible identifiers
pub fn filter_edges(
    graph: &CitationGraph,
    node_ids: &NodeIds,
    included: &HashSet<&str>,
) -> Vec<GraphEdge> {
    graph
        .edges()
        .iter()
        .filter(|edge| included.contains(edge.citing.as_str()) && included.contains(edge.cited.as_str()))
        .map(|edge| GraphEdge {
            from: node_ids.get(&edge.citing).to_string(),
            to: node_ids.get(&edge.cited).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> PaperRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_project_full_record() {
        let paper = record(json!({
            "doi": "10.1/a",
            "title": "Deep Residual Learning for Image Recognition",
            "year": 2016,
            "venue": "CVPR",
            "citationCount": 150000,
            "authors": [{"name": "Kaiming He"}, "Xiangyu Zhang", {"name": "Shaoqing Ren"}]
        }));

        let node = NodeProjector::default().project("10.1/a", &paper, NodeRole::Cited);

        assert_eq!(node.label, "Deep Residual Learning fo...");
        assert_eq!(
            node.tooltip,
            "Deep Residual Learning for Image Recognition\n2016 • CVPR\n150000 citations\nKaiming He, Xiangyu Zhang et al."
        );
        assert!(!node.is_seed);
        assert_eq!(node.color, NodeRole::Cited.color());
        assert_eq!(node.citation_count, 150000);
    }

    #[test]
    fn test_project_sparse_record() {
        let paper = PaperRecord::with_doi("10.1/a");
        let node = NodeProjector::default().project("10.1/a", &paper, NodeRole::Seed);

        assert_eq!(node.label, "Untitled");
        assert_eq!(node.tooltip, "Paper");
        assert!(node.is_seed);
        assert_eq!(node.year, None);
        assert_eq!(node.venue, None);
        assert_eq!(node.citation_count, 0);
    }

    #[test]
    fn test_tooltip_two_authors_without_et_al() {
        let paper = record(json!({
            "doi": "10.1/a",
            "title": "T",
            "venue": "Nature",
            "authors": ["A. One", "B. Two"]
        }));
        assert_eq!(tooltip(&paper), "T\nNature\nA. One, B. Two");
    }

    #[test]
    fn test_label_counts_characters() {
        let paper = record(json!({"doi": "10.1/a", "title": "Études sur la répartition"}));
        let node = NodeProjector::new(6).project("10.1/a", &paper, NodeRole::Citing);
        assert_eq!(node.label, "Études...");
    }

    #[test]
    fn test_node_serializes_display_field_names() {
        let paper = record(json!({"doi": "10.1/a", "title": "T", "venue": "V", "year": 2020}));
        let node = NodeProjector::default().project("10.1/a", &paper, NodeRole::Seed);
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["title"], "T\n2020 • V");
        assert_eq!(value["isSeed"], true);
        assert_eq!(value["type"], "seed");
        assert_eq!(value["journal"], "V");
        assert_eq!(value["citationsCount"], 0);
    }

    #[test]
    fn test_filter_edges_maps_to_node_ids() {
        let papers = vec![
            record(json!({"doi": "10.1/a", "id": "W1"})),
            record(json!({"doi": "10.1/b"})),
            record(json!({"doi": "10.1/c"})),
        ];
        let registry = PaperRegistry::from_records(&papers);
        let mut graph = CitationGraph::new();
        graph.add_edge("10.1/a", "10.1/b");
        graph.add_edge("10.1/b", "10.1/c");

        let included: HashSet<&str> = ["10.1/a", "10.1/b"].into_iter().collect();
        let node_ids = NodeIds::assign(&registry, &included);
        let edges = filter_edges(&graph, &node_ids, &included);

        assert_eq!(
            edges,
            vec![GraphEdge {
                from: "W1".into(),
                to: "10.1/b".into()
            }]
        );
    }

    #[test]
    fn test_colliding_record_ids_fall_back_to_keys() {
        let papers = vec![
            record(json!({"doi": "10.1/s", "id": "W1"})),
            record(json!({"doi": "10.1/r", "id": "W1"})),
            record(json!({"doi": "10.1/t", "id": "W2"})),
        ];
        let registry = PaperRegistry::from_records(&papers);
        let included: HashSet<&str> = ["10.1/s", "10.1/r", "10.1/t"].into_iter().collect();

        let node_ids = NodeIds::assign(&registry, &included);

        assert_eq!(node_ids.get("10.1/s"), "10.1/s");
        assert_eq!(node_ids.get("10.1/r"), "10.1/r");
        assert_eq!(node_ids.get("10.1/t"), "W2");
    }

    #[test]
    fn test_record_id_matching_another_key_falls_back() {
        // a's id equals b's key; falling back leaves a on its own key
        let papers = vec![
            record(json!({"doi": "10.1/a", "id": "10.1/b"})),
            record(json!({"doi": "10.1/b"})),
            record(json!({"doi": "10.1/c", "id": "10.1/a"})),
        ];
        let registry = PaperRegistry::from_records(&papers);
        let included: HashSet<&str> = ["10.1/a", "10.1/b", "10.1/c"].into_iter().collect();

        let node_ids = NodeIds::assign(&registry, &included);
        let assigned: HashSet<&str> = ["10.1/a", "10.1/b", "10.1/c"]
            .into_iter()
            .map(|key| node_ids.get(key))
            .collect();

        assert_eq!(assigned.len(), 3);
        assert_eq!(node_ids.get("10.1/b"), "10.1/b");
        assert_eq!(node_ids.get("10.1/c"), "10.1/c");
    }

    #[test]
    fn test_excluded_papers_do_not_force_fallback() {
        let papers = vec![
            record(json!({"doi": "10.1/a", "id": "W1"})),
            record(json!({"doi": "10.1/b", "id": "W1"})),
        ];
        let registry = PaperRegistry::from_records(&papers);
        let included: HashSet<&str> = ["10.1/a"].into_iter().collect();

        assert_eq!(NodeIds::assign(&registry, &included).get("10.1/a"), "W1");
    }
}
