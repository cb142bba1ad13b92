//! Network analysis pipeline
//!
//! `GraphBuilder` holds configuration only. Every call to
//! [`GraphBuilder::analyze_network`] builds its own registry, role sets,
//! edge set and connection index and drops them when it returns, so one
//! builder can serve concurrent callers.

use super::graph::{CitationGraph, ConnectionIndex};
use super::projection::{filter_edges, NodeIds, NodeProjector};
use super::registry::PaperRegistry;
use super::roles::{CandidateRole, NodeRole, PaperRoles};
use super::scoring::{RelevanceScorer, ScoringConfig};
use super::{InclusionOption, NetworkResult, NetworkStats, PaperRecord};
use citenet_common::{metrics, AnalysisConfig};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// Builds ranked citation networks
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    scorer: RelevanceScorer,
    projector: NodeProjector,
}

impl GraphBuilder {
    /// Create a builder from analysis configuration
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            scorer: RelevanceScorer::new(ScoringConfig::from(config)),
            projector: NodeProjector::new(config.label_max_chars),
        }
    }

    /// Build the citation network for a set of seed papers.
    ///
    /// Records without a resolvable identifier are skipped; an input with
    /// no resolvable seeds yields an empty, well-formed result.
    pub fn analyze_network(
        &self,
        seed_papers: &[PaperRecord],
        references: &[PaperRecord],
        citations: &[PaperRecord],
        cited_option: InclusionOption,
        citing_option: InclusionOption,
    ) -> NetworkResult {
        let analysis_id = Uuid::now_v7();
        let span = info_span!(
            "analyze_network",
            %analysis_id,
            cited = %cited_option,
            citing = %citing_option,
            year = self.scorer.current_year(),
        );
        let _guard = span.enter();
        let started = Instant::now();

        // Deduplicate & merge
        let registry = PaperRegistry::from_records(
            seed_papers.iter().chain(references).chain(citations),
        );
        debug!(
            supplied = seed_papers.len() + references.len() + citations.len(),
            distinct = registry.len(),
            dropped = registry.dropped(),
            "Records deduplicated"
        );

        // Classify
        let roles = PaperRoles::classify(seed_papers, references, citations);
        debug!(
            seed = roles.seed.len(),
            cited = roles.cited.len(),
            citing = roles.citing.len(),
            "Roles classified"
        );

        // Relationships
        let graph = CitationGraph::synthesize(&registry, &roles, references, citations);
        let index = ConnectionIndex::build(&graph, &roles.seed);

        // Rank
        let top_cited = self.scorer.select(
            cited_option,
            roles.candidates(CandidateRole::Cited),
            &registry,
            CandidateRole::Cited,
            &index,
        );
        let top_citing = self.scorer.select(
            citing_option,
            roles.candidates(CandidateRole::Citing),
            &registry,
            CandidateRole::Citing,
            &index,
        );

        // Only the seeds when both sides are switched off
        let mut included: HashSet<&str> = roles.seed.iter().collect();
        if !(cited_option == InclusionOption::None && citing_option == InclusionOption::None) {
            included.extend(top_cited.iter().map(String::as_str));
            included.extend(top_citing.iter().map(String::as_str));
        }

        let cited_set: HashSet<&str> = top_cited.iter().map(String::as_str).collect();
        let citing_set: HashSet<&str> = top_citing.iter().map(String::as_str).collect();

        let node_ids = NodeIds::assign(&registry, &included);

        let mut nodes = Vec::with_capacity(included.len());
        let mut papers = Vec::with_capacity(included.len());
        for (key, paper) in registry.iter().filter(|(key, _)| included.contains(key)) {
            let role = if roles.seed.contains(key) {
                NodeRole::Seed
            } else if cited_set.contains(key) {
                NodeRole::Cited
            } else if citing_set.contains(key) {
                NodeRole::Citing
            } else {
                NodeRole::Other
            };

            nodes.push(self.projector.project(node_ids.get(key), paper, role));
            papers.push(paper.clone());
        }

        let edges = filter_edges(&graph, &node_ids, &included);

        let stats = NetworkStats {
            total_papers: nodes.len(),
            seed_papers: roles.seed.len(),
            cited_papers: top_cited.len(),
            citing_papers: top_citing.len(),
            total_edges: edges.len(),
        };

        let elapsed = started.elapsed().as_secs_f64();
        metrics::record_analysis(elapsed, stats.total_papers, stats.total_edges, registry.dropped());

        info!(
            total_papers = stats.total_papers,
            seed_papers = stats.seed_papers,
            cited_papers = stats.cited_papers,
            citing_papers = stats.citing_papers,
            total_edges = stats.total_edges,
            candidate_edges = graph.edge_count(),
            elapsed_ms = elapsed * 1000.0,
            "Citation network built"
        );

        NetworkResult {
            nodes,
            edges,
            stats,
            papers,
        }
    }
}
