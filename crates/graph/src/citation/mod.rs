//! Citation network construction
//!
//! Turns seed papers, their references, and their citing papers into a
//! deduplicated, ranked citation graph ready for visualization.

mod builder;
mod graph;
mod identifier;
mod projection;
mod record;
mod registry;
mod roles;
mod scoring;

pub use builder::GraphBuilder;
pub use graph::{CitationEdge, CitationGraph, ConnectionIndex, IdAliases};
pub use identifier::{canonical_id, normalize_id};
pub use projection::{GraphEdge, GraphNode, NodeIds, NodeProjector};
pub use record::{Author, AuthorDetails, PaperRecord};
pub use registry::{merge_records, PaperRegistry};
pub use roles::{CandidateRole, NodeRole, PaperRoles, RoleSet};
pub use scoring::{RelevanceScorer, ScoredCandidate, ScoringConfig};

use citenet_common::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many candidates of one role the final graph keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InclusionOption {
    /// Keep none
    None,
    /// Keep the highest-scoring candidates
    #[default]
    Top,
    /// Keep every candidate
    All,
}

impl InclusionOption {
    /// Map a caller's numeric cap to an option: 0 disables the role, 1000
    /// or more keeps everything, anything between ranks
    pub fn from_limit(max: usize) -> Self {
        match max {
            0 => InclusionOption::None,
            n if n >= 1000 => InclusionOption::All,
            _ => InclusionOption::Top,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InclusionOption::None => "none",
            InclusionOption::Top => "top",
            InclusionOption::All => "all",
        }
    }
}

impl FromStr for InclusionOption {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(InclusionOption::None),
            "top" => Ok(InclusionOption::Top),
            "all" => Ok(InclusionOption::All),
            other => Err(AppError::InvalidFormat {
                message: format!("unknown inclusion option '{}', expected none, top or all", other),
            }),
        }
    }
}

impl fmt::Display for InclusionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts describing a projected network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    /// Papers in the final graph
    pub total_papers: usize,

    /// Distinct seed papers
    pub seed_papers: usize,

    /// Selected cited papers
    pub cited_papers: usize,

    /// Selected citing papers
    pub citing_papers: usize,

    /// Edges in the final graph
    pub total_edges: usize,
}

/// Result of one network analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkResult {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub stats: NetworkStats,

    /// Merged records of the included papers
    pub papers: Vec<PaperRecord>,
}

impl NetworkResult {
    /// Whether any seed paper resolved
    pub fn has_seeds(&self) -> bool {
        self.stats.seed_papers > 0
    }
}
