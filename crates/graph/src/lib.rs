//! citenet graph engine
//!
//! Builds citation networks around a set of seed papers:
//! - Record deduplication and field merging
//! - Citation edge synthesis from reference / citation lists
//! - Relevance ranking of cited and citing candidates
//! - Projection into visualization nodes and edges

pub mod citation;
pub mod request;

pub use citation::{
    GraphBuilder, GraphEdge, GraphNode, InclusionOption, NetworkResult, NetworkStats, PaperRecord,
};
pub use request::{read_request, AnalysisRequest, InputSource};
