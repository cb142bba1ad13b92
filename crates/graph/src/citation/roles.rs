//! Seed / cited / citing classification

use super::identifier::canonical_id;
use super::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Insertion-ordered set of canonical identifiers
#[derive(Debug, Default, Clone)]
pub struct RoleSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifier; returns false if it was already present
    pub fn insert(&mut self, id: String) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.insert(id.clone());
        self.order.push(id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl FromIterator<String> for RoleSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Role sets of one analysis.
///
/// `seed` never overlaps `cited` or `citing`; those two may overlap.
#[derive(Debug, Default, Clone)]
pub struct PaperRoles {
    pub seed: RoleSet,
    pub cited: RoleSet,
    pub citing: RoleSet,
}

impl PaperRoles {
    /// Classify the three input lists. Seeds are assigned first and never
    /// reclassified.
    pub fn classify(
        seed_papers: &[PaperRecord],
        references: &[PaperRecord],
        citations: &[PaperRecord],
    ) -> Self {
        let seed: RoleSet = seed_papers.iter().filter_map(canonical_id).collect();

        let cited = references
            .iter()
            .filter_map(canonical_id)
            .filter(|id| !seed.contains(id))
            .collect();

        let citing = citations
            .iter()
            .filter_map(canonical_id)
            .filter(|id| !seed.contains(id))
            .collect();

        Self { seed, cited, citing }
    }

    /// Candidate set for a role
    pub fn candidates(&self, role: CandidateRole) -> &RoleSet {
        match role {
            CandidateRole::Cited => &self.cited,
            CandidateRole::Citing => &self.citing,
        }
    }
}

/// The two candidate roles that are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRole {
    /// Referenced by a seed paper
    Cited,
    /// Citing a seed paper
    Citing,
}

/// Role tag attached to a projected node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Seed,
    Cited,
    Citing,
    Other,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Seed => "seed",
            NodeRole::Cited => "cited",
            NodeRole::Citing => "citing",
            NodeRole::Other => "other",
        }
    }

    /// Display color for the visualization layer
    pub fn color(&self) -> &'static str {
        match self {
            NodeRole::Seed => "#ff6b6b",
            NodeRole::Cited => "#4ecdc4",
            NodeRole::Citing => "#45b7d1",
            NodeRole::Other => "#96ceb4",
        }
    }
}
