//! Relevance scoring for candidate papers
//!
//! A heuristic ranking: citation count is the primary signal, direct links
//! to seed papers weigh heavily, and recency / journal venue add small
//! bonuses.

use super::graph::ConnectionIndex;
use super::registry::PaperRegistry;
use super::roles::{CandidateRole, RoleSet};
use super::{InclusionOption, PaperRecord};
use chrono::Datelike;
use citenet_common::AnalysisConfig;
use std::cmp::Ordering;

/// Scoring configuration
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Multiplier for the paper's citation count
    pub citation_weight: f64,

    /// Points per connection to a seed paper
    pub connection_weight: f64,

    /// Maximum age in years that earns the recency bonus
    pub recency_window_years: i32,

    pub recency_bonus: f64,

    pub journal_bonus: f64,

    /// Candidates kept per role for `InclusionOption::Top`
    pub top_limit: usize,

    /// Year used for recency; current UTC year when `None`
    pub reference_year: Option<i32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for ScoringConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            citation_weight: config.citation_weight,
            connection_weight: config.connection_weight,
            recency_window_years: config.recency_window_years,
            recency_bonus: config.recency_bonus,
            journal_bonus: config.journal_bonus,
            top_limit: config.top_limit,
            reference_year: config.reference_year,
        }
    }
}

/// A candidate with its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub key: String,
    pub score: f64,
}

/// Relevance scorer for cited and citing candidates
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    config: ScoringConfig,
    current_year: i32,
}

impl RelevanceScorer {
    /// Create a new scorer, fixing the year used for recency
    pub fn new(config: ScoringConfig) -> Self {
        let current_year = config
            .reference_year
            .unwrap_or_else(|| chrono::Utc::now().year());
        Self { config, current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Score one candidate
    pub fn score(
        &self,
        key: &str,
        paper: &PaperRecord,
        role: CandidateRole,
        index: &ConnectionIndex,
    ) -> f64 {
        let mut score = paper.citation_count() as f64 * self.config.citation_weight;

        score += index.connections(key, role) as f64 * self.config.connection_weight;

        // Out-of-range years earn nothing
        let recent = paper.year.map_or(false, |year| {
            self.current_year
                .checked_sub(year)
                .map_or(false, |age| age <= self.config.recency_window_years)
        });
        if recent {
            score += self.config.recency_bonus;
        }

        if paper
            .venue()
            .map_or(false, |venue| venue.to_lowercase().contains("journal"))
        {
            score += self.config.journal_bonus;
        }

        score
    }

    /// Score and rank candidates, highest first.
    ///
    /// The sort is stable, so equal scores keep candidate order.
    pub fn rank(
        &self,
        candidates: &RoleSet,
        registry: &PaperRegistry,
        role: CandidateRole,
        index: &ConnectionIndex,
        limit: usize,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .filter_map(|key| {
                registry.get(key).map(|paper| ScoredCandidate {
                    key: key.to_string(),
                    score: self.score(key, paper, role, index),
                })
            })
            .collect();

        // Sort by score descending
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        scored.truncate(limit);
        scored
    }

    /// Pick the candidates an inclusion option retains
    pub fn select(
        &self,
        option: InclusionOption,
        candidates: &RoleSet,
        registry: &PaperRegistry,
        role: CandidateRole,
        index: &ConnectionIndex,
    ) -> Vec<String> {
        match option {
            InclusionOption::None => Vec::new(),
            InclusionOption::All => candidates.iter().map(str::to_string).collect(),
            InclusionOption::Top => self
                .rank(candidates, registry, role, index, self.config.top_limit)
                .into_iter()
                .map(|candidate| candidate.key)
                .collect(),
        }
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
