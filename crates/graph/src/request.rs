//! Analysis request input
//!
//! A request is one JSON document carrying the seed papers, their
//! references and citing papers, plus the inclusion options.

use crate::citation::{GraphBuilder, InclusionOption, NetworkResult, PaperRecord};
use citenet_common::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Input document for one network analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    #[serde(alias = "seedPapers")]
    pub seed_papers: Vec<PaperRecord>,
    pub references: Vec<PaperRecord>,
    pub citations: Vec<PaperRecord>,

    /// Cited-paper inclusion, "top" when absent
    pub cited: InclusionOption,

    /// Citing-paper inclusion, "top" when absent
    pub citing: InclusionOption,
}

impl AnalysisRequest {
    /// Parse a request document
    pub fn from_json(input: &str) -> Result<Self> {
        let request: AnalysisRequest = serde_json::from_str(input)?;
        Ok(request)
    }

    /// Replace the inclusion options where overrides are given
    pub fn with_options(mut self, cited: Option<InclusionOption>, citing: Option<InclusionOption>) -> Self {
        if let Some(cited) = cited {
            self.cited = cited;
        }
        if let Some(citing) = citing {
            self.citing = citing;
        }
        self
    }

    /// Run the request through a builder
    pub fn run(&self, builder: &GraphBuilder) -> NetworkResult {
        builder.analyze_network(
            &self.seed_papers,
            &self.references,
            &self.citations,
            self.cited,
            self.citing,
        )
    }
}

/// Where a request document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// "-" or no path means stdin
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }
}

/// Read and parse a request document
pub async fn read_request(source: &InputSource) -> Result<AnalysisRequest> {
    let raw = match source {
        InputSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Validation {
                message: format!("cannot read {}: {}", path.display(), e),
                field: Some("input".to_string()),
            }
        })?,
        InputSource::Stdin => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            raw
        }
    };

    if raw.trim().is_empty() {
        return Err(AppError::InvalidFormat {
            message: "empty request document".to_string(),
        });
    }

    debug!(bytes = raw.len(), "Request document read");
    AnalysisRequest::from_json(&raw)
}
