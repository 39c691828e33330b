use std::collections::HashMap;

use serde::Deserialize;

use crate::matching::pipeline::RankOptions;
use crate::{Candidate, Opportunity};

/// Rank a candidate collection against one opportunity.
#[derive(Debug, Clone, Deserialize)]
pub struct RankCandidatesRequest {
    pub opportunity: Opportunity,
    pub candidates: Vec<Candidate>,
    /// Partial criterion→weight map; unspecified criteria default to 1.
    #[serde(default)]
    pub weights: HashMap<String, f64>,
    #[serde(default)]
    pub options: RankOptions,
}

/// Mirror request: rank an opportunity collection against one candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct RankOpportunitiesRequest {
    pub candidate: Candidate,
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub weights: HashMap<String, f64>,
    #[serde(default)]
    pub options: RankOptions,
}

/// Best-overall-allocation request across two whole collections.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationRequest {
    pub candidates: Vec<Candidate>,
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}
