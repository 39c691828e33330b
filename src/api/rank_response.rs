use chrono::{DateTime, Utc};
use serde::Serialize;

use super::rank_request::{AllocationRequest, RankCandidatesRequest, RankOpportunitiesRequest};
use crate::error::EngineError;
use crate::matching::pipeline::{MatchingEngine, RankOutcome};
use crate::matching::scoring::ScoredPair;
use crate::matching::weights::WeightVector;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize)]
pub struct RankResponse {
    #[serde(flatten)]
    pub outcome: RankOutcome,
    pub engine_version: String,
    pub matched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationResponse {
    /// Greedy best-effort assignment, not a globally optimal solution.
    pub assignments: Vec<ScoredPair>,
    pub engine_version: String,
    pub matched_at: DateTime<Utc>,
}

fn rank_response(outcome: RankOutcome) -> RankResponse {
    RankResponse {
        outcome,
        engine_version: ENGINE_VERSION.into(),
        matched_at: Utc::now(),
    }
}

/// Resolve weights, run the engine, wrap the outcome. Weight errors are the
/// caller's to report; scoring itself cannot fail.
pub fn handle_rank_candidates(request: &RankCandidatesRequest) -> Result<RankResponse, EngineError> {
    let weights = WeightVector::resolve(&request.weights)?;
    let engine = MatchingEngine::new(weights);
    let outcome = engine.rank_candidates_for_opportunity(
        &request.opportunity,
        &request.candidates,
        &request.options,
    );
    Ok(rank_response(outcome))
}

pub fn handle_rank_opportunities(
    request: &RankOpportunitiesRequest,
) -> Result<RankResponse, EngineError> {
    let weights = WeightVector::resolve(&request.weights)?;
    let engine = MatchingEngine::new(weights);
    let outcome = engine.rank_opportunities_for_candidate(
        &request.candidate,
        &request.opportunities,
        &request.options,
    );
    Ok(rank_response(outcome))
}

pub fn handle_allocation(request: &AllocationRequest) -> Result<AllocationResponse, EngineError> {
    let weights = WeightVector::resolve(&request.weights)?;
    let engine = MatchingEngine::new(weights);
    let assignments = engine.allocate(&request.candidates, &request.opportunities);
    Ok(AllocationResponse {
        assignments,
        engine_version: ENGINE_VERSION.into(),
        matched_at: Utc::now(),
    })
}
