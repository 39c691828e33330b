//! Payload shapes for callers wrapping the engine in a service, plus thin
//! handlers that resolve weights and run the engine.

mod rank_request;
mod rank_response;

pub use rank_request::{AllocationRequest, RankCandidatesRequest, RankOpportunitiesRequest};
pub use rank_response::{
    handle_allocation, handle_rank_candidates, handle_rank_opportunities, AllocationResponse,
    RankResponse, ENGINE_VERSION,
};
