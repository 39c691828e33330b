use super::prefilter::FilterStep;
use super::scoring::ScoredPair;

/// Optional trace side channel for callers that want to watch the engine
/// work. All hooks default to no-ops; nothing in the engine writes to stdout.
pub trait MatchObserver: Send + Sync {
    fn on_filter_step(&self, _step: &FilterStep) {}

    fn on_pair_scored(&self, _pair: &ScoredPair) {}
}

/// Observer that forwards engine events to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn on_filter_step(&self, step: &FilterStep) {
        tracing::debug!(
            criterion = %step.criterion,
            weight = step.weight,
            before = step.before,
            after = step.after,
            "prefilter step"
        );
    }

    fn on_pair_scored(&self, pair: &ScoredPair) {
        tracing::debug!(
            candidate_id = ?pair.candidate_id,
            opportunity_id = ?pair.opportunity_id,
            score = pair.score,
            status = %pair.status,
            "pair scored"
        );
    }
}
