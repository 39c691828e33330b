use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::allocate::allocate_best_pairs;
use super::observer::MatchObserver;
use super::prefilter::{CandidateFilter, FilterConfig, FilterReport};
use super::scoring::{ScoredPair, ScoringEngine};
use super::weights::WeightVector;
use crate::{Candidate, Opportunity};

/// Per-request ranking options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Pairs below this aggregate score are non-qualifying: excluded from
    /// `matches` but still counted in the summary statistics.
    pub minimum_score: f64,
    /// Cap on the primary `matches` list.
    pub limit: usize,
    /// Expose the separate `top_scores` view.
    pub show_all_scores: bool,
    pub top_score_count: usize,
    /// Run the coarse pre-ranking reduction pass first.
    pub enable_filter: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            minimum_score: 0.4,
            limit: 10,
            show_all_scores: false,
            top_score_count: 5,
            enable_filter: false,
        }
    }
}

/// Summary over every scored pair, qualifying or not. Empty collections
/// yield zeros; the divisions are guarded explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub highest: f64,
    pub average: f64,
    pub qualifying: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankOutcome {
    /// Qualifying pairs, best first, capped at `limit`.
    pub matches: Vec<ScoredPair>,
    pub qualifying_count: usize,
    /// Every pair actually scored (post-filter).
    pub total_matches: usize,
    /// Top qualifying pairs when `show_all_scores` is set; a separate view,
    /// not a superset or subset guarantee against `matches`.
    pub top_scores: Vec<ScoredPair>,
    pub score_stats: ScoreStats,
}

/// Ranking entry points: weight resolution happens before construction, the
/// optional filter runs next, then per-pair scoring, then the deterministic
/// sort. Scoring touches no shared mutable state, so pairs may be scored in
/// any order.
pub struct MatchingEngine {
    scoring: ScoringEngine,
    filter: CandidateFilter,
    observer: Option<Arc<dyn MatchObserver>>,
}

impl MatchingEngine {
    pub fn new(weights: WeightVector) -> Self {
        Self {
            scoring: ScoringEngine::new(weights),
            filter: CandidateFilter::default(),
            observer: None,
        }
    }

    pub fn with_filter_config(mut self, config: FilterConfig) -> Self {
        self.filter = CandidateFilter::new(config);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Pin the date used for role-history derivation; defaults to today.
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.scoring = self.scoring.with_reference_date(reference_date);
        self
    }

    pub fn weights(&self) -> &WeightVector {
        self.scoring.weights()
    }

    /// Rank a candidate collection against one opportunity.
    pub fn rank_candidates_for_opportunity(
        &self,
        opportunity: &Opportunity,
        candidates: &[Candidate],
        options: &RankOptions,
    ) -> RankOutcome {
        let kept = if options.enable_filter {
            let (kept, report) = self.filter.filter_candidates(
                opportunity,
                candidates,
                self.scoring.weights(),
                self.scoring.reference_date(),
            );
            self.notify_filter(&report);
            kept
        } else {
            (0..candidates.len()).collect()
        };

        let scored = kept
            .into_iter()
            .map(|idx| self.score_and_notify(&candidates[idx], opportunity))
            .collect();

        build_outcome(scored, options)
    }

    /// Mirror: rank an opportunity collection against one candidate.
    pub fn rank_opportunities_for_candidate(
        &self,
        candidate: &Candidate,
        opportunities: &[Opportunity],
        options: &RankOptions,
    ) -> RankOutcome {
        let kept = if options.enable_filter {
            let (kept, report) = self.filter.filter_opportunities(
                candidate,
                opportunities,
                self.scoring.weights(),
                self.scoring.reference_date(),
            );
            self.notify_filter(&report);
            kept
        } else {
            (0..opportunities.len()).collect()
        };

        let scored = kept
            .into_iter()
            .map(|idx| self.score_and_notify(candidate, &opportunities[idx]))
            .collect();

        build_outcome(scored, options)
    }

    /// Best-effort one-to-one assignment across the full matrix. Greedy; see
    /// [`allocate_best_pairs`].
    pub fn allocate(&self, candidates: &[Candidate], opportunities: &[Opportunity]) -> Vec<ScoredPair> {
        allocate_best_pairs(&self.scoring, candidates, opportunities)
    }

    pub fn score_pair(&self, candidate: &Candidate, opportunity: &Opportunity) -> ScoredPair {
        self.scoring.score_pair(candidate, opportunity)
    }

    fn score_and_notify(&self, candidate: &Candidate, opportunity: &Opportunity) -> ScoredPair {
        let pair = self.scoring.score_pair(candidate, opportunity);
        if let Some(observer) = &self.observer {
            observer.on_pair_scored(&pair);
        }
        pair
    }

    fn notify_filter(&self, report: &FilterReport) {
        if let Some(observer) = &self.observer {
            for step in &report.steps {
                observer.on_filter_step(step);
            }
        }
    }
}

/// Sort, threshold, cap. The sort is stable, so ties keep the input
/// collection's insertion order.
fn build_outcome(scored: Vec<ScoredPair>, options: &RankOptions) -> RankOutcome {
    let mut ordered = scored;
    ordered.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let total_matches = ordered.len();
    let highest = ordered.first().map(|pair| pair.score).unwrap_or(0.0);
    let average = if ordered.is_empty() {
        0.0
    } else {
        ordered.iter().map(|pair| pair.score).sum::<f64>() / total_matches as f64
    };

    let qualifying: Vec<&ScoredPair> = ordered
        .iter()
        .filter(|pair| pair.score >= options.minimum_score)
        .collect();
    let qualifying_count = qualifying.len();

    let matches: Vec<ScoredPair> = qualifying.iter().take(options.limit).map(|p| (*p).clone()).collect();
    let top_scores: Vec<ScoredPair> = if options.show_all_scores {
        qualifying
            .iter()
            .take(options.top_score_count)
            .map(|p| (*p).clone())
            .collect()
    } else {
        vec![]
    };

    RankOutcome {
        matches,
        qualifying_count,
        total_matches,
        top_scores,
        score_stats: ScoreStats {
            highest,
            average,
            qualifying: qualifying_count,
        },
    }
}
