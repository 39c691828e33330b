use chrono::NaiveDate;
use serde::Serialize;

use super::availability::any_day_overlap;
use super::skills::any_skill_overlap;
use super::weights::{Criterion, WeightVector};
use crate::normalize::{identifier_matches, normalize_identifier};
use crate::{Candidate, Opportunity};

fn env_weight_threshold() -> f64 {
    std::env::var("GM_FILTER_WEIGHT_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.5)
}

/// Configuration for the optional pre-ranking reduction pass.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Criteria below this resolved weight never hard-filter.
    pub weight_threshold: f64,
    /// Opt-in anti-overqualification bound: when set, candidates with more
    /// than `ratio × required` years of experience are dropped too.
    pub max_experience_ratio: Option<f64>,
    /// Industry is excluded from hard filtering by default; its weight alone
    /// is not enough to disqualify a candidate.
    pub filter_industry: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            weight_threshold: env_weight_threshold(),
            max_experience_ratio: None,
            filter_industry: false,
        }
    }
}

/// One applied filter step, recorded for observability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterStep {
    pub criterion: Criterion,
    pub weight: f64,
    pub before: usize,
    pub after: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterReport {
    pub steps: Vec<FilterStep>,
}

/// Recall-oriented coarse filter: drops only provable failures on high-weight
/// criteria before scoring. Looser than the scorers: a candidate missing the
/// data a predicate needs is kept, and the pass never changes the aggregate
/// score formula.
pub struct CandidateFilter {
    config: FilterConfig,
}

impl CandidateFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn hard_filterable(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::Experience
            | Criterion::Skills
            | Criterion::Language
            | Criterion::Availability => true,
            Criterion::Industry => self.config.filter_industry,
            Criterion::Timezone | Criterion::Performance | Criterion::Region => false,
        }
    }

    fn passes(
        &self,
        criterion: Criterion,
        candidate: &Candidate,
        opportunity: &Opportunity,
        reference_date: NaiveDate,
    ) -> bool {
        match criterion {
            Criterion::Experience => {
                let (have, need) = match (
                    candidate.experience_years_as_of(reference_date),
                    opportunity.required_experience_years,
                ) {
                    (Some(have), Some(need)) => (have, need),
                    _ => return true,
                };
                if have < need {
                    return false;
                }
                match self.config.max_experience_ratio {
                    Some(ratio) if need > 0.0 => have <= need * ratio,
                    _ => true,
                }
            }
            Criterion::Skills => {
                let has_any = !candidate.technical_skills.is_empty()
                    || !candidate.professional_skills.is_empty()
                    || !candidate.soft_skills.is_empty();
                !has_any || any_skill_overlap(&opportunity.required_skills, candidate)
            }
            Criterion::Language => {
                if opportunity.required_languages.is_empty() || candidate.languages.is_empty() {
                    return true;
                }
                let held: Vec<String> = candidate
                    .languages
                    .iter()
                    .map(|entry| normalize_identifier(&entry.name))
                    .collect();
                opportunity
                    .required_languages
                    .iter()
                    .any(|req| held.contains(&normalize_identifier(&req.name)))
            }
            Criterion::Availability => {
                let has_any = !candidate.availability_slots.is_empty()
                    || !candidate.available_days.is_empty();
                !has_any || any_day_overlap(candidate, opportunity)
            }
            Criterion::Industry => {
                let category = match opportunity.category.as_deref() {
                    Some(category) => category,
                    None => return true,
                };
                if candidate.industries.is_empty() {
                    return true;
                }
                candidate
                    .industries
                    .iter()
                    .any(|industry| identifier_matches(industry, category))
            }
            Criterion::Timezone | Criterion::Performance | Criterion::Region => true,
        }
    }

    /// Reduce a candidate collection for one opportunity. Returns the kept
    /// indices (insertion order preserved) plus the per-step counts.
    pub fn filter_candidates(
        &self,
        opportunity: &Opportunity,
        candidates: &[Candidate],
        weights: &WeightVector,
        reference_date: NaiveDate,
    ) -> (Vec<usize>, FilterReport) {
        self.run(candidates.len(), weights, |criterion, idx| {
            self.passes(criterion, &candidates[idx], opportunity, reference_date)
        })
    }

    /// Mirror pass: reduce an opportunity collection for one candidate.
    pub fn filter_opportunities(
        &self,
        candidate: &Candidate,
        opportunities: &[Opportunity],
        weights: &WeightVector,
        reference_date: NaiveDate,
    ) -> (Vec<usize>, FilterReport) {
        self.run(opportunities.len(), weights, |criterion, idx| {
            self.passes(criterion, candidate, &opportunities[idx], reference_date)
        })
    }

    /// Criteria run in descending weight order; the loop stops at the first
    /// criterion below the threshold since nothing after it can filter.
    fn run(
        &self,
        count: usize,
        weights: &WeightVector,
        mut passes: impl FnMut(Criterion, usize) -> bool,
    ) -> (Vec<usize>, FilterReport) {
        let mut kept: Vec<usize> = (0..count).collect();
        let mut report = FilterReport::default();

        for (criterion, weight) in weights.descending() {
            if weight < self.config.weight_threshold {
                break;
            }
            if !self.hard_filterable(criterion) {
                continue;
            }

            let before = kept.len();
            kept.retain(|&idx| passes(criterion, idx));
            let after = kept.len();

            tracing::debug!(criterion = %criterion, weight, before, after, "prefilter step");
            report.steps.push(FilterStep {
                criterion,
                weight,
                before,
                after,
            });
        }

        (kept, report)
    }
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}
