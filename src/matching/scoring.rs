use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::availability::evaluate_availability;
use super::region::evaluate_region;
use super::skills::check_required_skills;
use super::weights::{Criterion, WeightVector};
use crate::normalize::{identifier_eq, identifier_matches, normalize_identifier};
use crate::proficiency::LanguageProficiency;
use crate::{Candidate, Opportunity};

/// Per-criterion and overall match classification. Reported alongside the
/// numeric score, never folded into it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    PerfectMatch,
    Match,
    PartialMatch,
    NoMatch,
    /// The input needed for the comparison was missing; the neutral default
    /// score was used.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: f64,
    pub max_score: f64,
    pub status: MatchStatus,
    pub details: String,
}

impl CriterionScore {
    fn new(score: f64, status: MatchStatus, details: String) -> Self {
        Self {
            score,
            max_score: 1.0,
            status,
            details,
        }
    }

    fn unknown(details: &str) -> Self {
        Self::new(0.5, MatchStatus::Unknown, details.into())
    }
}

/// One scored candidate/opportunity pair. Produced fresh per request; it has
/// no persisted identity or lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    pub candidate_id: Option<i64>,
    pub opportunity_id: Option<i64>,
    /// Weighted aggregate in [0,1].
    pub score: f64,
    pub status: MatchStatus,
    pub breakdown: BTreeMap<Criterion, CriterionScore>,
}

/// Scores one candidate against one opportunity across every criterion.
///
/// Every scorer is total: missing input on either side yields the criterion's
/// documented neutral or penalized default, never an error.
pub struct ScoringEngine {
    weights: WeightVector,
    reference_date: NaiveDate,
}

impl ScoringEngine {
    pub fn new(weights: WeightVector) -> Self {
        Self {
            weights,
            reference_date: Utc::now().date_naive(),
        }
    }

    /// Pin the date used to resolve open-ended role history. Defaults to
    /// today; fixed in tests for determinism.
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Score one pair: every criterion, then the weighted aggregate
    /// `Σ(score·w) / Σ(w)` over criteria with non-zero weight.
    pub fn score_pair(&self, candidate: &Candidate, opportunity: &Opportunity) -> ScoredPair {
        let breakdown: BTreeMap<Criterion, CriterionScore> = BTreeMap::from([
            (Criterion::Experience, self.score_experience(candidate, opportunity)),
            (Criterion::Skills, self.score_skills(candidate, opportunity)),
            (Criterion::Industry, self.score_industry(candidate, opportunity)),
            (Criterion::Language, self.score_language(candidate, opportunity)),
            (Criterion::Availability, self.score_availability(candidate, opportunity)),
            (Criterion::Timezone, self.score_timezone(candidate, opportunity)),
            (Criterion::Performance, self.score_performance(candidate, opportunity)),
            (Criterion::Region, self.score_region(candidate, opportunity)),
        ]);

        let mut weighted = 0.0;
        let mut applied = 0.0;
        for (criterion, entry) in &breakdown {
            let weight = self.weights.get(*criterion);
            if weight > 0.0 {
                weighted += entry.score * weight;
                applied += weight;
            }
        }
        // All-zero weights would otherwise divide by zero.
        let score = if applied > 0.0 { weighted / applied } else { 0.0 };

        ScoredPair {
            candidate_id: candidate.id,
            opportunity_id: opportunity.id,
            score,
            status: status_from_score(score),
            breakdown,
        }
    }

    fn score_experience(&self, candidate: &Candidate, opportunity: &Opportunity) -> CriterionScore {
        let need = match opportunity.required_experience_years {
            Some(need) => need,
            None => return CriterionScore::unknown("no experience requirement"),
        };
        let have = match candidate.experience_years_as_of(self.reference_date) {
            Some(have) => have,
            None => return CriterionScore::unknown("candidate experience unknown"),
        };

        if have >= need {
            let ratio = if have > 0.0 { need / have } else { 1.0 };
            let score = 0.8 + 0.2 * ratio.min(1.0);
            CriterionScore::new(
                score,
                status_from_score(score),
                format!("{have:.1}y meets required {need:.1}y"),
            )
        } else {
            let score = (have / need).max(0.1);
            CriterionScore::new(
                score,
                status_from_score(score),
                format!("{have:.1}y below required {need:.1}y"),
            )
        }
    }

    fn score_skills(&self, candidate: &Candidate, opportunity: &Opportunity) -> CriterionScore {
        let outcome = check_required_skills(&opportunity.required_skills, candidate);
        if outcome.vacuous {
            return CriterionScore::unknown("no skills required");
        }

        let total = outcome.matched.len() + outcome.missing.len();
        let status = group_status(outcome.matched.len(), total);
        let details = if outcome.missing.is_empty() {
            format!("matched all {total} required skills")
        } else {
            format!(
                "matched {}/{} required skills (missing: {})",
                outcome.matched.len(),
                total,
                outcome.missing.join(", ")
            )
        };

        CriterionScore::new(outcome.match_ratio, status, details)
    }

    fn score_industry(&self, candidate: &Candidate, opportunity: &Opportunity) -> CriterionScore {
        let category = match opportunity.category.as_deref() {
            Some(category) => category,
            None => return CriterionScore::unknown("no industry category on opportunity"),
        };
        if candidate.industries.is_empty() {
            return CriterionScore::unknown("candidate industries unknown");
        }

        let hit = candidate
            .industries
            .iter()
            .find(|industry| identifier_matches(industry, category));

        match hit {
            Some(industry) => CriterionScore::new(
                1.0,
                MatchStatus::PerfectMatch,
                format!("industry match: {industry} ~ {category}"),
            ),
            None => CriterionScore::new(
                0.0,
                MatchStatus::NoMatch,
                format!("no industry overlap with {category}"),
            ),
        }
    }

    fn score_language(&self, candidate: &Candidate, opportunity: &Opportunity) -> CriterionScore {
        if opportunity.required_languages.is_empty() {
            return CriterionScore::unknown("no languages required");
        }

        let mut held: HashMap<String, LanguageProficiency> = HashMap::new();
        for entry in &candidate.languages {
            let key = normalize_identifier(&entry.name);
            let slot = held.entry(key).or_insert(entry.proficiency);
            if entry.proficiency > *slot {
                *slot = entry.proficiency;
            }
        }

        let mut missing = Vec::new();
        let mut matched = 0usize;
        for requirement in &opportunity.required_languages {
            let satisfied = held
                .get(&normalize_identifier(&requirement.name))
                .is_some_and(|proficiency| requirement.min_proficiency.accepts(*proficiency));
            if satisfied {
                matched += 1;
            } else {
                missing.push(format!("{} ({})", requirement.name, requirement.min_proficiency));
            }
        }

        let total = opportunity.required_languages.len();
        let status = group_status(matched, total);
        let details = if missing.is_empty() {
            format!("matched all {total} required languages")
        } else {
            format!(
                "matched {matched}/{total} required languages (unmet: {})",
                missing.join(", ")
            )
        };

        CriterionScore::new(matched as f64 / total as f64, status, details)
    }

    fn score_availability(&self, candidate: &Candidate, opportunity: &Opportunity) -> CriterionScore {
        let eval = evaluate_availability(candidate, opportunity);
        if eval.vacuous {
            return CriterionScore::unknown(&eval.details);
        }
        if !eval.missing_days.is_empty() {
            return CriterionScore::new(0.0, MatchStatus::NoMatch, eval.details);
        }

        let status = group_status(eval.covered_days, eval.required_days);
        CriterionScore::new(eval.score, status, eval.details)
    }

    fn score_timezone(&self, candidate: &Candidate, opportunity: &Opportunity) -> CriterionScore {
        match (candidate.timezone.as_deref(), opportunity.timezone.as_deref()) {
            (Some(have), Some(want)) if identifier_eq(have, want) => CriterionScore::new(
                1.0,
                MatchStatus::PerfectMatch,
                format!("timezone match: {want}"),
            ),
            (Some(have), Some(want)) => CriterionScore::new(
                0.5,
                MatchStatus::PartialMatch,
                format!("timezone differs: {have} vs {want}"),
            ),
            _ => CriterionScore::unknown("timezone unknown on one side"),
        }
    }

    fn score_performance(&self, candidate: &Candidate, opportunity: &Opportunity) -> CriterionScore {
        let metrics = match &candidate.performance {
            Some(metrics) => metrics,
            None => return CriterionScore::unknown("candidate performance unknown"),
        };

        let conversion = match (metrics.conversion_rate, opportunity.expected_conversion_rate) {
            (Some(actual), Some(expected)) if expected > 0.0 => {
                (actual / expected).clamp(0.0, 1.0)
            }
            (Some(_), Some(_)) => 1.0,
            _ => 0.5,
        };
        let reliability = metrics
            .reliability
            .map(|r| (r / 10.0).clamp(0.0, 1.0))
            .unwrap_or(0.5);
        let rating = metrics.rating.map(|r| (r / 5.0).clamp(0.0, 1.0)).unwrap_or(0.5);

        let score = 0.4 * conversion + 0.3 * reliability + 0.3 * rating;
        CriterionScore::new(
            score,
            status_from_score(score),
            format!(
                "conversion {conversion:.2}, reliability {reliability:.2}, rating {rating:.2}"
            ),
        )
    }

    fn score_region(&self, candidate: &Candidate, opportunity: &Opportunity) -> CriterionScore {
        let eval = evaluate_region(candidate.region.as_deref(), opportunity.region.as_deref());
        if eval.unknown {
            return CriterionScore::unknown(&eval.details);
        }
        CriterionScore::new(eval.score, status_from_score(eval.score), eval.details)
    }
}

/// Score one pair with the given weights. Pure and deterministic for fixed
/// inputs (open-ended role histories resolve against today; pin the date via
/// [`ScoringEngine::with_reference_date`] when that matters).
pub fn score_pair(
    candidate: &Candidate,
    opportunity: &Opportunity,
    weights: &WeightVector,
) -> ScoredPair {
    ScoringEngine::new(weights.clone()).score_pair(candidate, opportunity)
}

/// Sub-item group classification: all / some / none of the required items.
fn group_status(matched: usize, total: usize) -> MatchStatus {
    if matched == total {
        MatchStatus::PerfectMatch
    } else if matched > 0 {
        MatchStatus::PartialMatch
    } else {
        MatchStatus::NoMatch
    }
}

fn status_from_score(score: f64) -> MatchStatus {
    if score >= 0.9 {
        MatchStatus::PerfectMatch
    } else if score >= 0.7 {
        MatchStatus::Match
    } else if score >= 0.4 {
        MatchStatus::PartialMatch
    } else {
        MatchStatus::NoMatch
    }
}
