use std::cmp::Ordering;

use super::scoring::{ScoredPair, ScoringEngine};
use crate::{Candidate, Opportunity};

/// Best-effort one-to-one assignment across the full candidate × opportunity
/// matrix.
///
/// Greedy heuristic: candidates are processed in descending order of their
/// average score across all opportunities, and each takes its highest-scoring
/// still-unassigned opportunity (ties go to the earliest opportunity). This
/// is not a globally optimal assignment and makes no such claim; it stops
/// when either side is exhausted, so the number of assignments is
/// `min(candidates, opportunities)`.
pub fn allocate_best_pairs(
    scoring: &ScoringEngine,
    candidates: &[Candidate],
    opportunities: &[Opportunity],
) -> Vec<ScoredPair> {
    if candidates.is_empty() || opportunities.is_empty() {
        return vec![];
    }

    let matrix: Vec<Vec<ScoredPair>> = candidates
        .iter()
        .map(|candidate| {
            opportunities
                .iter()
                .map(|opportunity| scoring.score_pair(candidate, opportunity))
                .collect()
        })
        .collect();

    let averages: Vec<f64> = matrix
        .iter()
        .map(|row| row.iter().map(|pair| pair.score).sum::<f64>() / opportunities.len() as f64)
        .collect();

    // Stable sort: candidates with equal averages keep insertion order.
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|a, b| {
        averages[*b]
            .partial_cmp(&averages[*a])
            .unwrap_or(Ordering::Equal)
    });

    let mut taken = vec![false; opportunities.len()];
    let mut assignments = Vec::with_capacity(candidates.len().min(opportunities.len()));

    for candidate_idx in order {
        let row = &matrix[candidate_idx];
        let mut best: Option<usize> = None;
        for (opportunity_idx, pair) in row.iter().enumerate() {
            if taken[opportunity_idx] {
                continue;
            }
            // Strict comparison keeps the earliest opportunity on ties.
            match best {
                None => best = Some(opportunity_idx),
                Some(current) if pair.score > row[current].score => best = Some(opportunity_idx),
                _ => {}
            }
        }

        let Some(opportunity_idx) = best else {
            break;
        };
        taken[opportunity_idx] = true;
        assignments.push(row[opportunity_idx].clone());
    }

    assignments
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;

    use super::*;
    use crate::matching::weights::{Criterion, WeightVector};
    use crate::{Candidate, Opportunity};

    fn scoring() -> ScoringEngine {
        let mut weights = WeightVector::default();
        for (criterion, _) in WeightVector::default().iter() {
            if criterion != Criterion::Experience {
                weights.set(criterion, 0.0).unwrap();
            }
        }
        ScoringEngine::new(weights)
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn candidate(id: i64, years: f64) -> Candidate {
        Candidate {
            id: Some(id),
            experience_years: Some(years),
            ..Candidate::default()
        }
    }

    fn opportunity(id: i64, years: f64) -> Opportunity {
        Opportunity {
            id: Some(id),
            required_experience_years: Some(years),
            ..Opportunity::default()
        }
    }

    #[test]
    fn assigns_each_side_at_most_once() {
        let candidates = vec![candidate(1, 10.0), candidate(2, 5.0), candidate(3, 2.0)];
        let opportunities = vec![opportunity(10, 10.0), opportunity(20, 2.0)];

        let assignments = allocate_best_pairs(&scoring(), &candidates, &opportunities);

        assert_eq!(assignments.len(), 2);
        let candidate_ids: HashSet<_> = assignments.iter().map(|p| p.candidate_id).collect();
        let opportunity_ids: HashSet<_> = assignments.iter().map(|p| p.opportunity_id).collect();
        assert_eq!(candidate_ids.len(), 2);
        assert_eq!(opportunity_ids.len(), 2);
    }

    #[test]
    fn strongest_candidate_picks_first() {
        // Candidate 1 dominates and takes the 10-year gig; candidate 2 still
        // gets the remaining one even though it fits candidate 1 too.
        let candidates = vec![candidate(1, 10.0), candidate(2, 4.0)];
        let opportunities = vec![opportunity(10, 10.0), opportunity(20, 4.0)];

        let assignments = allocate_best_pairs(&scoring(), &candidates, &opportunities);

        let first = assignments
            .iter()
            .find(|p| p.candidate_id == Some(1))
            .unwrap();
        assert_eq!(first.opportunity_id, Some(10));
        let second = assignments
            .iter()
            .find(|p| p.candidate_id == Some(2))
            .unwrap();
        assert_eq!(second.opportunity_id, Some(20));
    }

    #[test]
    fn empty_side_yields_no_assignments() {
        assert!(allocate_best_pairs(&scoring(), &[], &[opportunity(1, 1.0)]).is_empty());
        assert!(allocate_best_pairs(&scoring(), &[candidate(1, 1.0)], &[]).is_empty());
    }

    #[test]
    fn assignment_count_is_the_smaller_side() {
        let candidates = vec![candidate(1, 3.0), candidate(2, 3.0)];
        let opportunities = vec![
            opportunity(10, 3.0),
            opportunity(20, 3.0),
            opportunity(30, 3.0),
        ];

        let assignments = allocate_best_pairs(&scoring(), &candidates, &opportunities);
        assert_eq!(assignments.len(), 2);
    }

    #[test]
    fn ties_go_to_the_earliest_opportunity() {
        let candidates = vec![candidate(1, 5.0)];
        let opportunities = vec![opportunity(10, 5.0), opportunity(20, 5.0)];

        let assignments = allocate_best_pairs(&scoring(), &candidates, &opportunities);
        assert_eq!(assignments[0].opportunity_id, Some(10));
    }
}
