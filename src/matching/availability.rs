use crate::schedule::{candidate_week, required_week, TimeRange, Weekday, WeekPlan};
use crate::{Candidate, Opportunity};

/// Outcome of comparing a candidate's weekly availability against an
/// opportunity's required schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityEvaluation {
    pub score: f64,
    pub covered_days: usize,
    pub required_days: usize,
    /// Required days the candidate has no entry for at all. Non-empty means
    /// the comparison is a hard no-match regardless of other days.
    pub missing_days: Vec<Weekday>,
    pub details: String,
    /// True when the opportunity requires no schedule.
    pub vacuous: bool,
}

fn day_is_covered(required: &[TimeRange], offered: &[TimeRange]) -> bool {
    required
        .iter()
        .all(|need| offered.iter().any(|have| have.contains(need)))
}

/// Normalize both sides to per-day interval sets and evaluate coverage.
///
/// A required day with no candidate entry at all fails the whole comparison
/// (score 0). Otherwise a day counts as covered when each required interval
/// lies fully inside some candidate interval, and the score is
/// `0.2 + 0.8 * covered/required`; the 0.2 floor records that the candidate
/// is at least present on every required day.
pub fn evaluate_availability(candidate: &Candidate, opportunity: &Opportunity) -> AvailabilityEvaluation {
    let required: WeekPlan = required_week(&opportunity.schedule);
    if required.is_empty() {
        return AvailabilityEvaluation {
            score: 0.5,
            covered_days: 0,
            required_days: 0,
            missing_days: vec![],
            details: "no schedule required".into(),
            vacuous: true,
        };
    }

    let offered = candidate_week(&candidate.availability_slots, &candidate.available_days);

    let missing_days: Vec<Weekday> = required
        .keys()
        .filter(|day| !offered.contains_key(day))
        .copied()
        .collect();

    let required_days = required.len();
    if !missing_days.is_empty() {
        let listed: Vec<&str> = missing_days.iter().map(|d| d.as_ref()).collect();
        let details = format!("missing required days: {}", listed.join(", "));
        return AvailabilityEvaluation {
            score: 0.0,
            covered_days: 0,
            required_days,
            missing_days,
            details,
            vacuous: false,
        };
    }

    let covered_days = required
        .iter()
        .filter(|(day, intervals)| day_is_covered(intervals, &offered[day]))
        .count();

    let score = 0.2 + 0.8 * covered_days as f64 / required_days as f64;

    AvailabilityEvaluation {
        score,
        covered_days,
        required_days,
        missing_days: vec![],
        details: format!("covered {covered_days}/{required_days} required days"),
        vacuous: false,
    }
}

/// Loose presence check used by the prefilter: shares at least one day with
/// the required schedule. Vacuous requirements pass.
pub fn any_day_overlap(candidate: &Candidate, opportunity: &Opportunity) -> bool {
    let required = required_week(&opportunity.schedule);
    if required.is_empty() {
        return true;
    }
    let offered = candidate_week(&candidate.availability_slots, &candidate.available_days);
    required.keys().any(|day| offered.contains_key(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::AvailabilitySlot;

    fn slot(day: Weekday, hours: &str) -> AvailabilitySlot {
        AvailabilitySlot {
            day,
            hours: hours.parse().unwrap(),
        }
    }

    #[test]
    fn containing_interval_covers_the_day() {
        let candidate = Candidate {
            availability_slots: vec![slot(Weekday::Monday, "09:00-18:00")],
            ..Candidate::default()
        };
        let opportunity = Opportunity {
            schedule: vec![slot(Weekday::Monday, "10:00-16:00")],
            ..Opportunity::default()
        };

        let eval = evaluate_availability(&candidate, &opportunity);
        assert_eq!(eval.covered_days, 1);
        assert_eq!(eval.score, 1.0);
    }

    #[test]
    fn absent_day_is_a_hard_no_match() {
        let candidate = Candidate {
            availability_slots: vec![slot(Weekday::Monday, "09:00-18:00")],
            ..Candidate::default()
        };
        let opportunity = Opportunity {
            schedule: vec![
                slot(Weekday::Monday, "10:00-16:00"),
                slot(Weekday::Tuesday, "10:00-16:00"),
            ],
            ..Opportunity::default()
        };

        let eval = evaluate_availability(&candidate, &opportunity);
        assert_eq!(eval.score, 0.0);
        assert_eq!(eval.missing_days, vec![Weekday::Tuesday]);
        assert!(eval.details.contains("tuesday"));
    }

    #[test]
    fn partial_coverage_keeps_the_floor() {
        let candidate = Candidate {
            availability_slots: vec![
                slot(Weekday::Monday, "09:00-18:00"),
                slot(Weekday::Tuesday, "11:00-13:00"),
            ],
            ..Candidate::default()
        };
        let opportunity = Opportunity {
            schedule: vec![
                slot(Weekday::Monday, "10:00-16:00"),
                slot(Weekday::Tuesday, "10:00-16:00"),
            ],
            ..Opportunity::default()
        };

        let eval = evaluate_availability(&candidate, &opportunity);
        assert_eq!(eval.covered_days, 1);
        assert!((eval.score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn present_but_uncovering_days_score_the_floor() {
        let candidate = Candidate {
            availability_slots: vec![slot(Weekday::Monday, "08:00-09:30")],
            ..Candidate::default()
        };
        let opportunity = Opportunity {
            schedule: vec![slot(Weekday::Monday, "10:00-16:00")],
            ..Opportunity::default()
        };

        let eval = evaluate_availability(&candidate, &opportunity);
        assert_eq!(eval.covered_days, 0);
        assert!((eval.score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn plain_day_list_covers_any_interval() {
        let candidate = Candidate {
            available_days: vec![Weekday::Monday],
            ..Candidate::default()
        };
        let opportunity = Opportunity {
            schedule: vec![slot(Weekday::Monday, "00:00-23:59")],
            ..Opportunity::default()
        };

        let eval = evaluate_availability(&candidate, &opportunity);
        assert_eq!(eval.score, 1.0);
    }

    #[test]
    fn empty_requirement_is_vacuous() {
        let eval = evaluate_availability(&Candidate::default(), &Opportunity::default());
        assert!(eval.vacuous);
        assert_eq!(eval.score, 0.5);
    }

    #[test]
    fn overlap_check_only_needs_a_shared_day() {
        let candidate = Candidate {
            available_days: vec![Weekday::Friday],
            ..Candidate::default()
        };
        let requires_friday = Opportunity {
            schedule: vec![slot(Weekday::Friday, "09:00-17:00")],
            ..Opportunity::default()
        };
        let requires_monday = Opportunity {
            schedule: vec![slot(Weekday::Monday, "09:00-17:00")],
            ..Opportunity::default()
        };

        assert!(any_day_overlap(&candidate, &requires_friday));
        assert!(!any_day_overlap(&candidate, &requires_monday));
        assert!(any_day_overlap(&Candidate::default(), &Opportunity::default()));
    }
}
