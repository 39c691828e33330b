use crate::normalize::normalize_identifier;

/// Region pairs considered close enough for cross-region staffing.
/// Scored 0.7 rather than the 1.0 of an exact match; keys are normalized
/// identifiers.
const ADJACENT_REGIONS: &[(&str, &str)] = &[
    ("europe", "middleeast"),
    ("europe", "northamerica"),
    ("middleeast", "northamerica"),
    ("asia", "asiapacific"),
    ("asia", "middleeast"),
    ("asiapacific", "middleeast"),
];

pub fn is_adjacent_region(a: &str, b: &str) -> bool {
    let na = normalize_identifier(a);
    let nb = normalize_identifier(b);
    ADJACENT_REGIONS
        .iter()
        .any(|(x, y)| (na == *x && nb == *y) || (na == *y && nb == *x))
}

/// Region evaluation: score plus a short explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionEvaluation {
    pub score: f64,
    pub details: String,
    pub unknown: bool,
}

pub fn evaluate_region(candidate_region: Option<&str>, target_region: Option<&str>) -> RegionEvaluation {
    let (have, want) = match (candidate_region, target_region) {
        (Some(have), Some(want)) => (have, want),
        _ => {
            return RegionEvaluation {
                score: 0.5,
                details: "region unknown on one side".into(),
                unknown: true,
            }
        }
    };

    if normalize_identifier(have) == normalize_identifier(want) {
        RegionEvaluation {
            score: 1.0,
            details: format!("region match: {want}"),
            unknown: false,
        }
    } else if is_adjacent_region(have, want) {
        RegionEvaluation {
            score: 0.7,
            details: format!("adjacent regions: {have} ~ {want}"),
            unknown: false,
        }
    } else {
        RegionEvaluation {
            score: 0.0,
            details: format!("region mismatch: {have} vs {want}"),
            unknown: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_scores_full() {
        let eval = evaluate_region(Some("Europe"), Some("europe"));
        assert_eq!(eval.score, 1.0);
    }

    #[test]
    fn adjacency_is_symmetric() {
        assert!(is_adjacent_region("Middle East", "Europe"));
        assert!(is_adjacent_region("europe", "middle-east"));
        assert!(is_adjacent_region("Asia", "Asia-Pacific"));
        assert!(!is_adjacent_region("Europe", "Asia"));
    }

    #[test]
    fn adjacent_scores_point_seven() {
        let eval = evaluate_region(Some("Asia Pacific"), Some("Middle East"));
        assert_eq!(eval.score, 0.7);
    }

    #[test]
    fn distant_regions_score_zero() {
        let eval = evaluate_region(Some("South America"), Some("Asia"));
        assert_eq!(eval.score, 0.0);
        assert!(!eval.unknown);
    }

    #[test]
    fn unknown_side_is_neutral() {
        let eval = evaluate_region(None, Some("Europe"));
        assert_eq!(eval.score, 0.5);
        assert!(eval.unknown);
    }
}
