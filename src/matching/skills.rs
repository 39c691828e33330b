use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::normalize::normalize_identifier;
use crate::proficiency::SkillLevel;
use crate::{Candidate, SkillCategory, SkillEntry, SkillRequirement};

/// Result of matching an opportunity's skill requirements against a
/// candidate's combined skill sets.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatchOutcome {
    pub match_ratio: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// True when the opportunity listed no requirements at all.
    pub vacuous: bool,
}

fn best_levels(entries: &[SkillEntry]) -> HashMap<String, SkillLevel> {
    let mut levels: HashMap<String, SkillLevel> = HashMap::new();
    for entry in entries {
        let key = normalize_identifier(&entry.name);
        if key.is_empty() {
            continue;
        }
        let slot = levels.entry(key).or_insert(entry.level);
        if entry.level > *slot {
            *slot = entry.level;
        }
    }
    levels
}

/// A held level satisfies a requirement when it meets the bar, or when it is
/// Advanced/Expert regardless of the bar.
fn meets_bar(held: SkillLevel, required: SkillLevel) -> bool {
    held >= required || held >= SkillLevel::Advanced
}

/// Match required skills against the union of the candidate's technical,
/// professional, and soft skill sets. A requirement that names a category is
/// only satisfied from that category.
pub fn check_required_skills(
    requirements: &[SkillRequirement],
    candidate: &Candidate,
) -> SkillMatchOutcome {
    if requirements.is_empty() {
        return SkillMatchOutcome {
            match_ratio: 0.0,
            matched: vec![],
            missing: vec![],
            vacuous: true,
        };
    }

    let by_category: HashMap<SkillCategory, HashMap<String, SkillLevel>> = SkillCategory::iter()
        .map(|category| (category, best_levels(candidate.skills_in(category))))
        .collect();

    let mut union: HashMap<String, SkillLevel> = HashMap::new();
    for levels in by_category.values() {
        for (name, level) in levels {
            let slot = union.entry(name.clone()).or_insert(*level);
            if *level > *slot {
                *slot = *level;
            }
        }
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for requirement in requirements {
        let pool = requirement
            .category
            .map(|category| &by_category[&category])
            .unwrap_or(&union);

        match pool.get(&normalize_identifier(&requirement.name)) {
            Some(held) if meets_bar(*held, requirement.min_level) => {
                matched.push(requirement.name.clone());
            }
            _ => missing.push(requirement.name.clone()),
        }
    }

    matched.sort();
    missing.sort();
    let match_ratio = matched.len() as f64 / requirements.len() as f64;

    SkillMatchOutcome {
        match_ratio,
        matched,
        missing,
        vacuous: false,
    }
}

/// Loose presence check used by the prefilter: does the candidate hold any
/// required skill by name, ignoring level and category? Vacuous requirements
/// pass.
pub fn any_skill_overlap(requirements: &[SkillRequirement], candidate: &Candidate) -> bool {
    if requirements.is_empty() {
        return true;
    }

    let held: Vec<String> = SkillCategory::iter()
        .flat_map(|category| candidate.skills_in(category))
        .map(|entry| normalize_identifier(&entry.name))
        .collect();

    requirements
        .iter()
        .any(|requirement| held.contains(&normalize_identifier(&requirement.name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, level: SkillLevel) -> SkillEntry {
        SkillEntry {
            name: name.into(),
            level,
        }
    }

    fn requirement(name: &str, min_level: SkillLevel) -> SkillRequirement {
        SkillRequirement {
            name: name.into(),
            category: None,
            min_level,
        }
    }

    #[test]
    fn matches_across_category_union() {
        let candidate = Candidate {
            technical_skills: vec![entry("Rust", SkillLevel::Intermediate)],
            soft_skills: vec![entry("Negotiation", SkillLevel::Advanced)],
            ..Candidate::default()
        };

        let outcome = check_required_skills(
            &[
                requirement("rust", SkillLevel::Intermediate),
                requirement("negotiation", SkillLevel::Beginner),
            ],
            &candidate,
        );

        assert_eq!(outcome.match_ratio, 1.0);
        assert_eq!(outcome.matched, vec!["negotiation".to_string(), "rust".to_string()]);
        assert!(!outcome.vacuous);
    }

    #[test]
    fn level_bar_filters_weak_skills() {
        let candidate = Candidate {
            technical_skills: vec![entry("sql", SkillLevel::Novice)],
            ..Candidate::default()
        };

        let outcome =
            check_required_skills(&[requirement("sql", SkillLevel::Intermediate)], &candidate);

        assert_eq!(outcome.match_ratio, 0.0);
        assert_eq!(outcome.missing, vec!["sql".to_string()]);
    }

    #[test]
    fn advanced_satisfies_any_bar() {
        let candidate = Candidate {
            technical_skills: vec![entry("kubernetes", SkillLevel::Advanced)],
            ..Candidate::default()
        };

        let outcome =
            check_required_skills(&[requirement("Kubernetes", SkillLevel::Expert)], &candidate);

        assert_eq!(outcome.match_ratio, 1.0);
    }

    #[test]
    fn category_restriction_is_honored() {
        let candidate = Candidate {
            soft_skills: vec![entry("communication", SkillLevel::Expert)],
            ..Candidate::default()
        };

        let restricted = SkillRequirement {
            name: "communication".into(),
            category: Some(SkillCategory::Technical),
            min_level: SkillLevel::Beginner,
        };

        let outcome = check_required_skills(&[restricted], &candidate);
        assert_eq!(outcome.match_ratio, 0.0);
    }

    #[test]
    fn no_requirements_is_vacuous() {
        let outcome = check_required_skills(&[], &Candidate::default());
        assert!(outcome.vacuous);
    }

    #[test]
    fn duplicate_entries_keep_the_best_level() {
        let candidate = Candidate {
            technical_skills: vec![
                entry("python", SkillLevel::Beginner),
                entry("Python", SkillLevel::Intermediate),
            ],
            ..Candidate::default()
        };

        let outcome =
            check_required_skills(&[requirement("python", SkillLevel::Intermediate)], &candidate);
        assert_eq!(outcome.match_ratio, 1.0);
    }

    #[test]
    fn overlap_check_ignores_levels() {
        let candidate = Candidate {
            technical_skills: vec![entry("go", SkillLevel::Beginner)],
            ..Candidate::default()
        };

        assert!(any_skill_overlap(
            &[requirement("Go", SkillLevel::Expert)],
            &candidate
        ));
        assert!(!any_skill_overlap(
            &[requirement("erlang", SkillLevel::Beginner)],
            &candidate
        ));
        assert!(any_skill_overlap(&[], &Candidate::default()));
    }
}
