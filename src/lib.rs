//! Scoring and ranking engine for matching candidates to gig opportunities.
//!
//! The engine consumes plain record collections plus a weight configuration
//! and returns ranked results; it never fetches, stores, or notifies.

pub mod api;
pub mod error;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod proficiency;
pub mod schedule;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::proficiency::{LanguageProficiency, RequiredProficiency, SkillLevel};
use crate::schedule::{AvailabilitySlot, Weekday};

// Commonly used data models for the matching functions. Missing data is
// Option/empty-Vec; the scorers turn absence into neutral defaults rather
// than errors.

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SkillCategory {
    Technical,
    Professional,
    Soft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub proficiency: LanguageProficiency,
}

/// A dated role in a candidate's history; an open-ended role runs to the
/// engine's reference date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedRole {
    pub started: NaiveDate,
    #[serde(default)]
    pub ended: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    /// Conversion rate in [0,1].
    pub conversion_rate: Option<f64>,
    /// Reliability in [1,10].
    pub reliability: Option<f64>,
    /// Rating in [1,5].
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub id: Option<i64>,
    /// Literal year count; wins over `role_history` when both are present.
    pub experience_years: Option<f64>,
    pub role_history: Vec<DatedRole>,
    pub technical_skills: Vec<SkillEntry>,
    pub professional_skills: Vec<SkillEntry>,
    pub soft_skills: Vec<SkillEntry>,
    pub languages: Vec<LanguageEntry>,
    pub availability_slots: Vec<AvailabilitySlot>,
    /// A plain day list means the whole day is available.
    pub available_days: Vec<Weekday>,
    pub industries: Vec<String>,
    pub timezone: Option<String>,
    pub region: Option<String>,
    pub performance: Option<PerformanceMetrics>,
}

impl Candidate {
    /// Experience in years as of `as_of`: the literal count when present,
    /// otherwise the summed duration of dated roles.
    pub fn experience_years_as_of(&self, as_of: NaiveDate) -> Option<f64> {
        if let Some(years) = self.experience_years {
            return Some(years);
        }
        if self.role_history.is_empty() {
            return None;
        }

        let mut days = 0i64;
        for role in &self.role_history {
            let end = role.ended.unwrap_or(as_of);
            if end > role.started {
                days += (end - role.started).num_days();
            }
        }
        Some(days as f64 / 365.25)
    }

    pub fn skills_in(&self, category: SkillCategory) -> &[SkillEntry] {
        match category {
            SkillCategory::Technical => &self.technical_skills,
            SkillCategory::Professional => &self.professional_skills,
            SkillCategory::Soft => &self.soft_skills,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub name: String,
    /// When given, only skills the candidate holds in this category count.
    #[serde(default)]
    pub category: Option<SkillCategory>,
    #[serde(default = "SkillRequirement::default_min_level")]
    pub min_level: SkillLevel,
}

impl SkillRequirement {
    fn default_min_level() -> SkillLevel {
        SkillLevel::Beginner
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageRequirement {
    pub name: String,
    #[serde(default)]
    pub min_proficiency: RequiredProficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opportunity {
    pub id: Option<i64>,
    pub required_experience_years: Option<f64>,
    pub required_skills: Vec<SkillRequirement>,
    pub required_languages: Vec<LanguageRequirement>,
    /// Required weekly schedule, one interval per listed day.
    pub schedule: Vec<AvailabilitySlot>,
    /// Industry/category the gig belongs to.
    pub category: Option<String>,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub expected_conversion_rate: Option<f64>,
}
