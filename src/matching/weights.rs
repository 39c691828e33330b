use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::EngineError;

/// The closed set of comparison axes. This enum is the single registry key
/// shared by scoring, filtering, and reporting; criterion names in caller
/// payloads parse into it.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Criterion {
    Experience,
    Skills,
    Industry,
    Language,
    Availability,
    Timezone,
    Performance,
    Region,
}

pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A complete weight per criterion.
///
/// Resolved from a caller's partial map: unspecified criteria default to 1.0,
/// and a zero weight excludes a criterion from aggregation. No normalization
/// happens here; the aggregator divides by the sum of applied weights, so
/// callers may supply weights outside [0,1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    weights: BTreeMap<Criterion, f64>,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            weights: Criterion::iter().map(|c| (c, DEFAULT_WEIGHT)).collect(),
        }
    }
}

impl WeightVector {
    /// Merge a partial name→weight map over the defaults.
    pub fn resolve(partial: &HashMap<String, f64>) -> Result<Self, EngineError> {
        let mut resolved = Self::default();
        for (name, value) in partial {
            let criterion = name
                .parse::<Criterion>()
                .map_err(|_| EngineError::UnknownCriterion(name.clone()))?;
            resolved.set(criterion, *value)?;
        }
        Ok(resolved)
    }

    pub fn set(&mut self, criterion: Criterion, weight: f64) -> Result<(), EngineError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(EngineError::InvalidWeight {
                criterion: criterion.to_string(),
                value: weight,
            });
        }
        self.weights.insert(criterion, weight);
        Ok(())
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        self.weights.get(&criterion).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        self.weights.iter().map(|(c, w)| (*c, *w))
    }

    /// Criteria in descending weight order, ties broken by registry order.
    /// The prefilter processes criteria in this order.
    pub fn descending(&self) -> Vec<(Criterion, f64)> {
        let mut ordered: Vec<_> = self.iter().collect();
        ordered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ordered
    }

    /// Sum of the weights that actually take part in aggregation.
    pub fn applied_sum(&self) -> f64 {
        self.iter().filter(|(_, w)| *w > 0.0).map(|(_, w)| w).sum()
    }
}
