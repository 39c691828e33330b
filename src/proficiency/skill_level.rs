use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::normalize::normalize_identifier;

/// Skill proficiency on the 0–5 ladder.
///
/// Accepts both the numeric scale and the categorical names on input;
/// serializes as the categorical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SkillLevel {
    #[default]
    Unrated = 0,
    Beginner = 1,
    Novice = 2,
    Intermediate = 3,
    Advanced = 4,
    Expert = 5,
}

impl SkillLevel {
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Unrated),
            1 => Some(Self::Beginner),
            2 => Some(Self::Novice),
            3 => Some(Self::Intermediate),
            4 => Some(Self::Advanced),
            5 => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        if let Ok(rank) = input.trim().parse::<u8>() {
            return Self::from_rank(rank);
        }
        match normalize_identifier(input).as_str() {
            "unrated" | "none" => Some(Self::Unrated),
            "beginner" => Some(Self::Beginner),
            "novice" | "basic" => Some(Self::Novice),
            "intermediate" | "mid" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" | "master" => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unrated => "unrated",
            Self::Beginner => "beginner",
            Self::Novice => "novice",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SkillLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelVisitor;

        impl de::Visitor<'_> for LevelVisitor {
            type Value = SkillLevel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a skill level 0-5 or a categorical name (beginner..expert)")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(SkillLevel::from_rank)
                    .ok_or_else(|| E::custom(format!("skill level out of range: {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("skill level out of range: {v}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                SkillLevel::parse(v).ok_or_else(|| E::custom(format!("unknown skill level: {v:?}")))
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(SkillLevel::Expert > SkillLevel::Advanced);
        assert!(SkillLevel::Beginner > SkillLevel::Unrated);
        assert_eq!(SkillLevel::Intermediate.rank(), 3);
    }

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!(SkillLevel::parse("Advanced"), Some(SkillLevel::Advanced));
        assert_eq!(SkillLevel::parse("basic"), Some(SkillLevel::Novice));
        assert_eq!(SkillLevel::parse("4"), Some(SkillLevel::Advanced));
        assert_eq!(SkillLevel::parse("guru"), None);
        assert_eq!(SkillLevel::parse("9"), None);
    }

    #[test]
    fn deserializes_both_representations() {
        assert_eq!(
            serde_json::from_str::<SkillLevel>("\"expert\"").unwrap(),
            SkillLevel::Expert
        );
        assert_eq!(
            serde_json::from_str::<SkillLevel>("2").unwrap(),
            SkillLevel::Novice
        );
        assert!(serde_json::from_str::<SkillLevel>("7").is_err());
        assert_eq!(
            serde_json::to_string(&SkillLevel::Advanced).unwrap(),
            "\"advanced\""
        );
    }
}
