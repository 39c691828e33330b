use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::normalize::normalize_identifier;

/// Language proficiency on the CEFR-like ladder.
///
/// `C1` covers "professional working"; `Native` covers both "C2" and
/// "native or bilingual". The rank values feed the language scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageProficiency {
    A1,
    A2,
    B1,
    B2,
    C1,
    Native,
}

impl LanguageProficiency {
    pub fn rank(&self) -> f64 {
        match self {
            Self::A1 => 0.1,
            Self::A2 => 0.3,
            Self::B1 => 0.5,
            Self::B2 => 0.7,
            Self::C1 => 0.85,
            Self::Native => 1.0,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match normalize_identifier(input).as_str() {
            "a1" => Some(Self::A1),
            "a2" | "elementary" => Some(Self::A2),
            "b1" | "limitedworking" => Some(Self::B1),
            "b2" | "conversational" => Some(Self::B2),
            "c1" | "professionalworking" | "fullprofessional" | "fluent" => Some(Self::C1),
            "c2" | "native" | "bilingual" | "nativeorbilingual" => Some(Self::Native),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::Native => "native",
        }
    }
}

impl fmt::Display for LanguageProficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for LanguageProficiency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for LanguageProficiency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown language proficiency: {raw:?}")))
    }
}

/// An opportunity's minimum proficiency requirement.
///
/// Either an explicit CEFR level or one of the named tiers: "conversational"
/// accepts B2 and above, "professional" accepts C1 and above, "native"
/// accepts only native/C2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredProficiency {
    min: LanguageProficiency,
}

impl RequiredProficiency {
    pub fn at_least(min: LanguageProficiency) -> Self {
        Self { min }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let min = match normalize_identifier(input).as_str() {
            "conversational" => LanguageProficiency::B2,
            "professional" => LanguageProficiency::C1,
            "native" => LanguageProficiency::Native,
            _ => LanguageProficiency::parse(input)?,
        };
        Some(Self { min })
    }

    pub fn accepts(&self, proficiency: LanguageProficiency) -> bool {
        proficiency.rank() >= self.min.rank()
    }

    pub fn min_level(&self) -> LanguageProficiency {
        self.min
    }
}

impl Default for RequiredProficiency {
    fn default() -> Self {
        Self::at_least(LanguageProficiency::B2)
    }
}

impl fmt::Display for RequiredProficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+", self.min)
    }
}

impl Serialize for RequiredProficiency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.min.name())
    }
}

impl<'de> Deserialize<'de> for RequiredProficiency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown proficiency requirement: {raw:?}")))
    }
}
