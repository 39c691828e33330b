//! Ordered proficiency ladders used by the skill and language scorers.

pub mod language;
pub mod skill_level;

pub use language::{LanguageProficiency, RequiredProficiency};
pub use skill_level::SkillLevel;
