use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

static TIME_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*[-–]\s*(\d{1,2}):(\d{2})\s*$").unwrap());

/// Day of week, Monday-first.
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
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    #[strum(to_string = "monday", serialize = "mon")]
    Monday,
    #[strum(to_string = "tuesday", serialize = "tue")]
    Tuesday,
    #[strum(to_string = "wednesday", serialize = "wed")]
    Wednesday,
    #[strum(to_string = "thursday", serialize = "thu")]
    Thursday,
    #[strum(to_string = "friday", serialize = "fri")]
    Friday,
    #[strum(to_string = "saturday", serialize = "sat")]
    Saturday,
    #[strum(to_string = "sunday", serialize = "sun")]
    Sunday,
}

/// Half-open daily interval in minutes from midnight.
///
/// Parsed from `"HH:MM-HH:MM"`; a malformed string is an
/// [`EngineError::InvalidSchedule`] at the boundary, so the scorers only ever
/// see well-formed ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeRange {
    start: u16,
    end: u16,
}

/// The whole day, used when a candidate lists a day without explicit hours.
pub const FULL_DAY: TimeRange = TimeRange { start: 0, end: 24 * 60 };

impl TimeRange {
    pub fn new(start: u16, end: u16) -> Result<Self, EngineError> {
        if start >= end || end > 24 * 60 {
            return Err(EngineError::InvalidSchedule(format!(
                "empty or out-of-range interval: start={start} end={end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start_minutes(&self) -> u16 {
        self.start
    }

    pub fn end_minutes(&self) -> u16 {
        self.end
    }

    /// True when `other` lies fully inside `self`.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

impl FromStr for TimeRange {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let caps = TIME_RANGE_RE
            .captures(raw)
            .ok_or_else(|| EngineError::InvalidSchedule(format!("unparseable interval: {raw:?}")))?;

        let field = |idx: usize| caps[idx].parse::<u16>().unwrap();
        let (sh, sm, eh, em) = (field(1), field(2), field(3), field(4));
        if sm >= 60 || em >= 60 || sh > 24 || eh > 24 {
            return Err(EngineError::InvalidSchedule(format!(
                "out-of-range time in interval: {raw:?}"
            )));
        }

        TimeRange::new(sh * 60 + sm, eh * 60 + em)
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// One explicit availability or requirement entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: Weekday,
    pub hours: TimeRange,
}

/// Per-day interval sets, the normal form both sides are compared in.
pub type WeekPlan = BTreeMap<Weekday, Vec<TimeRange>>;

/// Normalize a candidate's availability: explicit slots win, and a plain day
/// list contributes the whole day.
pub fn candidate_week(slots: &[AvailabilitySlot], days: &[Weekday]) -> WeekPlan {
    let mut plan: WeekPlan = BTreeMap::new();
    for slot in slots {
        plan.entry(slot.day).or_default().push(slot.hours);
    }
    for day in days {
        plan.entry(*day).or_insert_with(|| vec![FULL_DAY]);
    }
    for intervals in plan.values_mut() {
        intervals.sort();
        intervals.dedup();
    }
    plan
}

/// Normalize an opportunity's required schedule.
pub fn required_week(slots: &[AvailabilitySlot]) -> WeekPlan {
    let mut plan: WeekPlan = BTreeMap::new();
    for slot in slots {
        plan.entry(slot.day).or_default().push(slot.hours);
    }
    for intervals in plan.values_mut() {
        intervals.sort();
        intervals.dedup();
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> TimeRange {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats_intervals() {
        let r = range("09:00-18:00");
        assert_eq!(r.start_minutes(), 540);
        assert_eq!(r.end_minutes(), 1080);
        assert_eq!(r.to_string(), "09:00-18:00");
        assert_eq!(range(" 9:30 - 17:05 ").to_string(), "09:30-17:05");
    }

    #[test]
    fn rejects_malformed_intervals() {
        assert!("9am-5pm".parse::<TimeRange>().is_err());
        assert!("18:00-09:00".parse::<TimeRange>().is_err());
        assert!("09:75-10:00".parse::<TimeRange>().is_err());
        assert!("".parse::<TimeRange>().is_err());
    }

    #[test]
    fn containment_is_inclusive_of_bounds() {
        assert!(range("09:00-18:00").contains(&range("10:00-16:00")));
        assert!(range("09:00-18:00").contains(&range("09:00-18:00")));
        assert!(!range("09:00-18:00").contains(&range("08:00-12:00")));
    }

    #[test]
    fn day_list_becomes_full_day() {
        let plan = candidate_week(&[], &[Weekday::Monday]);
        assert_eq!(plan[&Weekday::Monday], vec![FULL_DAY]);
    }

    #[test]
    fn explicit_slots_win_over_day_list() {
        let slot = AvailabilitySlot {
            day: Weekday::Monday,
            hours: range("09:00-12:00"),
        };
        let plan = candidate_week(&[slot], &[Weekday::Monday, Weekday::Friday]);
        assert_eq!(plan[&Weekday::Monday], vec![range("09:00-12:00")]);
        assert_eq!(plan[&Weekday::Friday], vec![FULL_DAY]);
    }

    #[test]
    fn weekday_parses_short_names() {
        assert_eq!("Mon".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("sunday".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("noday".parse::<Weekday>().is_err());
    }

    #[test]
    fn time_range_roundtrips_through_serde() {
        let json = serde_json::to_string(&range("08:15-13:45")).unwrap();
        assert_eq!(json, "\"08:15-13:45\"");
        let back: TimeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range("08:15-13:45"));
        assert!(serde_json::from_str::<TimeRange>("\"25:00-26:00\"").is_err());
    }
}
