//! Core domain types for the workout tracker.
//!
//! This module defines:
//! - Weekdays and the static plan (day → group → pair)
//! - Per-week logged data (completion flags and weights)

use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Days
// ============================================================================

/// Day of the plan week, ordered Monday first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Three-letter tab label
    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }

    pub fn today() -> Day {
        Local::now().weekday().into()
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Day {
    type Err = crate::Error;

    /// Accepts full names or three-letter abbreviations, any case
    fn from_str(s: &str) -> crate::Result<Self> {
        let wanted = s.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| {
                let name = d.name().to_lowercase();
                wanted == name || wanted == name[..3]
            })
            .ok_or_else(|| crate::Error::Other(format!("Unknown day: {}", s)))
    }
}

// ============================================================================
// Plan Types
// ============================================================================

/// One row of a group: a straight set or a superset of two exercises
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExercisePair {
    pub primary: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::catalog::deserialize_secondary"
    )]
    pub secondary: Option<String>,
    pub reps: String,
    pub rest: String,
}

/// A block of pairs performed for the same number of working sets
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseGroup {
    pub name: String,
    pub sets: u32,
    pub rpe: String,
    pub pairs: Vec<ExercisePair>,
}

/// Everything planned for one weekday
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub sessions: Vec<String>,
    #[serde(default)]
    pub groups: Vec<ExerciseGroup>,
}

impl DayPlan {
    /// A day with no exercise groups
    pub fn is_rest_day(&self) -> bool {
        self.groups.is_empty()
    }

    /// Working sets for the day: sets × pairs summed over groups
    pub fn total_sets(&self) -> u32 {
        self.groups
            .iter()
            .map(|g| g.sets * g.pairs.len() as u32)
            .sum()
    }
}

/// The weekly plan: one `DayPlan` per weekday
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanCatalog {
    /// One-line description used in the report preamble
    pub summary: String,
    pub days: BTreeMap<Day, DayPlan>,
}

/// Effort band derived from an RPE descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

impl Intensity {
    /// "9" anywhere wins over "8"; everything else is low
    pub fn from_rpe(rpe: &str) -> Self {
        if rpe.contains('9') {
            Intensity::High
        } else if rpe.contains('8') {
            Intensity::Moderate
        } else {
            Intensity::Low
        }
    }
}

// ============================================================================
// Logged Data
// ============================================================================

/// Everything logged for one week, keyed by entry key
///
/// Weights are kept as the text the user typed; they are never parsed.
/// Both maps keep entries in the order they were first written.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekData {
    #[serde(default, alias = "checked")]
    pub completion: IndexMap<String, bool>,
    #[serde(default)]
    pub weights: IndexMap<String, String>,
}

impl WeekData {
    pub fn is_complete(&self, key: &str) -> bool {
        self.completion.get(key).copied().unwrap_or(false)
    }

    /// Recorded weight, treating an empty string as absent
    pub fn weight(&self, key: &str) -> Option<&str> {
        self.weights
            .get(key)
            .map(String::as_str)
            .filter(|w| !w.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parse() {
        assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("Sun".parse::<Day>().unwrap(), Day::Sunday);
        assert_eq!(" THU ".parse::<Day>().unwrap(), Day::Thursday);
        assert!("Funday".parse::<Day>().is_err());
    }

    #[test]
    fn test_day_ordering_is_monday_first() {
        let mut days = vec![Day::Sunday, Day::Wednesday, Day::Monday];
        days.sort();
        assert_eq!(days, vec![Day::Monday, Day::Wednesday, Day::Sunday]);
        assert_eq!(Day::from(Weekday::Sun), Day::Sunday);
    }

    #[test]
    fn test_intensity_from_rpe() {
        assert_eq!(Intensity::from_rpe("RPE 8–9"), Intensity::High);
        assert_eq!(Intensity::from_rpe("RPE 7→8"), Intensity::Moderate);
        assert_eq!(Intensity::from_rpe("RPE 7"), Intensity::Low);
    }

    #[test]
    fn test_week_data_accepts_legacy_checked() {
        let data: WeekData =
            serde_json::from_str(r#"{"checked": {"Monday-0-0-A": true}}"#).unwrap();
        assert!(data.is_complete("Monday-0-0-A"));
        assert!(data.weights.is_empty());
    }

    #[test]
    fn test_week_data_keeps_written_order() {
        let data: WeekData = serde_json::from_str(
            r#"{"weights": {"Monday-0-0-A": "80", "Friday-0-0-A": "140", "Monday-0-0-B": "60"}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = data.weights.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Monday-0-0-A", "Friday-0-0-A", "Monday-0-0-B"]);
        assert_eq!(
            serde_json::to_string(&data.weights).unwrap(),
            r#"{"Monday-0-0-A":"80","Friday-0-0-A":"140","Monday-0-0-B":"60"}"#
        );
    }

    #[test]
    fn test_empty_weight_is_absent() {
        let mut data = WeekData::default();
        data.weights.insert("k".into(), String::new());
        assert_eq!(data.weight("k"), None);
        data.weights.insert("k".into(), "80".into());
        assert_eq!(data.weight("k"), Some("80"));
    }
}
