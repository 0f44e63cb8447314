//! Cardio session parsing for the free-text session slots of a day.
//!
//! A slot like `Evening 6–7pm (Cardio LISS 45')` is split into its time of
//! day, the parenthesised cardio type, and a duration, and turned into a
//! short coaching instruction.

use crate::keys::EntryKey;
use crate::{Day, DayPlan};

const CARDIO_MARKERS: [&str; 3] = ["cardio", "liss", "hiit"];

/// Fixed interval prescription for HIIT, whatever duration the slot names
pub const HIIT_INSTRUCTION: &str = "8–10 × 30s/60s";

/// Kind of cardio named in a session slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardioStyle {
    Hiit,
    Liss,
    Other,
}

/// A session slot recognised as cardio
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardioSession {
    /// Text before the first parenthesis, if any
    pub time_of_day: Option<String>,
    /// Parenthesised phrase, or the whole slot when there is none
    pub kind: String,
    pub style: CardioStyle,
    /// First run of digits in `kind`
    pub duration_minutes: Option<u32>,
    pub instruction: String,
}

/// Parse a session slot; `None` when it is not a cardio session
pub fn parse_session(label: &str) -> Option<CardioSession> {
    let lower = label.to_lowercase();
    if !CARDIO_MARKERS.iter().any(|m| lower.contains(m)) {
        return None;
    }

    let (time_of_day, kind) = match label.find('(') {
        Some(open) => {
            let before = label[..open].trim();
            let rest = &label[open + 1..];
            let inner = match rest.find(')') {
                Some(close) => &rest[..close],
                None => rest,
            };
            let time = (!before.is_empty()).then(|| before.to_string());
            (time, inner.trim().to_string())
        }
        None => (None, label.trim().to_string()),
    };

    let kind_upper = kind.to_uppercase();
    let style = if kind_upper.contains("HIIT") {
        CardioStyle::Hiit
    } else if kind_upper.contains("LISS") {
        CardioStyle::Liss
    } else {
        CardioStyle::Other
    };

    let duration_minutes = first_number(&kind);

    let instruction = match style {
        CardioStyle::Hiit => HIIT_INSTRUCTION.to_string(),
        CardioStyle::Liss => match duration_minutes {
            Some(minutes) => format!("{}' continuous at 60–70% max heart rate", minutes),
            None => "Continuous at 60–70% max heart rate".to_string(),
        },
        CardioStyle::Other => kind.clone(),
    };

    Some(CardioSession {
        time_of_day,
        kind,
        style,
        duration_minutes,
        instruction,
    })
}

/// Cardio sessions of a day with their completion keys
///
/// Keys number the cardio sessions alone, so non-cardio slots do not shift them.
pub fn cardio_sessions(day: Day, plan: &DayPlan) -> Vec<(EntryKey, CardioSession)> {
    plan.sessions
        .iter()
        .filter_map(|s| parse_session(s))
        .enumerate()
        .map(|(i, c)| (EntryKey::cardio(day, i), c))
        .collect()
}

fn first_number(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    #[test]
    fn test_liss_slot() {
        let session = parse_session("Evening 6–7pm (Cardio LISS 45')").unwrap();
        assert_eq!(session.time_of_day.as_deref(), Some("Evening 6–7pm"));
        assert_eq!(session.kind, "Cardio LISS 45'");
        assert_eq!(session.style, CardioStyle::Liss);
        assert_eq!(session.duration_minutes, Some(45));
        assert_eq!(session.instruction, "45' continuous at 60–70% max heart rate");
    }

    #[test]
    fn test_hiit_ignores_duration() {
        let session = parse_session("Evening 6–7pm (Cardio HIIT 30')").unwrap();
        assert_eq!(session.style, CardioStyle::Hiit);
        assert_eq!(session.duration_minutes, Some(30));
        assert_eq!(session.instruction, HIIT_INSTRUCTION);
    }

    #[test]
    fn test_trailing_text_after_parenthesis() {
        let session = parse_session("Evening 6–7pm (Cardio LISS 45') optional").unwrap();
        assert_eq!(session.kind, "Cardio LISS 45'");
        assert_eq!(session.duration_minutes, Some(45));
    }

    #[test]
    fn test_non_cardio_slots() {
        for label in [
            "Noon 12–1pm",
            "Tennis 2h",
            "Gym 50–60'",
            "Optional: bodyweight circuit 20–30' at home",
            "Light walk 20–30' if desired",
        ] {
            assert!(parse_session(label).is_none(), "{}", label);
        }
    }

    #[test]
    fn test_other_cardio_passes_kind_through() {
        let session = parse_session("cardio bike 20'").unwrap();
        assert_eq!(session.time_of_day, None);
        assert_eq!(session.style, CardioStyle::Other);
        assert_eq!(session.instruction, "cardio bike 20'");
    }

    #[test]
    fn test_catalog_cardio_keys() {
        let catalog = default_catalog();
        let monday = cardio_sessions(Day::Monday, &catalog.days[&Day::Monday]);
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].0.as_str(), "Monday-cardio-0");
        assert_eq!(monday[0].1.style, CardioStyle::Liss);
        assert!(cardio_sessions(Day::Saturday, &catalog.days[&Day::Saturday]).is_empty());
    }

    #[test]
    fn test_cardio_keys_skip_non_cardio_slots() {
        let plan = DayPlan {
            label: "Mixed".into(),
            icon: String::new(),
            note: String::new(),
            sessions: vec![
                "Noon 12–1pm".into(),
                "Morning (Cardio HIIT 20')".into(),
                "Gym 50–60'".into(),
                "Evening (Cardio LISS 30')".into(),
            ],
            groups: Vec::new(),
        };
        let keys: Vec<String> = cardio_sessions(Day::Thursday, &plan)
            .into_iter()
            .map(|(key, _)| key.to_string())
            .collect();
        assert_eq!(keys, vec!["Thursday-cardio-0", "Thursday-cardio-1"]);
    }
}
