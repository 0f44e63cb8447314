//! Cross-week exercise history.
//!
//! Looks at the most recent weeks *present in the store* (not the most recent
//! calendar weeks) and collects recorded weights per exercise name, newest
//! week first.

use crate::catalog::KeyIndex;
use crate::{WeekData, WeekId};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default number of stored weeks looked at by history and the text report
pub const HISTORY_WEEKS: usize = 8;

/// Exercise name → weights, names kept in first-seen order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExerciseHistory {
    entries: IndexMap<String, Vec<String>>,
}

impl ExerciseHistory {
    fn push(&mut self, name: &str, weight: &str) {
        self.entries
            .entry(name.to_string())
            .or_default()
            .push(weight.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(n, w)| (n.as_str(), w.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The `limit` newest stored weeks, newest first
pub fn recent_weeks(
    weeks: &BTreeMap<WeekId, WeekData>,
    limit: usize,
) -> impl Iterator<Item = (&WeekId, &WeekData)> {
    weeks.iter().rev().take(limit)
}

/// Weights per exercise over the `limit` newest stored weeks
///
/// Within a week, entries are visited in the order they were written. Empty
/// weights and keys the catalog does not know (cardio, stale keys) are skipped.
pub fn exercise_history(
    weeks: &BTreeMap<WeekId, WeekData>,
    index: &KeyIndex,
    limit: usize,
) -> ExerciseHistory {
    let mut history = ExerciseHistory::default();

    for (_, data) in recent_weeks(weeks, limit) {
        for (key, weight) in &data.weights {
            if weight.is_empty() {
                continue;
            }
            if let Some(name) = index.name(key) {
                history.push(name, weight);
            }
        }
    }

    history
}
