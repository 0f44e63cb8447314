//! Progress store: week identifier → logged data.
//!
//! Every mutation copies the affected week, applies the change, and rewrites
//! the whole store through the injected [`StorageBackend`]. The in-memory
//! state only changes once the write succeeds. Loading never fails: a missing
//! or corrupt value is an empty store.

use crate::storage::{StorageBackend, STORAGE_KEY};
use crate::{ImportError, Result, WeekData, WeekId};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Message shown after a successful import
pub const IMPORT_SUCCESS_MESSAGE: &str = "Imported successfully";

/// All logged weeks plus the backend they persist to
pub struct ProgressStore<B: StorageBackend> {
    weeks: BTreeMap<WeekId, WeekData>,
    backend: B,
    empty: WeekData,
}

impl<B: StorageBackend> ProgressStore<B> {
    /// Load the store from `backend`
    ///
    /// Returns an empty store if nothing was saved yet.
    /// If the saved value is unreadable or corrupt, logs a warning and
    /// returns an empty store.
    pub fn load(backend: B) -> Self {
        let weeks = match backend.read(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<BTreeMap<WeekId, WeekData>>(&raw) {
                Ok(weeks) => {
                    tracing::debug!("Loaded {} weeks of progress", weeks.len());
                    weeks
                }
                Err(e) => {
                    tracing::warn!("Failed to parse saved progress: {}. Starting empty.", e);
                    BTreeMap::new()
                }
            },
            Ok(None) => {
                tracing::info!("No saved progress found, starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!("Unable to read saved progress: {}. Starting empty.", e);
                BTreeMap::new()
            }
        };

        Self::from_weeks(weeks, backend)
    }

    /// Wrap existing data without touching the backend
    pub fn from_weeks(weeks: BTreeMap<WeekId, WeekData>, backend: B) -> Self {
        Self {
            weeks,
            backend,
            empty: WeekData::default(),
        }
    }

    /// Every stored week, oldest first
    pub fn weeks(&self) -> &BTreeMap<WeekId, WeekData> {
        &self.weeks
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Data for a week, or an empty record (not written back)
    pub fn get(&self, week: &WeekId) -> &WeekData {
        self.weeks.get(week).unwrap_or(&self.empty)
    }

    /// Weight logged for the same key in the previous week
    pub fn last_weight(&self, week: &WeekId, key: &str) -> Option<&str> {
        self.weeks.get(&week.previous()).and_then(|w| w.weight(key))
    }

    pub fn set_completion(&mut self, week: WeekId, key: &str, value: bool) -> Result<()> {
        self.update_week(week, |data| {
            data.completion.insert(key.to_string(), value);
        })
    }

    /// Flip a completion flag, returning the new value
    pub fn toggle_completion(&mut self, week: WeekId, key: &str) -> Result<bool> {
        let value = !self.get(&week).is_complete(key);
        self.set_completion(week, key, value)?;
        Ok(value)
    }

    pub fn set_weight(&mut self, week: WeekId, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.update_week(week, |data| {
            data.weights.insert(key.to_string(), value);
        })
    }

    /// Replace imported weeks wholesale, leaving the others untouched
    ///
    /// Returns the number of weeks written.
    pub fn merge_import(&mut self, imported: BTreeMap<WeekId, WeekData>) -> Result<usize> {
        let count = imported.len();
        let mut weeks = self.weeks.clone();
        weeks.extend(imported);
        self.commit(weeks)?;
        tracing::info!("Imported {} weeks", count);
        Ok(count)
    }

    /// Parse an export and merge it; nothing changes if parsing fails
    pub fn import_json(&mut self, text: &str) -> Result<usize> {
        let imported = parse_import(text)?;
        self.merge_import(imported)
    }

    fn update_week<F>(&mut self, week: WeekId, f: F) -> Result<()>
    where
        F: FnOnce(&mut WeekData),
    {
        let mut data = self.get(&week).clone();
        f(&mut data);
        let mut weeks = self.weeks.clone();
        weeks.insert(week, data);
        self.commit(weeks)
    }

    /// Write `weeks` to the backend, then make it the current state
    fn commit(&mut self, weeks: BTreeMap<WeekId, WeekData>) -> Result<()> {
        let contents = serde_json::to_string(&weeks)?;
        if let Err(e) = self.backend.write(STORAGE_KEY, &contents) {
            tracing::warn!("Failed to save progress: {}", e);
            return Err(e);
        }
        self.weeks = weeks;
        Ok(())
    }
}

/// Parse the `weeks` object of a JSON export
///
/// Missing `completion`/`weights` maps (or a non-object week) become empty.
/// The legacy `checked` field is read as `completion`. Anything else in the
/// document, such as `exerciseHistory`, is ignored.
pub fn parse_import(text: &str) -> std::result::Result<BTreeMap<WeekId, WeekData>, ImportError> {
    let document: Value = serde_json::from_str(text)?;
    let weeks = document
        .get("weeks")
        .and_then(Value::as_object)
        .ok_or(ImportError::MissingWeeks)?;

    let mut normalized = BTreeMap::new();
    for (raw_id, row) in weeks {
        let week: WeekId = raw_id
            .parse()
            .map_err(|_| ImportError::WeekId(raw_id.clone()))?;
        let data = match row.as_object() {
            Some(fields) => normalize_week(raw_id, fields)?,
            None => WeekData::default(),
        };
        normalized.insert(week, data);
    }

    Ok(normalized)
}

fn normalize_week(week: &str, fields: &Map<String, Value>) -> std::result::Result<WeekData, ImportError> {
    let malformed = |reason: String| ImportError::MalformedWeek {
        week: week.to_string(),
        reason,
    };

    let mut data = WeekData::default();

    let completion = fields.get("completion").or_else(|| fields.get("checked"));
    if let Some(map) = completion.and_then(Value::as_object) {
        for (key, value) in map {
            let flag = value
                .as_bool()
                .ok_or_else(|| malformed(format!("completion for '{}' is not a boolean", key)))?;
            data.completion.insert(key.clone(), flag);
        }
    }

    if let Some(map) = fields.get("weights").and_then(Value::as_object) {
        for (key, value) in map {
            let weight = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err(malformed(format!("weight for '{}' is not text", key))),
            };
            data.weights.insert(key.clone(), weight);
        }
    }

    Ok(data)
}
