//! Progress reports: a Markdown outline and the JSON export.
//!
//! The JSON export is also the import format; only its `weeks` object is read
//! back; `exerciseHistory` is derived.

use crate::catalog::KeyIndex;
use crate::history::{exercise_history, recent_weeks, ExerciseHistory, HISTORY_WEEKS};
use crate::keys::exercise_slots;
use crate::{PlanCatalog, Result, WeekData, WeekId};
use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder for a missing weight or an unchecked entry
const MISSING: &str = "—";

/// Report knobs, normally taken from the `[report]` config section
#[derive(Clone, Debug)]
pub struct ReportOptions {
    /// Stored weeks covered by the Markdown report and exercise history
    pub history_weeks: usize,
    /// Unit suffix printed after weights
    pub weight_unit: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            history_weeks: HISTORY_WEEKS,
            weight_unit: "kg".into(),
        }
    }
}

/// One exported week: the logged data plus its date range
#[derive(Clone, Debug, Serialize)]
pub struct LabeledWeek {
    #[serde(flatten)]
    pub data: WeekData,
    pub label: String,
}

/// The JSON export document
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    /// Every stored week, newest first
    #[serde(serialize_with = "serialize_week_list")]
    pub weeks: Vec<(WeekId, LabeledWeek)>,
    pub exercise_history: ExerciseHistory,
}

impl JsonReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn serialize_week_list<S: Serializer>(
    weeks: &[(WeekId, LabeledWeek)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(weeks.len()))?;
    for (id, week) in weeks {
        map.serialize_entry(&id.to_string(), week)?;
    }
    map.end()
}

/// Builds reports against one catalog; the key index is built once
pub struct ReportBuilder<'a> {
    catalog: &'a PlanCatalog,
    index: KeyIndex,
    options: ReportOptions,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(catalog: &'a PlanCatalog, options: ReportOptions) -> Self {
        Self {
            catalog,
            index: KeyIndex::build(catalog),
            options,
        }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Weights per exercise over the configured number of stored weeks
    pub fn exercise_history(&self, weeks: &BTreeMap<WeekId, WeekData>) -> ExerciseHistory {
        exercise_history(weeks, &self.index, self.options.history_weeks)
    }

    /// Plain-text report of the most recent stored weeks
    pub fn markdown(&self, weeks: &BTreeMap<WeekId, WeekData>, export_date: NaiveDate) -> String {
        let unit = &self.options.weight_unit;
        let mut lines: Vec<String> = vec![
            "# Workout plan progress report".into(),
            String::new(),
            format!("Export date: {}", export_date.format("%Y-%m-%d")),
            String::new(),
            format!("Plan: {}", self.catalog.summary),
            String::new(),
        ];

        for (id, data) in recent_weeks(weeks, self.options.history_weeks) {
            lines.push(format!("## Week {} ({})", id, id.label()));
            lines.push(String::new());

            for (day, plan) in &self.catalog.days {
                if plan.is_rest_day() {
                    continue;
                }
                let items: Vec<String> = exercise_slots(*day, plan)
                    .iter()
                    .map(|slot| {
                        let key = slot.key.as_str();
                        format!(
                            "{} {} {} {}",
                            slot.name,
                            data.weights.get(key).map(String::as_str).unwrap_or(MISSING),
                            unit,
                            if data.is_complete(key) { "done" } else { MISSING }
                        )
                    })
                    .collect();

                lines.push(format!("### {} — {}", day, plan.label));
                lines.push(format!("{}.", items.join("; ")));
                lines.push(String::new());
            }
        }

        lines.push(format!(
            "## Progress by exercise (last {} weeks, newest first)",
            self.options.history_weeks
        ));
        lines.push(String::new());
        for (name, weights) in self.exercise_history(weeks).iter() {
            lines.push(format!("- **{}**: {} {}", name, weights.join(", "), unit));
        }

        lines.join("\n")
    }

    /// Every stored week with its label, plus exercise history
    pub fn json(&self, weeks: &BTreeMap<WeekId, WeekData>) -> JsonReport {
        let labeled = weeks
            .iter()
            .rev()
            .map(|(id, data)| {
                (
                    *id,
                    LabeledWeek {
                        data: data.clone(),
                        label: id.label(),
                    },
                )
            })
            .collect();

        JsonReport {
            weeks: labeled,
            exercise_history: self.exercise_history(weeks),
        }
    }
}

/// Markdown report with default options
pub fn markdown_report(
    catalog: &PlanCatalog,
    weeks: &BTreeMap<WeekId, WeekData>,
    export_date: NaiveDate,
) -> String {
    ReportBuilder::new(catalog, ReportOptions::default()).markdown(weeks, export_date)
}

/// JSON report with default options
pub fn json_report(catalog: &PlanCatalog, weeks: &BTreeMap<WeekId, WeekData>) -> JsonReport {
    ReportBuilder::new(catalog, ReportOptions::default()).json(weeks)
}
