//! Default weekly plan and catalog loading/validation.
//!
//! The built-in plan is a five-day split with a tennis Saturday and a rest
//! Sunday. A custom plan can be loaded from a TOML file instead.

use crate::keys::exercise_slots;
use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Strings that older plan data used to mean "no second exercise"
pub const NO_EXERCISE_MARKERS: [&str; 4] = ["—", "–", "-", ""];

/// Cached default catalog, built once
static DEFAULT_CATALOG: Lazy<PlanCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static PlanCatalog {
    &DEFAULT_CATALOG
}

/// Map a secondary-exercise string from legacy data to an optional name
///
/// Dash markers and blank strings become `None`.
pub fn from_legacy_secondary(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if NO_EXERCISE_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Serde helper so plan files may spell "no second exercise" as a dash
pub(crate) fn deserialize_secondary<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(from_legacy_secondary))
}

fn pair(primary: &str, secondary: &str, reps: &str, rest: &str) -> ExercisePair {
    ExercisePair {
        primary: primary.into(),
        secondary: from_legacy_secondary(secondary),
        reps: reps.into(),
        rest: rest.into(),
    }
}

fn group(name: &str, sets: u32, rpe: &str, pairs: Vec<ExercisePair>) -> ExerciseGroup {
    ExerciseGroup {
        name: name.into(),
        sets,
        rpe: rpe.into(),
        pairs,
    }
}

fn day(label: &str, icon: &str, note: &str, sessions: &[&str], groups: Vec<ExerciseGroup>) -> DayPlan {
    DayPlan {
        label: label.into(),
        icon: icon.into(),
        note: note.into(),
        sessions: sessions.iter().map(|s| s.to_string()).collect(),
        groups,
    }
}

/// Builds the built-in five-day split
pub fn build_default_catalog() -> PlanCatalog {
    let mut days = BTreeMap::new();

    days.insert(
        Day::Monday,
        day(
            "Chest + Back + Abs",
            "🫁🔙🔥",
            "Antagonist superset — chest & back never compete",
            &["Noon 12–1pm", "Evening 6–7pm (Cardio LISS 45')"],
            vec![
                group(
                    "SUPERSET A — Chest / Back",
                    3,
                    "RPE 7→8",
                    vec![
                        pair("Bench Press", "Bent Over Row", "8–10", "60s after pair"),
                        pair("Incline DB Press", "Seated Cable Row", "10–12", "60s after pair"),
                    ],
                ),
                group(
                    "SUPERSET B — Chest Isolation / Back Isolation",
                    2,
                    "RPE 8",
                    vec![pair("Cable Fly (mid-chest)", "Lat Pulldown", "12–15", "45s after pair")],
                ),
                group(
                    "CIRCUIT — Abs (no rest between)",
                    2,
                    "RPE 8–9",
                    vec![pair("Hanging Leg Raise", "Cable Crunch", "15–20", "45s after circuit")],
                ),
            ],
        ),
    );

    days.insert(
        Day::Tuesday,
        day(
            "Shoulders + Arms + Core",
            "💪💪🔥",
            "Shoulders first when fresh, arms benefit from pre-fatigue",
            &["Noon 12–1pm", "Evening 6–7pm (Cardio HIIT 30')"],
            vec![
                group(
                    "SUPERSET A — Shoulders / Biceps (compound)",
                    3,
                    "RPE 7–8",
                    vec![pair("Overhead Press", "Barbell Curl", "8–10 / 8–10", "90s after pair")],
                ),
                group(
                    "SUPERSET B — Shoulders / Biceps",
                    2,
                    "RPE 8",
                    vec![
                        pair("Lateral Raise", "Hammer Curl", "12–15", "45s after pair"),
                        pair("Rear Delt Fly", "Cable Curl", "12–15", "45s after pair"),
                    ],
                ),
                group(
                    "SUPERSET C — Triceps / Biceps",
                    2,
                    "RPE 8–9",
                    vec![
                        pair("Tricep Pushdown", "Incline DB Curl", "12–15", "45s after pair"),
                        pair("Skull Crusher", "—", "10–12", "45s"),
                    ],
                ),
            ],
        ),
    );

    days.insert(
        Day::Wednesday,
        day(
            "Legs + Glutes + Calves",
            "🦵🍑",
            "Drop set on last set of Squat & RDL for maximum stimulus",
            &["Noon 12–1pm", "Evening 6–7pm (Cardio LISS 45')"],
            vec![
                group(
                    "COMPOUND — Quad Dominant",
                    3,
                    "RPE 7→9 (last set drop set)",
                    vec![pair("Squat", "—", "8–10 → drop 20% → failure", "120s")],
                ),
                group(
                    "SUPERSET A — Hamstring / Quad",
                    3,
                    "RPE 8",
                    vec![pair("Romanian Deadlift", "Leg Press", "10–12", "60s after pair")],
                ),
                group(
                    "SUPERSET B — Hamstring Isolation / Glute",
                    2,
                    "RPE 8–9",
                    vec![pair("Lying Leg Curl (face down)", "Hip Thrust", "12–15", "45s after pair")],
                ),
                group(
                    "FINISHER — Calves (slow eccentric 3s down)",
                    3,
                    "RPE 9",
                    vec![
                        pair("Standing Calf Raise", "—", "15–20", "30s"),
                        pair("Seated Calf Raise", "—", "15–20", "30s"),
                    ],
                ),
            ],
        ),
    );

    days.insert(
        Day::Thursday,
        day(
            "Chest + Shoulders + Triceps",
            "🫁💪",
            "Push day — supersets where muscles don't overlap to save time",
            &["Noon 12–1pm", "Evening 6–7pm (Cardio HIIT 30')"],
            vec![
                group(
                    "SUPERSET A — Chest / Side Delt + OHP / Core",
                    3,
                    "RPE 7–8",
                    vec![
                        pair("Incline Bench Press", "Lateral Raise", "8–10 / 12–15", "60s after pair"),
                        pair("Overhead Press", "Plank (30–45s)", "8–10 / 30–45s", "60s after pair"),
                    ],
                ),
                group(
                    "SUPERSET B — Chest Isolation / Front Delt + Dips / Core",
                    2,
                    "RPE 8",
                    vec![
                        pair("Pec Deck / Cable Fly (mid-chest)", "Front Raise", "12–15 / 10–12", "45s after pair"),
                        pair("Dips", "Dead Bug (10 per side)", "10–12 / 10 per side", "45s after pair"),
                    ],
                ),
                group(
                    "STRAIGHT SETS — Triceps (drop set last set)",
                    2,
                    "RPE 8→9",
                    vec![
                        pair("Overhead Tricep Ext.", "—", "10–12 → drop → failure", "45s"),
                        pair("Tricep Pushdown", "—", "10–12 → drop → failure", "45s"),
                    ],
                ),
            ],
        ),
    );

    days.insert(
        Day::Friday,
        day(
            "Back + Biceps + Rear Delt",
            "🔙💪",
            "Pull day at gym — all pulling muscles, superset for max pump",
            &["Gym 50–60'", "Evening 6–7pm (Cardio LISS 45') optional"],
            vec![
                group(
                    "SUPERSET — Back Compound + Core",
                    3,
                    "RPE 7–8",
                    vec![pair("Deadlift / Rack Pull", "Plank (30–45s)", "6–8 / 30–45s", "120s after pair")],
                ),
                group(
                    "SUPERSET A — Back / Biceps",
                    3,
                    "RPE 8",
                    vec![
                        pair("Pull-up / Lat Pulldown", "Barbell Curl", "8–10", "60s after pair"),
                        pair("Cable Row", "Hammer Curl", "10–12", "45s after pair"),
                    ],
                ),
                group(
                    "SUPERSET B — Rear Delt / Biceps Isolation",
                    2,
                    "RPE 8–9",
                    vec![pair("Face Pull", "Incline DB Curl", "15–20", "45s after pair")],
                ),
            ],
        ),
    );

    days.insert(
        Day::Saturday,
        day(
            "Tennis + Home (no gym)",
            "🎾🏠",
            "No gym equipment — tennis 2h then optional bodyweight at home",
            &["Tennis 2h", "Optional: bodyweight circuit 20–30' at home"],
            vec![
                group(
                    "CIRCUIT A — Pull / Push (no equipment)",
                    2,
                    "RPE 7–8",
                    vec![pair("Inverted Row (table/bar)", "Push-up", "8–12", "45s after pair")],
                ),
                group(
                    "CIRCUIT B — Legs / Glutes",
                    2,
                    "RPE 7–8",
                    vec![pair("Bodyweight Squat", "Glute Bridge", "12–15", "45s after pair")],
                ),
                group(
                    "CIRCUIT C — Core (no rest between)",
                    2,
                    "RPE 8",
                    vec![pair("Plank", "Dead Bug", "30–45s / 10 per side", "30s after circuit")],
                ),
            ],
        ),
    );

    days.insert(
        Day::Sunday,
        day(
            "REST DAY",
            "😴",
            "Full recovery — muscles grow today, not in the gym",
            &["Light walk 20–30' if desired"],
            vec![],
        ),
    );

    PlanCatalog {
        summary: "5-day split — Mon Chest+Back+Abs, Tue Shoulders+Arms, Wed Legs+Glutes+Calves, \
                  Thu Push, Fri Pull, Sat Tennis+home, Sun Rest."
            .into(),
        days,
    }
}

impl PlanCatalog {
    /// Load a plan from a TOML file and validate it
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog: PlanCatalog = toml::from_str(&contents)?;

        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }

        tracing::info!("Loaded plan catalog from {:?}", path);
        Ok(catalog)
    }

    /// Plan for a day. Every validated catalog has all seven.
    pub fn day(&self, day: Day) -> Option<&DayPlan> {
        self.days.get(&day)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for day in Day::ALL {
            let Some(plan) = self.days.get(&day) else {
                errors.push(format!("Plan is missing {}", day));
                continue;
            };

            if plan.label.trim().is_empty() {
                errors.push(format!("{} has empty label", day));
            }

            for (gi, group) in plan.groups.iter().enumerate() {
                if group.name.trim().is_empty() {
                    errors.push(format!("{} group {} has empty name", day, gi));
                }
                if group.sets == 0 {
                    errors.push(format!("{} group '{}' has zero sets", day, group.name));
                }
                if group.pairs.is_empty() {
                    errors.push(format!("{} group '{}' has no exercises", day, group.name));
                }
                for (pi, pair) in group.pairs.iter().enumerate() {
                    if pair.primary.trim().is_empty() {
                        errors.push(format!(
                            "{} group '{}' pair {} has empty exercise name",
                            day, group.name, pi
                        ));
                    }
                }
            }
        }

        errors
    }
}

/// Entry key → exercise display name, built once per catalog
#[derive(Clone, Debug, Default)]
pub struct KeyIndex {
    names: HashMap<String, String>,
}

impl KeyIndex {
    pub fn build(catalog: &PlanCatalog) -> Self {
        let mut names: HashMap<String, String> = HashMap::new();
        for (day, plan) in &catalog.days {
            for slot in exercise_slots(*day, plan) {
                names.insert(slot.key.into(), slot.name.to_string());
            }
        }
        Self { names }
    }

    pub fn name(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(errors.is_empty(), "Validation errors: {:?}", errors);
        assert_eq!(catalog.days.len(), 7);
    }

    #[test]
    fn test_only_sunday_is_rest() {
        let catalog = default_catalog();
        for (day, plan) in &catalog.days {
            assert_eq!(plan.is_rest_day(), *day == Day::Sunday, "{}", day);
        }
    }

    #[test]
    fn test_legacy_dashes_become_none() {
        for marker in ["—", "–", "-", "", "  "] {
            assert_eq!(from_legacy_secondary(marker), None);
        }
        assert_eq!(from_legacy_secondary(" Leg Press "), Some("Leg Press".into()));

        let catalog = default_catalog();
        let squat = &catalog.days[&Day::Wednesday].groups[0].pairs[0];
        assert_eq!(squat.secondary, None);
    }

    #[test]
    fn test_total_sets() {
        let catalog = default_catalog();
        // 3×2 + 2×1 + 2×1
        assert_eq!(catalog.days[&Day::Monday].total_sets(), 10);
        assert_eq!(catalog.days[&Day::Sunday].total_sets(), 0);
    }

    #[test]
    fn test_key_index_resolves_names() {
        let index = KeyIndex::build(default_catalog());
        assert_eq!(index.name("Monday-0-0-A"), Some("Bench Press"));
        assert_eq!(index.name("Monday-0-0-B"), Some("Bent Over Row"));
        assert_eq!(index.name("Tuesday-2-1-B"), None);
        assert_eq!(index.name("Monday-cardio-0"), None);
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.toml");

        let mut toml_str = String::from("summary = \"Tiny plan\"\n");
        for day in Day::ALL {
            toml_str.push_str(&format!("\n[days.{}]\nlabel = \"{} work\"\n", day, day));
        }
        toml_str.push_str(
            r#"
[[days.Monday.groups]]
name = "Main"
sets = 3
rpe = "RPE 8"

[[days.Monday.groups.pairs]]
primary = "Front Squat"
secondary = "—"
reps = "5"
rest = "120s"
"#,
        );
        std::fs::write(&path, toml_str).unwrap();

        let catalog = PlanCatalog::load_from(&path).unwrap();
        let monday = catalog.day(Day::Monday).unwrap();
        assert_eq!(monday.groups[0].pairs[0].primary, "Front Squat");
        assert_eq!(monday.groups[0].pairs[0].secondary, None);
        assert!(catalog.day(Day::Tuesday).unwrap().is_rest_day());
    }

    #[test]
    fn test_load_from_rejects_incomplete_plan() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.toml");
        std::fs::write(&path, "summary = \"x\"\n[days.Monday]\nlabel = \"Only Monday\"\n").unwrap();

        let result = PlanCatalog::load_from(&path);
        assert!(matches!(result, Err(Error::CatalogValidation(_))));
    }
}
