//! Completion helpers: superset detection and day completion.

use crate::catalog::NO_EXERCISE_MARKERS;
use crate::keys::exercise_slots;
use crate::{Day, ExercisePair, PlanCatalog, WeekData};

/// True if the pair is a superset (has a real second exercise)
///
/// A missing secondary, a blank one, or one of the dash markers all mean a
/// straight set.
pub fn has_second_exercise(pair: &ExercisePair) -> bool {
    match pair.secondary.as_deref() {
        Some(name) => !NO_EXERCISE_MARKERS.contains(&name.trim()),
        None => false,
    }
}

/// True when every exercise slot of `day` is checked in `week`
///
/// Rest days are never complete. Cardio sessions do not count.
pub fn is_day_complete(catalog: &PlanCatalog, week: &WeekData, day: Day) -> bool {
    match catalog.day(day) {
        Some(plan) if !plan.is_rest_day() => exercise_slots(day, plan)
            .iter()
            .all(|slot| week.is_complete(slot.key.as_str())),
        _ => false,
    }
}

/// (checked, total) exercise slots for a day
pub fn day_progress(catalog: &PlanCatalog, week: &WeekData, day: Day) -> (usize, usize) {
    let Some(plan) = catalog.day(day) else {
        return (0, 0);
    };
    let slots = exercise_slots(day, plan);
    let done = slots
        .iter()
        .filter(|slot| week.is_complete(slot.key.as_str()))
        .count();
    (done, slots.len())
}
