//! Entry keys: the stable strings that join the plan to per-week logs.
//!
//! Exercise slots use `{day}-{group}-{pair}-{A|B}` and cardio sessions use
//! `{day}-cardio-{index}`, where the index counts cardio sessions only. The
//! same key recurs every week.

use crate::completion::has_second_exercise;
use crate::{Day, DayPlan};
use std::fmt;

/// Which exercise of a pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    fn letter(&self) -> char {
        match self {
            Slot::A => 'A',
            Slot::B => 'B',
        }
    }
}

/// Key for one loggable checkbox / weight field
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(String);

impl EntryKey {
    pub fn exercise(day: Day, group: usize, pair: usize, slot: Slot) -> Self {
        EntryKey(format!("{}-{}-{}-{}", day, group, pair, slot.letter()))
    }

    pub fn cardio(day: Day, index: usize) -> Self {
        EntryKey(format!("{}-cardio-{}", day, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for EntryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EntryKey> for String {
    fn from(key: EntryKey) -> Self {
        key.0
    }
}

/// One exercise position within a day's plan
#[derive(Clone, Debug)]
pub struct ExerciseSlot<'a> {
    pub key: EntryKey,
    pub name: &'a str,
    pub group: usize,
    pub pair: usize,
    pub slot: Slot,
}

/// Every exercise slot of a day in plan order (A before B within a pair)
///
/// B slots only exist for supersets.
pub fn exercise_slots(day: Day, plan: &DayPlan) -> Vec<ExerciseSlot<'_>> {
    let mut slots = Vec::new();
    for (gi, group) in plan.groups.iter().enumerate() {
        for (pi, pair) in group.pairs.iter().enumerate() {
            slots.push(ExerciseSlot {
                key: EntryKey::exercise(day, gi, pi, Slot::A),
                name: &pair.primary,
                group: gi,
                pair: pi,
                slot: Slot::A,
            });
            if has_second_exercise(pair) {
                if let Some(secondary) = pair.secondary.as_deref() {
                    slots.push(ExerciseSlot {
                        key: EntryKey::exercise(day, gi, pi, Slot::B),
                        name: secondary,
                        group: gi,
                        pair: pi,
                        slot: Slot::B,
                    });
                }
            }
        }
    }
    slots
}
