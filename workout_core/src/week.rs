//! Week identifier arithmetic.
//!
//! Weeks start on Monday. Identifiers look like `2025-W05` and sort
//! lexicographically in chronological order (year first, zero padded).
//!
//! Two different anchors are in play:
//! - [`week_id_for`] counts whole weeks from the Monday on or before January 1
//!   of the Monday's year.
//! - [`WeekId::monday`] (and so the label) counts from the Monday on or before
//!   January 4.
//!
//! The two disagree for some years and rollover is fixed at 52 weeks, so a
//! week-53 or week-54 identifier does not survive a `next()`/`previous()`
//! round trip. Week 54 only comes out of [`week_id_for`] for December 31 of a
//! leap year starting on a Sunday (2012, 2040).

use crate::{Error, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest week number accepted in an identifier
pub const MAX_WEEK: u32 = 54;

/// Week number that rolls over to week 1 of the next year
const ROLLOVER_WEEK: u32 = 52;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A `YYYY-Www` week identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekId {
    year: i32,
    week: u32,
}

impl WeekId {
    /// Build an identifier, rejecting years outside 1..=9999 and weeks outside 1..=54
    pub fn new(year: i32, week: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=MAX_WEEK).contains(&week) {
            return Err(Error::InvalidWeekId(format!("{:04}-W{:02}", year, week)));
        }
        Ok(Self { year, week })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// The week before this one. Week 1 goes to week 52 of the prior year.
    ///
    /// `0001-W01` has no predecessor and is returned unchanged.
    pub fn previous(&self) -> WeekId {
        if self.week == 1 && self.year == MIN_YEAR {
            *self
        } else if self.week == 1 {
            WeekId {
                year: self.year - 1,
                week: ROLLOVER_WEEK,
            }
        } else {
            WeekId {
                year: self.year,
                week: self.week - 1,
            }
        }
    }

    /// The week after this one. Weeks 52 and above go to week 1 of the next year.
    ///
    /// Year 9999 does not roll over; its last week is returned unchanged.
    pub fn next(&self) -> WeekId {
        if self.week >= ROLLOVER_WEEK && self.year == MAX_YEAR {
            *self
        } else if self.week >= ROLLOVER_WEEK {
            WeekId {
                year: self.year + 1,
                week: 1,
            }
        } else {
            WeekId {
                year: self.year,
                week: self.week + 1,
            }
        }
    }

    /// Monday of this week, anchored on the Monday on or before January 4
    pub fn monday(&self) -> NaiveDate {
        // Year is validated to 1..=9999 so January 4 always exists.
        let jan4 = NaiveDate::from_ymd_opt(self.year, 1, 4).unwrap_or(NaiveDate::MIN);
        monday_of(jan4) + Duration::weeks(i64::from(self.week) - 1)
    }

    /// Sunday closing this week
    pub fn sunday(&self) -> NaiveDate {
        self.monday() + Duration::days(6)
    }

    /// Human date range, e.g. `Jan 27–Feb 2`
    pub fn label(&self) -> String {
        format!(
            "{}–{}",
            self.monday().format("%b %-d"),
            self.sunday().format("%b %-d")
        )
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidWeekId(s.to_string());

        let (year_str, week_str) = s.split_once("-W").ok_or_else(invalid)?;
        if year_str.len() != 4
            || week_str.len() != 2
            || !year_str.bytes().all(|b| b.is_ascii_digit())
            || !week_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let week: u32 = week_str.parse().map_err(|_| invalid())?;
        WeekId::new(year, week).map_err(|_| invalid())
    }
}

impl TryFrom<String> for WeekId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WeekId> for String {
    fn from(id: WeekId) -> Self {
        id.to_string()
    }
}

/// Monday of the week containing `date`
///
/// Uses chrono's Monday-first numbering, so a Sunday steps back six days to
/// the Monday before it rather than forward to the next one.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Week identifier for the week containing `date`
///
/// Counts from the Monday on or before January 1, so the result can reach
/// week 54. Years outside 1..=9999 are clamped.
pub fn week_id_for(date: NaiveDate) -> WeekId {
    let monday = monday_of(date);
    let jan1 = monday - Duration::days(i64::from(monday.ordinal0()));
    let start = monday_of(jan1);
    let weeks = (monday - start).num_days() / 7;

    WeekId {
        year: monday.year().clamp(MIN_YEAR, MAX_YEAR),
        week: (weeks as u32 + 1).min(MAX_WEEK),
    }
}

/// Week identifier for today in local time
pub fn current_week_id() -> WeekId {
    week_id_for(Local::now().date_naive())
}
