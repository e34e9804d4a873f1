//! Black-hole loot rotation schedule.
//!
//! Loot tables rotate every [`LOOT_PERIOD_DAYS`] days of the galaxy day
//! counter. The schedule lists the rotations still ahead, up to
//! [`LOOT_ROTATIONS`] periods or until the hole closes, whichever is first.

use crate::graph::Galaxy;
use crate::model::BlackHole;
use chrono::{Duration, NaiveDate};
use std::fmt;

pub const LOOT_PERIOD_DAYS: i64 = 77;
pub const LOOT_ROTATIONS: i64 = 5;

/// Day counter value that falls on 1 January 3300.
pub const EPOCH_DAY: i64 = 301;

/// Calendar date of a galaxy day counter value.
pub fn day_to_date(day: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(3300, 1, 1)?.checked_add_signed(Duration::days(day - EPOCH_DAY))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootChange {
    /// Days from the current day.
    pub days_ahead: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LootSchedule {
    pub changes: Vec<LootChange>,
    /// More rotations follow than are listed: the hole stays open past
    /// the horizon, or later dates fall outside the calendar range.
    pub truncated: bool,
}

/// Upcoming loot rotations of a hole closing in `turns_to_close` days.
///
/// A hole with zero or negative turns to close is treated as staying open
/// and gets the full horizon.
pub fn loot_schedule(turns_to_close: i32, current_day: i32) -> LootSchedule {
    let turns = i64::from(turns_to_close);
    let day = i64::from(current_day);
    let full_horizon = LOOT_PERIOD_DAYS * LOOT_ROTATIONS;
    let horizon = if turns < 1 {
        full_horizon
    } else {
        turns.min(full_horizon)
    };

    let first = LOOT_PERIOD_DAYS - day.rem_euclid(LOOT_PERIOD_DAYS);
    let offsets: Vec<i64> = (0..)
        .map(|n| first + n * LOOT_PERIOD_DAYS)
        .take_while(|&ahead| ahead < horizon)
        .collect();
    // Dates past the calendar range end the list; the rest counts as
    // truncated.
    let changes: Vec<LootChange> = offsets
        .iter()
        .map_while(|&ahead| {
            Some(LootChange {
                days_ahead: ahead,
                date: day_to_date(day + ahead)?,
            })
        })
        .collect();

    LootSchedule {
        truncated: horizon < turns || changes.len() < offsets.len(),
        changes,
    }
}

impl LootSchedule {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// `22 May 3299; 07 August 3299; ` with a trailing ` ...` when truncated.
impl fmt::Display for LootSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            write!(f, "{}; ", change.date.format("%d %B %Y"))?;
        }
        if self.truncated {
            f.write_str(" ...")?;
        }
        Ok(())
    }
}

impl Galaxy {
    pub fn next_loot_changes(&self, hole: &BlackHole) -> LootSchedule {
        loot_schedule(hole.turns_to_close, self.current_day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(s: &LootSchedule) -> Vec<i64> {
        s.changes.iter().map(|c| c.days_ahead).collect()
    }

    #[test]
    fn epoch_mapping() {
        // Day counter 301 is 1 January 3300, so day 0 falls in March 3299.
        // This is the mapping the game helper displays, not "day 301 of
        // year 3300 is day 0".
        assert_eq!(day_to_date(301), NaiveDate::from_ymd_opt(3300, 1, 1));
        assert_eq!(day_to_date(10), NaiveDate::from_ymd_opt(3299, 3, 16));
    }

    #[test]
    fn closing_hole_stops_at_close() {
        let s = loot_schedule(200, 10);
        assert_eq!(offsets(&s), vec![67, 144]);
        assert!(!s.truncated);
        assert_eq!(s.to_string(), "22 May 3299; 07 August 3299; ");
    }

    #[test]
    fn dates_are_one_period_apart() {
        let s = loot_schedule(1000, 400);
        for pair in s.changes.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), LOOT_PERIOD_DAYS);
        }
    }

    #[test]
    fn long_lived_hole_is_capped_and_truncated() {
        let s = loot_schedule(1000, 400);
        assert_eq!(offsets(&s), vec![62, 139, 216, 293, 370]);
        assert!(s.truncated);
        assert_eq!(
            s.to_string(),
            "11 June 3300; 27 August 3300; 12 November 3300; 28 January 3301; 15 April 3301;  ..."
        );
    }

    #[test]
    fn non_positive_turns_get_full_horizon_without_ellipsis() {
        for turns in [0, -5] {
            let s = loot_schedule(turns, 400);
            assert_eq!(s.changes.len(), 5);
            assert!(!s.truncated);
        }
    }

    #[test]
    fn rotation_on_current_day_lists_next_period() {
        let s = loot_schedule(100, 77);
        assert_eq!(offsets(&s), vec![77]);
    }

    #[test]
    fn hole_closing_before_next_rotation_has_empty_schedule() {
        let s = loot_schedule(5, 10);
        assert!(s.is_empty());
        assert_eq!(s.to_string(), "");
    }

    #[test]
    fn dates_beyond_the_calendar_mark_the_schedule_truncated() {
        let s = loot_schedule(300, i32::MAX - 100);
        assert!(s.is_empty());
        assert!(s.truncated);
        assert_eq!(s.to_string(), " ...");
    }

    #[test]
    fn horizon_of_exactly_five_periods_is_not_truncated() {
        let s = loot_schedule(385, 0);
        assert!(!s.truncated);
        assert_eq!(offsets(&s), vec![77, 154, 231, 308]);
    }
}
