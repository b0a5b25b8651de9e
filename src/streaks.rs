/*
Consecutive-day reading streaks.

Streaks are about showing up, not about volume: any snapshot on a date
marks that date active, whatever the format and whatever the delta (the
very first seed entry counts too). "Today" is always passed in by the
caller so the scan itself stays clock-free.
*/

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::parse_timestamp;
use crate::models::Deadline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    pub current_streak: u32,
    pub max_streak: u32,
}

// Distinct UTC dates with any recorded snapshot, across every deadline.
// Several snapshots on one date collapse into a single activity day.
pub fn activity_dates(deadlines: &[Deadline]) -> BTreeSet<NaiveDate> {
    deadlines
        .iter()
        .flat_map(|d| d.progress.iter())
        .filter_map(|s| parse_timestamp(&s.created_at))
        .map(|ts| ts.date_naive())
        .collect()
}

pub fn calculate_reading_streaks(deadlines: &[Deadline], today: NaiveDate) -> StreakResult {
    let dates = activity_dates(deadlines);

    // Current streak: walk back day by day from today. No activity today
    // means no current streak; yesterday's run earns no partial credit.
    let mut current = 0u32;
    let mut day = today;
    while dates.contains(&day) {
        current += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }

    // Max streak: longest run of consecutive dates anywhere in history.
    let mut max = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &date in dates.iter() {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        max = max.max(run);
        prev = Some(date);
    }

    StreakResult {
        current_streak: current,
        max_streak: max,
    }
}
