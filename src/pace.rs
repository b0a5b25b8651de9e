/*
User pace calculation, reading and listening variants.

Both variants share the same shape: restrict snapshots to a 21-day window
anchored at the newest snapshot on record, bucket them into days, then
divide the total delta by the calendar span between the first and last
active day. The divisor is that span, floored at one, never the count of
active days: reading on day 1 and day 4 averages over three days.
*/

use chrono::Duration;
use serde::Serialize;

use crate::dates::parse_timestamp;
use crate::models::{Deadline, Format};
use crate::reading_days::{extract_listening_days, extract_reading_days};
use crate::units;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    RecentData,
    DefaultFallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPaceData {
    pub average_pace: f64, // page-equivalents per day
    pub reading_days_count: usize,
    pub is_reliable: bool,
    pub calculation_method: CalculationMethod,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListeningPaceData {
    pub average_pace: f64, // minutes per day
    pub listening_days_count: usize,
    pub is_reliable: bool,
    pub calculation_method: CalculationMethod,
}

// Clone the matching deadlines with their snapshots restricted to the
// lookback window. The anchor is the newest snapshot across the whole
// matching set, not the wall clock, so stale data does not silently
// decay into a fallback while the user is away.
fn recent_deadlines(deadlines: &[Deadline], audio: bool) -> Vec<Deadline> {
    let matching = || {
        deadlines
            .iter()
            .filter(move |d| (d.format == Format::Audio) == audio)
    };

    let latest = matching()
        .flat_map(|d| d.progress.iter())
        .filter_map(|s| parse_timestamp(&s.created_at))
        .max();

    let Some(latest) = latest else {
        return Vec::new();
    };
    let cutoff = latest - Duration::days(units::PACE_LOOKBACK_DAYS);

    matching()
        .map(|d| {
            let mut d = d.clone();
            d.progress
                .retain(|s| matches!(parse_timestamp(&s.created_at), Some(ts) if ts >= cutoff));
            d
        })
        .collect()
}

fn span_days(first: chrono::NaiveDate, last: chrono::NaiveDate) -> f64 {
    (last - first).num_days().max(1) as f64
}

// Average reading pace in page-equivalents per day. Needs at least three
// recent activity days to be trusted; below that a fixed conservative
// default is returned instead of extrapolating from a couple of sessions.
pub fn calculate_user_pace(deadlines: &[Deadline]) -> UserPaceData {
    let recent = recent_deadlines(deadlines, false);
    let days = extract_reading_days(&recent);
    let count = days.len();

    if count < units::MIN_RELIABLE_READING_DAYS {
        return UserPaceData {
            average_pace: units::DEFAULT_READING_PACE,
            reading_days_count: count,
            is_reliable: false,
            calculation_method: CalculationMethod::DefaultFallback,
        };
    }

    let total: f64 = days.iter().map(|d| d.pages_read).sum();
    let span = span_days(days[0].date, days[count - 1].date);

    UserPaceData {
        average_pace: total / span,
        reading_days_count: count,
        is_reliable: true,
        calculation_method: CalculationMethod::RecentData,
    }
}

// Average listening pace in minutes per day. A single recent day already
// counts as real data here; with nothing at all the pace is simply zero.
// Oversized single-day deltas are dropped first: an imported backlog entry
// is not a day of listening.
pub fn calculate_user_listening_pace(deadlines: &[Deadline]) -> UserListeningPaceData {
    let recent = recent_deadlines(deadlines, true);
    let mut days = extract_listening_days(&recent);
    days.retain(|d| d.minutes_listened <= units::LISTENING_SEED_MINUTES);
    let count = days.len();

    if count == 0 {
        return UserListeningPaceData {
            average_pace: 0.0,
            listening_days_count: 0,
            is_reliable: false,
            calculation_method: CalculationMethod::DefaultFallback,
        };
    }

    let total: f64 = days.iter().map(|d| d.minutes_listened).sum();
    let span = span_days(days[0].date, days[count - 1].date);

    UserListeningPaceData {
        average_pace: total / span,
        listening_days_count: count,
        is_reliable: true,
        calculation_method: CalculationMethod::RecentData,
    }
}
