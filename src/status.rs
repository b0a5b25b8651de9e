/*
Required pace and deadline status classification.

The classifier is a flat, ordered chain: the first matching rule wins and
the ordering is part of the contract. Keep it as literal branches; do not
reshape it into anything polymorphic.
*/

use serde::Serialize;

use crate::models::Format;
use crate::pace::UserPaceData;
use crate::units;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Orange,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Good,
    Approaching,
    Overdue,
    Impossible,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaceBasedStatus {
    pub color: StatusColor,
    pub level: StatusLevel,
    pub message: String,
}

fn status(color: StatusColor, level: StatusLevel, message: &str) -> PaceBasedStatus {
    PaceBasedStatus {
        color,
        level,
        message: message.to_string(),
    }
}

// Page-equivalents (or raw pages) per day needed to finish on time.
// Remaining work is not clamped: an over-complete deadline yields a
// non-positive required pace and downstream treats that as already done.
pub fn calculate_required_pace(
    total_quantity: i64,
    current_progress: i64,
    days_left: i64,
    format: Format,
) -> f64 {
    let mut remaining = (total_quantity - current_progress) as f64;
    if format == Format::Audio {
        remaining /= units::AUDIO_MINUTES_PER_PAGE;
    }
    if days_left <= 0 {
        // No days to spread it over: the answer is "all of it, now".
        return remaining;
    }
    (remaining / days_left as f64).ceil()
}

// First match wins, top to bottom:
//   overdue -> not started with <3 days -> behind pace -> on track
// A tie between user pace and required pace counts as on track.
pub fn get_pace_based_status(
    user_pace: f64,
    required_pace: f64,
    days_left: i64,
    progress_percentage: f64,
) -> PaceBasedStatus {
    if days_left <= 0 {
        return status(StatusColor::Red, StatusLevel::Overdue, "Return or renew");
    }

    if progress_percentage == 0.0 && days_left < 3 {
        return status(StatusColor::Red, StatusLevel::Impossible, "Start reading now");
    }

    if user_pace < required_pace {
        // A zero pace cannot be increased by any percentage.
        if user_pace <= 0.0 {
            return status(StatusColor::Red, StatusLevel::Impossible, "Pace too slow");
        }
        let increase_needed = (required_pace - user_pace) / user_pace * 100.0;
        if increase_needed > 100.0 {
            return status(StatusColor::Red, StatusLevel::Impossible, "Pace too slow");
        }
        return status(StatusColor::Orange, StatusLevel::Approaching, "Pick up the pace");
    }

    status(StatusColor::Green, StatusLevel::Good, "You're on track")
}

// Detailed card line layered over the classifier. Distinguishes "we have no
// idea what your pace is" from "your pace is genuinely too low", and rounds
// displayed paces to whole units.
pub fn pace_status_message(
    pace: &UserPaceData,
    status: &PaceBasedStatus,
    required_pace: f64,
) -> String {
    match status.level {
        StatusLevel::Overdue => "Return or renew".to_string(),
        StatusLevel::Impossible => {
            if pace.is_reliable {
                "Pace too ambitious".to_string()
            } else {
                "Start reading to track pace".to_string()
            }
        }
        StatusLevel::Approaching => format!(
            "Pick up the pace: {} pages/day needed",
            required_pace.round() as i64
        ),
        StatusLevel::Good => format!(
            "On track at {} pages/day",
            pace.average_pace.round() as i64
        ),
    }
}

fn unit_word(format: Format, n: i64) -> &'static str {
    match (format, n) {
        (Format::Audio, 1) => "minute",
        (Format::Audio, _) => "minutes",
        (_, 1) => "page",
        (_, _) => "pages",
    }
}

// Human-readable required pace in the deadline's native unit. Very slow
// rates get week or month granularity, computed from the unrounded rate,
// so 52 pages over 372 days reads "1 page/week" and never "1 pages/day".
pub fn format_required_pace(remaining: f64, days_left: i64, format: Format) -> String {
    if remaining <= 0.0 {
        return format!("0 {}/day", unit_word(format, 0));
    }
    if days_left <= 0 {
        let n = remaining.ceil() as i64;
        return format!("{} {} now", n, unit_word(format, n));
    }

    let per_day = remaining / days_left as f64;
    if per_day >= 1.0 {
        let n = per_day.ceil() as i64;
        return format!("{} {}/day", n, unit_word(format, n));
    }

    let per_week = per_day * 7.0;
    if per_week.round() >= 1.0 {
        let n = per_week.round() as i64;
        return format!("{} {}/week", n, unit_word(format, n));
    }

    let n = (per_day * 30.0).round().max(1.0) as i64;
    format!("{} {}/month", n, unit_word(format, n))
}
