/*
Timestamp parsing and calendar-day helpers.
Day boundaries are UTC everywhere: extraction buckets, streaks and
days-left all use the same calendar, so a snapshot never lands on
different days in different parts of the app.
*/

use chrono::{DateTime, FixedOffset, Utc};

// Parse an RFC3339 timestamp, normalized to UTC.
// Malformed strings yield None; callers skip the entry instead of failing.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// Whole calendar days from `now` until the deadline, negative once overdue.
pub fn days_until(deadline: DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    (deadline.with_timezone(&Utc).date_naive() - now.date_naive()).num_days()
}

// Day buckets carry fractional distributed deltas; two decimals is enough.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
