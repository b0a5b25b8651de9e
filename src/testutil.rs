// Fixture builders shared by the unit tests.

use chrono::{DateTime, Duration, NaiveDate};

use crate::models::{Deadline, Flexibility, Format, ProgressSnapshot};

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn snapshot(current_progress: i64, created_at: &str) -> ProgressSnapshot {
    ProgressSnapshot {
        id: format!("snap-{current_progress}"),
        current_progress,
        created_at: created_at.to_string(),
    }
}

pub fn deadline(
    id: &str,
    format: Format,
    total_quantity: i64,
    progress: Vec<ProgressSnapshot>,
) -> Deadline {
    deadline_from(id, format, "personal", total_quantity, progress)
}

pub fn deadline_from(
    id: &str,
    format: Format,
    source: &str,
    total_quantity: i64,
    progress: Vec<ProgressSnapshot>,
) -> Deadline {
    Deadline {
        id: id.to_string(),
        book_title: format!("Book {id}"),
        author: None,
        format,
        source: source.to_string(),
        flexibility: Flexibility::Flexible,
        total_quantity,
        deadline_date: DateTime::parse_from_rfc3339("2026-12-31T00:00:00Z").unwrap(),
        created_at: DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z").unwrap(),
        progress,
    }
}

// `count` snapshots at noon on consecutive days, progress stepping by 10.
pub fn daily_snapshots(year: i32, month: u32, day: u32, count: i64) -> Vec<ProgressSnapshot> {
    let start = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    (0..count)
        .map(|i| {
            let date = start + Duration::days(i);
            snapshot((i + 1) * 10, &format!("{date}T12:00:00Z"))
        })
        .collect()
}
