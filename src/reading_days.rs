/*
Day extraction: turns cumulative progress snapshots into per-calendar-day
deltas. Everything downstream (pace, status, achievements) consumes these
buckets instead of raw snapshots.

Two parallel extractors, one per unit system:
  - reading days in page-equivalents
  - listening days in raw minutes (audio only)
*/

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::dates::{parse_timestamp, round2};
use crate::models::{Deadline, Format};
use crate::units;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingDay {
    pub date: NaiveDate,
    pub pages_read: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListeningDay {
    pub date: NaiveDate,
    pub minutes_listened: f64,
}

// Usable snapshots of one deadline, ascending by timestamp. Entries with
// malformed timestamps are skipped rather than failing the calculation.
fn sorted_snapshots(deadline: &Deadline) -> Vec<(DateTime<Utc>, f64)> {
    let mut entries: Vec<(DateTime<Utc>, f64)> = deadline
        .progress
        .iter()
        .filter_map(|s| parse_timestamp(&s.created_at).map(|ts| (ts, s.current_progress as f64)))
        .collect();
    entries.sort_by_key(|(ts, _)| *ts);
    entries
}

// Walk consecutive snapshot pairs and spread each delta evenly across the
// calendar days of the gap, starting at the earlier snapshot's day.
// The day span is floored at 1 so same-day pairs still land in a bucket.
// Deltas are signed: a downward correction flows through as a negative day.
fn accumulate_deltas<F>(
    buckets: &mut BTreeMap<NaiveDate, f64>,
    entries: &[(DateTime<Utc>, f64)],
    convert: F,
) where
    F: Fn(f64) -> f64,
{
    for pair in entries.windows(2) {
        let (prev_ts, prev_value) = pair[0];
        let (curr_ts, curr_value) = pair[1];

        let gap_ms = (curr_ts - prev_ts).num_milliseconds() as f64;
        let days_between = (gap_ms / units::ONE_DAY_MS).round().max(1.0) as i64;

        let delta = convert(curr_value - prev_value);
        let per_day = delta / days_between as f64;

        let start = prev_ts.date_naive();
        for offset in 0..days_between {
            let day = start + Duration::days(offset);
            *buckets.entry(day).or_insert(0.0) += per_day;
        }
    }
}

// Per-date raw deltas for a single deadline, no unit conversion. Used by the
// achievement calculator, which applies its own conversion table.
pub fn day_deltas(deadline: &Deadline) -> BTreeMap<NaiveDate, f64> {
    let mut buckets = BTreeMap::new();
    accumulate_deltas(&mut buckets, &sorted_snapshots(deadline), |delta| delta);
    buckets
}

// Aggregate page-equivalent deltas per calendar day. Audio deltas are
// converted to page-equivalents here; the reading-pace pipeline filters
// audio deadlines out before calling, so the branch only fires for
// mixed-format input handed in directly.
pub fn extract_reading_days(deadlines: &[Deadline]) -> Vec<ReadingDay> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for deadline in deadlines {
        let entries = sorted_snapshots(deadline);
        accumulate_deltas(&mut buckets, &entries, |delta| {
            units::reading_page_equivalent(deadline.format, delta)
        });
    }

    buckets
        .into_iter()
        .map(|(date, pages)| ReadingDay {
            date,
            pages_read: round2(pages),
        })
        .collect()
}

// Aggregate raw listening minutes per calendar day, audio deadlines only.
// No page conversion: the listening pipeline stays in minutes end to end.
pub fn extract_listening_days(deadlines: &[Deadline]) -> Vec<ListeningDay> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for deadline in deadlines.iter().filter(|d| d.format == Format::Audio) {
        let entries = sorted_snapshots(deadline);
        accumulate_deltas(&mut buckets, &entries, |delta| delta);
    }

    buckets
        .into_iter()
        .map(|(date, minutes)| ListeningDay {
            date,
            minutes_listened: round2(minutes),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{deadline, snapshot, ymd};

    #[test]
    fn empty_and_single_snapshot_deadlines_contribute_nothing() {
        let none = deadline("d1", Format::Physical, 300, vec![]);
        let one = deadline(
            "d2",
            Format::Physical,
            300,
            vec![snapshot(50, "2026-03-01T12:00:00Z")],
        );
        assert!(extract_reading_days(&[none, one]).is_empty());
    }

    #[test]
    fn consecutive_days_produce_one_bucket_per_transition() {
        let d = deadline(
            "d1",
            Format::Physical,
            300,
            vec![
                snapshot(50, "2026-03-01T12:00:00Z"),
                snapshot(80, "2026-03-02T12:00:00Z"),
                snapshot(120, "2026-03-03T12:00:00Z"),
            ],
        );
        let days = extract_reading_days(&[d]);
        assert_eq!(
            days,
            vec![
                ReadingDay { date: ymd(2026, 3, 1), pages_read: 30.0 },
                ReadingDay { date: ymd(2026, 3, 2), pages_read: 40.0 },
            ]
        );
    }

    #[test]
    fn multi_day_gap_spreads_the_delta_evenly() {
        let d = deadline(
            "d1",
            Format::Physical,
            300,
            vec![
                snapshot(0, "2026-03-01T12:00:00Z"),
                snapshot(90, "2026-03-04T12:00:00Z"),
            ],
        );
        let days = extract_reading_days(&[d]);
        assert_eq!(days.len(), 3);
        for (day, expected) in days.iter().zip([1, 2, 3]) {
            assert_eq!(day.date, ymd(2026, 3, expected));
            assert_eq!(day.pages_read, 30.0);
        }
    }

    #[test]
    fn fractional_distribution_rounds_to_two_decimals() {
        let d = deadline(
            "d1",
            Format::Physical,
            300,
            vec![
                snapshot(0, "2026-03-01T12:00:00Z"),
                snapshot(100, "2026-03-04T12:00:00Z"),
            ],
        );
        let days = extract_reading_days(&[d]);
        assert_eq!(days[0].pages_read, 33.33);
    }

    #[test]
    fn same_day_pair_lands_in_a_single_bucket() {
        let d = deadline(
            "d1",
            Format::Physical,
            300,
            vec![
                snapshot(10, "2026-03-01T08:00:00Z"),
                snapshot(40, "2026-03-01T21:00:00Z"),
            ],
        );
        let days = extract_reading_days(&[d]);
        assert_eq!(days, vec![ReadingDay { date: ymd(2026, 3, 1), pages_read: 30.0 }]);
    }

    #[test]
    fn downward_corrections_stay_negative() {
        let d = deadline(
            "d1",
            Format::Physical,
            300,
            vec![
                snapshot(100, "2026-03-01T12:00:00Z"),
                snapshot(90, "2026-03-02T12:00:00Z"),
            ],
        );
        let days = extract_reading_days(&[d]);
        assert_eq!(days, vec![ReadingDay { date: ymd(2026, 3, 1), pages_read: -10.0 }]);
    }

    #[test]
    fn malformed_timestamps_are_skipped_not_fatal() {
        let d = deadline(
            "d1",
            Format::Physical,
            300,
            vec![
                snapshot(0, "2026-03-01T12:00:00Z"),
                snapshot(999, "definitely not a date"),
                snapshot(30, "2026-03-02T12:00:00Z"),
            ],
        );
        let days = extract_reading_days(&[d]);
        assert_eq!(days, vec![ReadingDay { date: ymd(2026, 3, 1), pages_read: 30.0 }]);
    }

    #[test]
    fn unsorted_snapshots_are_ordered_before_diffing() {
        let d = deadline(
            "d1",
            Format::Physical,
            300,
            vec![
                snapshot(60, "2026-03-03T12:00:00Z"),
                snapshot(20, "2026-03-01T12:00:00Z"),
                snapshot(40, "2026-03-02T12:00:00Z"),
            ],
        );
        let days = extract_reading_days(&[d]);
        assert_eq!(
            days,
            vec![
                ReadingDay { date: ymd(2026, 3, 1), pages_read: 20.0 },
                ReadingDay { date: ymd(2026, 3, 2), pages_read: 20.0 },
            ]
        );
    }

    #[test]
    fn mixed_format_input_converts_audio_to_page_equivalents() {
        let audio = deadline(
            "a1",
            Format::Audio,
            600,
            vec![
                snapshot(0, "2026-03-01T08:00:00Z"),
                snapshot(45, "2026-03-01T20:00:00Z"),
            ],
        );
        let paper = deadline(
            "p1",
            Format::Physical,
            300,
            vec![
                snapshot(0, "2026-03-01T08:00:00Z"),
                snapshot(10, "2026-03-01T20:00:00Z"),
            ],
        );
        let days = extract_reading_days(&[audio, paper]);
        // 45 minutes / 1.5 = 30 page-equivalents, plus 10 paper pages
        assert_eq!(days, vec![ReadingDay { date: ymd(2026, 3, 1), pages_read: 40.0 }]);
    }

    #[test]
    fn listening_days_stay_in_minutes_and_ignore_print_books() {
        let audio = deadline(
            "a1",
            Format::Audio,
            600,
            vec![
                snapshot(0, "2026-03-01T08:00:00Z"),
                snapshot(45, "2026-03-01T20:00:00Z"),
            ],
        );
        let paper = deadline(
            "p1",
            Format::Physical,
            300,
            vec![
                snapshot(0, "2026-03-01T08:00:00Z"),
                snapshot(200, "2026-03-01T20:00:00Z"),
            ],
        );
        let days = extract_listening_days(&[audio, paper]);
        assert_eq!(
            days,
            vec![ListeningDay { date: ymd(2026, 3, 1), minutes_listened: 45.0 }]
        );
    }
}
