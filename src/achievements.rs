/*
Achievement progress evaluation.

One calculation rule per achievement id, all reading off the same
in-memory deadline set. Evaluation is repeatable and side-effect free;
whoever persists unlock records is expected to call this as often as it
likes and write the results elsewhere.
*/

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AchievementDefinition, Deadline, Format};
use crate::reading_days::day_deltas;
use crate::streaks::{StreakResult, calculate_reading_streaks};
use crate::units;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementProgress {
    pub current: f64, // raw value, never clamped
    pub max: f64,
    pub percentage: u32, // clamped to 0..=100
    pub achieved: bool,
}

pub struct AchievementContext<'a> {
    pub deadlines: &'a [Deadline],
    pub user_id: &'a str,
    pub today: NaiveDate,
}

impl AchievementContext<'_> {
    pub fn calculate_progress(&self, def: &AchievementDefinition) -> AchievementProgress {
        let current = self.raw_current(&def.id);
        let max = def.criteria.target;
        AchievementProgress {
            current,
            max,
            percentage: percentage_of(current, max),
            achieved: current >= max,
        }
    }

    fn streaks(&self) -> StreakResult {
        calculate_reading_streaks(self.deadlines, self.today)
    }

    fn raw_current(&self, id: &str) -> f64 {
        match id {
            // The streak family rewards historical consistency: max streak,
            // not the live one. Only the targets differ between these ids.
            "dedicated_reader" | "reading_habit_master" | "reading_champion"
            | "century_reader" | "half_year_scholar" | "year_long_scholar"
            | "reading_hero" | "reading_myth" | "reading_legend" => {
                self.streaks().max_streak as f64
            }
            // The one streak achievement that tracks the live run.
            "consistency_champion" => self.streaks().current_streak as f64,
            "ambitious_reader" => self.deadlines.len() as f64,
            "format_explorer" => {
                let formats: HashSet<Format> = self
                    .deadlines
                    .iter()
                    .filter(|d| !d.progress.is_empty())
                    .map(|d| d.format)
                    .collect();
                formats.len() as f64
            }
            "library_warrior" => self
                .deadlines
                .iter()
                .filter(|d| d.source == "library" && !d.progress.is_empty())
                .count() as f64,
            "speed_reader" => max_daily_page_equivalents(self.deadlines),
            "marathon_listener" => max_daily_listening_minutes(self.deadlines),
            // Unknown ids score zero rather than failing the whole batch.
            _ => 0.0,
        }
    }
}

fn percentage_of(current: f64, max: f64) -> u32 {
    if max <= 0.0 {
        return if current >= max { 100 } else { 0 };
    }
    (current / max * 100.0).round().clamp(0.0, 100.0) as u32
}

// Biggest single-day total across all deadlines, in page-equivalents per
// the achievement conversion table.
fn max_daily_page_equivalents(deadlines: &[Deadline]) -> f64 {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for deadline in deadlines {
        for (date, delta) in day_deltas(deadline) {
            *totals.entry(date).or_insert(0.0) +=
                units::achievement_page_equivalent(deadline.format, delta);
        }
    }
    totals.values().fold(0.0, |best, v| best.max(*v))
}

// Biggest single-day raw-minute total, audio deadlines only.
fn max_daily_listening_minutes(deadlines: &[Deadline]) -> f64 {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for deadline in deadlines.iter().filter(|d| d.format == Format::Audio) {
        for (date, delta) in day_deltas(deadline) {
            *totals.entry(date).or_insert(0.0) += delta;
        }
    }
    totals.values().fold(0.0, |best, v| best.max(*v))
}
