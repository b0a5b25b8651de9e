use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::dates::parse_timestamp;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Physical,
    Ebook,
    Audio,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Flexibility {
    Flexible,
    Strict,
}

// One immutable observation of cumulative progress.
// `created_at` stays a raw RFC3339 string: snapshots can arrive from synced
// data, and one malformed timestamp must not take down a whole calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub id: String,
    pub current_progress: i64, // pages (physical/ebook), minutes (audio)
    pub created_at: String,    // RFC3339
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deadline {
    pub id: String,
    pub book_title: String,
    pub author: Option<String>,
    pub format: Format,
    pub source: String, // "arc" / "library" / "personal" / ...
    pub flexibility: Flexibility,
    pub total_quantity: i64, // pages or minutes, depending on format
    pub deadline_date: DateTime<FixedOffset>,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub progress: Vec<ProgressSnapshot>,
}

impl Deadline {
    // Latest recorded cumulative progress; 0 when nothing usable is recorded.
    pub fn latest_progress(&self) -> i64 {
        self.progress
            .iter()
            .filter_map(|s| parse_timestamp(&s.created_at).map(|ts| (ts, s.current_progress)))
            .max_by_key(|(ts, _)| *ts)
            .map(|(_, value)| value)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementCriteria {
    pub target: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: String,
    pub title: String,
    pub criteria: AchievementCriteria,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Db {
    #[serde(default)]
    pub deadlines: Vec<Deadline>,
    #[serde(default = "default_achievements")]
    pub achievements: Vec<AchievementDefinition>,
}

pub fn default_db() -> Db {
    Db {
        deadlines: Vec::new(),
        achievements: default_achievements(),
    }
}

fn def(id: &str, title: &str, target: f64) -> AchievementDefinition {
    AchievementDefinition {
        id: id.to_string(),
        title: title.to_string(),
        criteria: AchievementCriteria { target },
    }
}

// Built-in catalog. Stored in db.json so targets can be tuned without a rebuild.
pub fn default_achievements() -> Vec<AchievementDefinition> {
    vec![
        def("dedicated_reader", "Dedicated Reader", 25.0),
        def("reading_habit_master", "Reading Habit Master", 50.0),
        def("reading_champion", "Reading Champion", 75.0),
        def("century_reader", "Century Reader", 100.0),
        def("half_year_scholar", "Half-Year Scholar", 180.0),
        def("year_long_scholar", "Year-Long Scholar", 365.0),
        def("reading_hero", "Reading Hero", 500.0),
        def("reading_myth", "Reading Myth", 750.0),
        def("reading_legend", "Reading Legend", 1000.0),
        def("consistency_champion", "Consistency Champion", 7.0),
        def("ambitious_reader", "Ambitious Reader", 5.0),
        def("format_explorer", "Format Explorer", 3.0),
        def("library_warrior", "Library Warrior", 10.0),
        def("speed_reader", "Speed Reader", 100.0),
        def("marathon_listener", "Marathon Listener", 300.0),
    ]
}
