use axum::{
    Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Serialize;

use crate::achievements::{AchievementContext, AchievementProgress};
use crate::dates;
use crate::models::Db;
use crate::pace::{self, UserListeningPaceData, UserPaceData};
use crate::status;
use crate::store;
use crate::streaks;

// Single-user deployment; achievement rows are still tagged with an owner
// so a synced backend can take over without reshaping the payload.
const LOCAL_USER: &str = "local";

#[derive(Debug, Serialize)]
pub struct PaceSummaryResponse {
    pub now: String,
    pub reading: UserPaceData,
    pub listening: UserListeningPaceData,
}

// -----------------------------
// GET /api/stats/pace
// Reading and listening pace, each from its own pipeline
// -----------------------------
pub async fn get_pace_summary() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    Json(PaceSummaryResponse {
        now: Utc::now().to_rfc3339(),
        reading: pace::calculate_user_pace(&db.deadlines),
        listening: pace::calculate_user_listening_pace(&db.deadlines),
    })
    .into_response()
}

#[derive(Debug, Serialize)]
pub struct DeadlineStatusResponse {
    pub deadline_id: String,
    pub days_left: i64,
    pub current_progress: i64,
    pub progress_percentage: f64,
    pub required_pace: f64,
    pub status: status::PaceBasedStatus,
    pub status_message: String,
    pub required_pace_display: String,
}

// -----------------------------
// GET /api/deadlines/:id/status
// Pace-based classification for one deadline
// -----------------------------
pub async fn get_deadline_status(Path(id): Path<String>) -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let Some(deadline) = db.deadlines.iter().find(|d| d.id == id) else {
        return (StatusCode::NOT_FOUND, "deadline not found").into_response();
    };

    let now = Utc::now();
    let days_left = dates::days_until(deadline.deadline_date, now);
    let current = deadline.latest_progress();
    let progress_percentage = if deadline.total_quantity > 0 {
        current as f64 / deadline.total_quantity as f64 * 100.0
    } else {
        0.0
    };

    let required_pace = status::calculate_required_pace(
        deadline.total_quantity,
        current,
        days_left,
        deadline.format,
    );
    let user_pace = pace::calculate_user_pace(&db.deadlines);
    let pace_status = status::get_pace_based_status(
        user_pace.average_pace,
        required_pace,
        days_left,
        progress_percentage,
    );
    let status_message = status::pace_status_message(&user_pace, &pace_status, required_pace);
    let required_pace_display = status::format_required_pace(
        (deadline.total_quantity - current) as f64,
        days_left,
        deadline.format,
    );

    Json(DeadlineStatusResponse {
        deadline_id: deadline.id.clone(),
        days_left,
        current_progress: current,
        progress_percentage,
        required_pace,
        status: pace_status,
        status_message,
        required_pace_display,
    })
    .into_response()
}

#[derive(Debug, Serialize)]
pub struct StreaksResponse {
    pub today: String,
    pub current_streak: u32,
    pub max_streak: u32,
}

// -----------------------------
// GET /api/stats/streaks
// Current and best consecutive-day reading streaks
// -----------------------------
pub async fn get_streaks() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let today = Utc::now().date_naive();
    let result = streaks::calculate_reading_streaks(&db.deadlines, today);

    Json(StreaksResponse {
        today: today.to_string(),
        current_streak: result.current_streak,
        max_streak: result.max_streak,
    })
    .into_response()
}

#[derive(Debug, Serialize)]
pub struct AchievementRow {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub progress: AchievementProgress,
}

#[derive(Debug, Serialize)]
pub struct AchievementsResponse {
    pub user_id: String,
    pub achievements: Vec<AchievementRow>,
}

// -----------------------------
// GET /api/stats/achievements
// Progress for every achievement in the catalog
// -----------------------------
pub async fn get_achievements() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let ctx = AchievementContext {
        deadlines: &db.deadlines,
        user_id: LOCAL_USER,
        today: Utc::now().date_naive(),
    };

    let achievements: Vec<AchievementRow> = db
        .achievements
        .iter()
        .map(|def| AchievementRow {
            id: def.id.clone(),
            title: def.title.clone(),
            progress: ctx.calculate_progress(def),
        })
        .collect();

    Json(AchievementsResponse {
        user_id: ctx.user_id.to_string(),
        achievements,
    })
    .into_response()
}
