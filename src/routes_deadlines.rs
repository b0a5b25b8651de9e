// --------------------------------------------------
// Handles API endpoints related to deadline CRUD
// and progress recording.
//
// Responsibilities:
// - Create / read / update / delete reading deadlines
// - Append progress snapshots (append-only, never edited)
// -------------------------------------------------

use axum::{
    Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Db, Deadline, Flexibility, Format, ProgressSnapshot};
use crate::store;

fn now_fixed_offset() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

#[derive(Debug, Serialize)]
pub struct DeadlinesResponse {
    pub now: String,
    pub deadlines: Vec<Deadline>,
}

// -----------------------------
// GET /api/deadlines
// Returns all tracked deadlines
// -----------------------------
pub async fn get_deadlines() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    Json(DeadlinesResponse {
        now: now_fixed_offset().to_rfc3339(),
        deadlines: db.deadlines,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct CreateDeadlineInput {
    pub book_title: String,
    pub author: Option<String>,
    pub format: Format,
    pub source: String,
    pub flexibility: Flexibility,
    pub total_quantity: i64, // pages or minutes depending on format
    pub deadline_date: String, // RFC3339
}

// -----------------------------
// POST /api/deadlines
// Creates a new deadline and saves it to db.json
// -----------------------------
pub async fn create_deadline(Json(input): Json<CreateDeadlineInput>) -> impl IntoResponse {
    if input.book_title.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "book_title required").into_response();
    }
    if input.total_quantity <= 0 {
        return (StatusCode::BAD_REQUEST, "total_quantity must be positive").into_response();
    }

    let deadline_date = match DateTime::parse_from_rfc3339(&input.deadline_date) {
        Ok(dt) => dt,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid deadline_date").into_response(),
    };

    let now = now_fixed_offset();

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let deadline = Deadline {
        id: Uuid::new_v4().to_string(),
        book_title: input.book_title,
        author: input.author,
        format: input.format,
        source: input.source,
        flexibility: input.flexibility,
        total_quantity: input.total_quantity,
        deadline_date,
        created_at: now,
        progress: Vec::new(),
    };

    db.deadlines.push(deadline.clone());

    if let Err(e) = store::save_db(&db) {
        log::error!("save_db failed: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(deadline).into_response()
}

#[derive(Debug, Deserialize)]
pub struct UpdateDeadlineInput {
    pub book_title: String,
    pub author: Option<String>,
    pub format: Format,
    pub source: String,
    pub flexibility: Flexibility,
    pub total_quantity: i64,
    pub deadline_date: String, // RFC3339
}

// -----------------------------
// PUT /api/deadlines/:id
// Updates an existing deadline by ID
// ----------------------------
pub async fn update_deadline(
    Path(id): Path<String>,
    Json(input): Json<UpdateDeadlineInput>,
) -> impl IntoResponse {
    if input.book_title.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "book_title required").into_response();
    }
    if input.total_quantity <= 0 {
        return (StatusCode::BAD_REQUEST, "total_quantity must be positive").into_response();
    }

    let deadline_date = match DateTime::parse_from_rfc3339(&input.deadline_date) {
        Ok(dt) => dt,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid deadline_date").into_response(),
    };

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let Some(d) = db.deadlines.iter_mut().find(|d| d.id == id) else {
        return (StatusCode::NOT_FOUND, "deadline not found").into_response();
    };

    d.book_title = input.book_title;
    d.author = input.author;
    d.format = input.format;
    d.source = input.source;
    d.flexibility = input.flexibility;
    d.total_quantity = input.total_quantity;
    d.deadline_date = deadline_date;

    let updated = d.clone();

    if let Err(e) = store::save_db(&db) {
        log::error!("save_db failed: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(updated).into_response()
}

// -----------------------------
// DELETE /api/deadlines/:id
// Removes a deadline and its progress permanently
// -----------------------------
pub async fn delete_deadline(Path(id): Path<String>) -> impl IntoResponse {
    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let before = db.deadlines.len();
    db.deadlines.retain(|d| d.id != id);

    if db.deadlines.len() == before {
        return (StatusCode::NOT_FOUND, "deadline not found").into_response();
    }

    if let Err(e) = store::save_db(&db) {
        log::error!("save_db failed: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(serde_json::json!({ "ok": true })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct RecordProgressInput {
    pub current_progress: i64,
    pub created_at: Option<String>, // RFC3339 override, used by imports
}

// -----------------------------
// POST /api/deadlines/:id/progress
// Appends an immutable progress snapshot
// -----------------------------
pub async fn record_progress(
    Path(id): Path<String>,
    Json(input): Json<RecordProgressInput>,
) -> impl IntoResponse {
    if input.current_progress < 0 {
        return (StatusCode::BAD_REQUEST, "current_progress must be >= 0").into_response();
    }

    let created_at = match input.created_at {
        Some(ts) => match DateTime::parse_from_rfc3339(&ts) {
            Ok(_) => ts,
            Err(_) => return (StatusCode::BAD_REQUEST, "invalid created_at").into_response(),
        },
        None => now_fixed_offset().to_rfc3339(),
    };

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("load_db failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let Some(d) = db.deadlines.iter_mut().find(|d| d.id == id) else {
        return (StatusCode::NOT_FOUND, "deadline not found").into_response();
    };

    let snapshot = ProgressSnapshot {
        id: Uuid::new_v4().to_string(),
        current_progress: input.current_progress,
        created_at,
    };

    d.progress.push(snapshot.clone());

    if let Err(e) = store::save_db(&db) {
        log::error!("save_db failed: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(snapshot).into_response()
}
