// Define data modules
mod models; // Data structures (Deadline, ProgressSnapshot, Db, etc.)
mod store;  // Persistent storage (load/save db.json)
mod dates;  // Timestamp parsing and UTC calendar-day helpers
mod units;  // Unit conversion policies and pace constants
mod reading_days;   // Day-bucketed progress delta extraction
mod pace;   // Reading and listening pace calculation
mod status; // Required pace and deadline status classification
mod streaks;        // Consecutive-day streak scan
mod achievements;   // Achievement progress evaluation
mod routes_deadlines;   // HTTP handlers for deadline & progress APIs
mod routes_stats;       // HTTP handlers for pace/streak/achievement APIs

#[cfg(test)]
mod testutil;

// Import axum routing utilities and Router
use axum::{
    routing::{get, post, put}, // HTTP method helpers
    Router, // Main router type
};
use tower_http::services::ServeDir; // Used to serve static files (HTML/CSS/JS)
use std::net::SocketAddr;


#[tokio::main]
async fn main() {
    env_logger::init();

    let api = Router::new()
        // stats
        .route("/stats/pace", get(routes_stats::get_pace_summary))
        .route("/stats/streaks", get(routes_stats::get_streaks))
        .route("/stats/achievements", get(routes_stats::get_achievements))
        // deadlines
        .route("/deadlines", get(routes_deadlines::get_deadlines).post(routes_deadlines::create_deadline))
        .route("/deadlines/:id", put(routes_deadlines::update_deadline).delete(routes_deadlines::delete_deadline))
        .route("/deadlines/:id/progress", post(routes_deadlines::record_progress))
        .route("/deadlines/:id/status", get(routes_stats::get_deadline_status));

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/", ServeDir::new("static"));

    let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();

    // Print the link to the server
    println!("  Server running at http://{}", addr);
    println!("  Static files: http://{}/", addr);
    println!("  API base:     http://{}/api", addr);


    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("bind failed");

    axum::serve(listener, app).await.expect("server error");
}
