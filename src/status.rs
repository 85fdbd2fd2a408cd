use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Payload served until live classification output is wired in.
#[derive(Debug, Serialize)]
pub struct ActivityStatus {
    pub activity: &'static str,
    pub status: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/test", get(current_activity))
        .route("/health", get(|| async { "ok" }))
}

pub async fn current_activity() -> Json<ActivityStatus> {
    Json(ActivityStatus {
        activity: "Walking",
        status: "Active",
    })
}
