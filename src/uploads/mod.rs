use crate::state::AppState;
use axum::Router;

pub mod classifier;
mod files;
pub mod handlers;
mod services;

pub fn router() -> Router<AppState> {
    handlers::upload_routes()
}
