mod app;
mod config;
mod error;
mod extractors;
mod state;
mod status;
mod storage;
mod uploads;
mod users;

#[cfg(test)]
mod test_util;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "har_backend=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::info!(
        db_host = %config.db.host,
        db_name = %config.db.name,
        upload_dir = %config.upload_dir.display(),
        "configuration loaded"
    );

    let app_state = AppState::init(&config).await?;
    let app = app::build_app(app_state);
    app::serve(app, &config).await
}
