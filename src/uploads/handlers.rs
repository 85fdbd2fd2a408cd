use axum::{
    extract::{
        multipart::MultipartRejection, DefaultBodyLimit, Multipart, State,
    },
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    uploads::{
        files::{allowed_file, secure_filename},
        services::store_and_classify,
    },
};

pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024; // 16 MiB
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct LabelResponse {
    pub label: String,
}

pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/upload_image", post(upload_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// POST /upload_image (multipart, field `image`)
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<LabelResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        // a plain form field named `image` is not a file part
        let Some(original) = field.file_name().map(str::to_string) else {
            continue;
        };
        if original.is_empty() {
            return Err(ApiError::bad_request("No selected file"));
        }
        if !allowed_file(&original) {
            warn!(file_name = %original, "upload rejected: extension not allowed");
            return Err(ApiError::bad_request("File type not allowed"));
        }
        let file_name = secure_filename(&original);
        if !allowed_file(&file_name) {
            warn!(file_name = %original, "upload rejected: unusable file name");
            return Err(ApiError::bad_request("Invalid filename"));
        }

        let body = field.bytes().await?;
        let size = body.len();
        let label = store_and_classify(&state, &file_name, body)
            .await
            .map_err(|e| {
                error!(error = %format!("{e:#}"), file_name = %file_name, "upload failed");
                ApiError::from(e)
            })?;

        info!(file_name = %file_name, size, label = %label, "image classified");
        return Ok(Json(LabelResponse { label }));
    }

    Err(ApiError::bad_request("No image part in the request"))
}
