use anyhow::Context;
use bytes::Bytes;
use tracing::debug;

use crate::state::AppState;

/// Decodes the upload, writes it to the upload store and classifies it.
///
/// Nothing is written when decoding fails.
pub async fn store_and_classify(
    st: &AppState,
    file_name: &str,
    body: Bytes,
) -> anyhow::Result<String> {
    let raw = body.clone();
    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&raw))
        .await
        .context("decode task failed")?
        .context("decode image")?;

    let path = st
        .uploads
        .put(file_name, body)
        .await
        .with_context(|| format!("store {}", file_name))?;
    debug!(path = %path.display(), "upload stored");

    let classifier = st.classifier.clone();
    let label = tokio::task::spawn_blocking(move || classifier.classify(&decoded))
        .await
        .context("classifier task failed")?
        .context("classify image")?;
    Ok(label)
}
