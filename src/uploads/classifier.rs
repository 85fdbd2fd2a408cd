use image::{DynamicImage, GenericImageView};
use tracing::debug;

/// Label returned until a real activity model is plugged in.
pub const PLACEHOLDER_LABEL: &str = "walking";

/// Maps a decoded image to an activity label. Runs on the blocking pool.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> anyhow::Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderClassifier;

impl Classifier for PlaceholderClassifier {
    fn classify(&self, image: &DynamicImage) -> anyhow::Result<String> {
        let (width, height) = image.dimensions();
        debug!(width, height, "placeholder classifier");
        Ok(PLACEHOLDER_LABEL.to_string())
    }
}
