use crate::error::Error;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

pub trait ImageClassifier: Send + Sync {
    /// Runs one forward pass and returns one score per class.
    fn classify(&self, image: &DynamicImage) -> Result<Vec<f32>, Error>;
}

pub trait ModelLoader: Send + Sync {
    fn load(&self, model_path: &Path) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Error>;
}
