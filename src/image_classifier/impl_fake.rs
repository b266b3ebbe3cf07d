use crate::error::Error;
use crate::image_classifier::imagenet_classes::IMAGENET_CLASS_COUNT;
use crate::image_classifier::interface::{ImageClassifier, ModelLoader};
use image::DynamicImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Scores drawn from an RNG seeded with the image pixels: same image, same scores.
#[derive(Default)]
pub struct ImageClassifierFake {
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<f32>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut hasher = DefaultHasher::new();
        image.width().hash(&mut hasher);
        image.height().hash(&mut hasher);
        image.as_bytes().hash(&mut hasher);

        let mut rng = StdRng::seed_from_u64(hasher.finish());
        let scores = (0..IMAGENET_CLASS_COUNT)
            .map(|_| rng.random_range(-10.0f32..10.0))
            .collect();

        Ok(scores)
    }
}

/// Accepts any non-empty model file.
#[derive(Default)]
pub struct ModelLoaderFake {
    pub classifier: Arc<ImageClassifierFake>,
}

impl ModelLoaderFake {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelLoader for ModelLoaderFake {
    fn load(&self, model_path: &Path) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Error> {
        let bytes = std::fs::read(model_path)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", model_path.display(), e)))?;

        if bytes.is_empty() {
            return Err(Error::ModelLoad(format!("{} is empty", model_path.display())));
        }

        Ok(self.classifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::imagenet_classes::imagenet_classes;
    use crate::image_classifier::prediction::Prediction;
    use image::{ImageBuffer, Rgb};

    fn gradient(seed: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(32, 32, |x, y| {
            Rgb([x as u8 ^ seed, y as u8, seed])
        }))
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = ImageClassifierFake::new();
        let image = gradient(7);

        let first = Prediction::from_scores(&classifier.classify(&image).unwrap(), imagenet_classes())
            .unwrap();
        for _ in 0..5 {
            let again =
                Prediction::from_scores(&classifier.classify(&image).unwrap(), imagenet_classes())
                    .unwrap();
            assert_eq!(again.index, first.index);
        }
        assert_eq!(classifier.calls(), 6);
    }

    #[test]
    fn test_scores_cover_label_table() {
        let classifier = ImageClassifierFake::new();

        let scores = classifier.classify(&gradient(42)).unwrap();
        let prediction = Prediction::from_scores(&scores, imagenet_classes()).unwrap();

        assert_eq!(scores.len(), 1000);
        assert!(prediction.index < 1000);
        assert_eq!(prediction.label, imagenet_classes()[prediction.index]);
    }

    #[test]
    fn test_loader_rejects_empty_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"").unwrap();

        assert!(matches!(
            ModelLoaderFake::new().load(&path),
            Err(Error::ModelLoad(_))
        ));
    }
}
