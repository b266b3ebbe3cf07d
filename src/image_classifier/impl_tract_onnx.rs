use crate::config::Normalization;
use crate::error::Error;
use crate::image_classifier::interface::{ImageClassifier, ModelLoader};
use crate::image_classifier::tract::image::resize_image_to_tensor;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

pub struct ImageClassifierTractOnnx {
    model: Plan,
    input_size: (u32, u32),
    normalization: Normalization,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        model_path: &Path,
        input_size: (u32, u32),
        normalization: Normalization,
    ) -> Result<Self, Error> {
        let (width, height) = input_size;
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    f32::fact([1, 3, height as usize, width as usize]).into(),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| Error::ModelLoad(format!("{}: {}", model_path.display(), e)))?;

        Ok(Self {
            model,
            input_size,
            normalization,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<f32>, Error> {
        let input = resize_image_to_tensor(
            image,
            self.input_size.0,
            self.input_size.1,
            &self.normalization,
        );

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| Error::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| Error::Inference("model has no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| Error::Inference(e.to_string()))?;

        Ok(output.iter().copied().collect())
    }
}

pub struct ModelLoaderTractOnnx {
    input_size: (u32, u32),
    normalization: Normalization,
}

impl ModelLoaderTractOnnx {
    pub fn new(input_size: (u32, u32), normalization: Normalization) -> Self {
        Self {
            input_size,
            normalization,
        }
    }
}

impl ModelLoader for ModelLoaderTractOnnx {
    fn load(&self, model_path: &Path) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Error> {
        let classifier =
            ImageClassifierTractOnnx::new(model_path, self.input_size, self.normalization)?;
        Ok(Arc::new(classifier))
    }
}
