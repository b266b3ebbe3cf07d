use super::core::{ClassificationReport, Effect, Event};
use super::main::Rotation;
use crate::error::Error;
use crate::image_classifier::decoded_image::DecodedImage;
use crate::image_classifier::imagenet_classes::imagenet_classes;
use crate::image_classifier::prediction::Prediction;
use std::sync::PoisonError;
use std::time::Instant;

pub const DISPLAY_FAILED_NOTICE: &str = "Cannot display image. Classification still in progress";

impl Rotation {
    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToScreenEvents => {
                let events = self
                    .screen
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .events();
                while let Ok(event) = events.recv() {
                    if self.event_sender.send(Event::ScreenEvent(event)).is_err() {
                        break;
                    }
                }
            }
            Effect::LoadModel => {
                let loaded = self.load_model();
                if let Err(e) = &loaded {
                    let _ = self.logger.error(&format!("Error reading assets: {}", e));
                }
                self.send(Event::ModelLoadDone(loaded));
            }
            Effect::ClassifyImage { asset } => {
                let result = self.classify_image(&asset);
                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Classification of {} failed: {}", asset, e));
                }
                self.send(Event::ClassifyDone { asset, result });
            }
            Effect::ScheduleTick { delay } => {
                let event_sender = self.event_sender.clone();
                self.tick_task.schedule(delay, move || {
                    let _ = event_sender.send(Event::Tick);
                });
            }
            Effect::CancelTick => {
                self.tick_task.cancel();
            }
        }
    }

    fn load_model(&self) -> Result<(), Error> {
        let path = self.materializer.materialize(&self.config.model_asset)?;
        let classifier = self.model_loader.load(&path)?;

        let _ = self.session.set(classifier);
        let _ = self
            .logger
            .info(&format!("Model loaded from {}", path.display()));
        Ok(())
    }

    fn classify_image(&self, asset: &str) -> Result<ClassificationReport, Error> {
        let session = self.session.get().ok_or(Error::ModelNotLoaded)?;

        let path = self.materializer.materialize(asset)?;
        let decoded = DecodedImage::open(asset, &path)?;

        self.present_image(&decoded);

        let start = Instant::now();
        let scores = session.classify(&decoded.image)?;
        let elapsed = start.elapsed();

        let prediction = Prediction::from_scores(&scores, imagenet_classes())?;

        Ok(ClassificationReport {
            asset: asset.to_string(),
            elapsed,
            width: decoded.width(),
            height: decoded.height(),
            byte_size: decoded.byte_size(),
            prediction,
        })
    }

    /// A display failure never aborts the classification.
    fn present_image(&self, decoded: &DecodedImage) {
        let mut screen = self.screen.lock().unwrap_or_else(PoisonError::into_inner);

        if let Err(e) = screen.show_image(decoded) {
            let _ = self.logger.error(&format!(
                "Cannot display image. Classification still in progress: {}: {}",
                decoded.name, e
            ));
            if let Err(e) = screen.show_notice(DISPLAY_FAILED_NOTICE) {
                let _ = self.logger.error(&format!("Cannot show notice: {}", e));
            }
        }
    }
}
