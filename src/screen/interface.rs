use crate::error::Error;
use crate::image_classifier::decoded_image::DecodedImage;
use std::sync::mpsc::Receiver;

/// Lifecycle signals published by the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Surface went to the background.
    Hidden,
    Visible,
    Closed,
}

/// Where classification results end up: an image area, a label and a metadata line.
pub trait Screen: Send + Sync {
    fn show_image(&mut self, image: &DecodedImage) -> Result<(), Error>;

    fn write_label(&mut self, text: &str) -> Result<(), Error>;

    fn write_metadata(&mut self, text: &str) -> Result<(), Error>;

    /// Transient message that disappears on its own.
    fn show_notice(&mut self, text: &str) -> Result<(), Error>;

    fn events(&mut self) -> Receiver<ScreenEvent>;
}
