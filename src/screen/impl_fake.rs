use crate::error::Error;
use crate::image_classifier::decoded_image::DecodedImage;
use crate::screen::interface::{Screen, ScreenEvent};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Records everything written to it.
#[derive(Default)]
pub struct ScreenFake {
    pub images: Vec<(String, u32, u32)>,
    pub labels: Vec<String>,
    pub metadata: Vec<String>,
    pub notices: Vec<String>,
    pub reject_images: bool,
    event_senders: Vec<Sender<ScreenEvent>>,
}

impl ScreenFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ScreenEvent) {
        for sender in &self.event_senders {
            let _ = sender.send(event);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        !self.event_senders.is_empty()
    }
}

impl Screen for ScreenFake {
    fn show_image(&mut self, image: &DecodedImage) -> Result<(), Error> {
        if self.reject_images {
            return Err(Error::Display(format!("{} rejected", image.name)));
        }
        self.images
            .push((image.name.clone(), image.width(), image.height()));
        Ok(())
    }

    fn write_label(&mut self, text: &str) -> Result<(), Error> {
        if self.labels.last().map(String::as_str) != Some(text) {
            self.labels.push(text.to_string());
        }
        Ok(())
    }

    fn write_metadata(&mut self, text: &str) -> Result<(), Error> {
        if self.metadata.last().map(String::as_str) != Some(text) {
            self.metadata.push(text.to_string());
        }
        Ok(())
    }

    fn show_notice(&mut self, text: &str) -> Result<(), Error> {
        self.notices.push(text.to_string());
        Ok(())
    }

    fn events(&mut self) -> Receiver<ScreenEvent> {
        let (sender, receiver) = channel();
        self.event_senders.push(sender);
        receiver
    }
}
