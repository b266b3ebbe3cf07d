use crate::asset_materializer::AssetMaterializer;
use crate::config::Config;
use crate::image_classifier::interface::{ImageClassifier, ModelLoader};
use crate::library::delayed_task::DelayedTask;
use crate::library::logger::interface::Logger;
use crate::rotation::core::Event;
use crate::screen::interface::Screen;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, OnceLock};

/// Owns everything one rotation needs: the model session, the pending tick and
/// the screen. The current index lives in the state machine.
#[derive(Clone)]
pub struct Rotation {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub materializer: AssetMaterializer,
    pub model_loader: Arc<dyn ModelLoader + Send + Sync>,
    pub session: Arc<OnceLock<Arc<dyn ImageClassifier + Send + Sync>>>,
    pub screen: Arc<Mutex<dyn Screen + Send + Sync>>,
    pub tick_task: DelayedTask,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
}

impl Rotation {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        materializer: AssetMaterializer,
        model_loader: Arc<dyn ModelLoader + Send + Sync>,
        screen: Arc<Mutex<dyn Screen + Send + Sync>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            config,
            logger: logger.with_namespace("rotation"),
            materializer,
            model_loader,
            session: Arc::new(OnceLock::new()),
            screen,
            tick_task: DelayedTask::new(),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    pub fn send(&self, event: Event) {
        let _ = self.event_sender.send(event);
    }
}
