use super::core::{Cycle, Outcome, State};
use super::main::Rotation;
use crate::error::Error;
use crate::screen::interface::Screen;
use std::sync::PoisonError;

impl Rotation {
    pub fn render(&self, state: &State) {
        let mut screen = self.screen.lock().unwrap_or_else(PoisonError::into_inner);

        if let Err(e) = render_state(&mut *screen, state) {
            let _ = self.logger.error(&format!("Render failed: {}", e));
        }
    }
}

pub fn render_state(screen: &mut dyn Screen, state: &State) -> Result<(), Error> {
    match state {
        State::LoadingModel { .. } => screen.write_label("Loading model..."),
        State::Failed { message } => screen.write_label(message),
        State::Running(cycle) | State::Paused(cycle) => render_cycle(screen, cycle),
        State::Stopped => Ok(()),
    }
}

fn render_cycle(screen: &mut dyn Screen, cycle: &Cycle) -> Result<(), Error> {
    if let Some(asset) = &cycle.in_flight {
        return screen.write_label(&format!("Classifying image {}", asset));
    }

    match &cycle.last_outcome {
        Some(Outcome::Classified(report)) => {
            screen.write_label(&report.prediction.label)?;
            screen.write_metadata(&report.metadata_text())
        }
        Some(Outcome::Failed { asset, message }) => {
            screen.write_label(&format!("No result for {}", asset))?;
            screen.write_metadata(message)
        }
        None => Ok(()),
    }
}
