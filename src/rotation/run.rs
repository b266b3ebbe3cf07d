use super::core::{init, transition, Effect, State};
use super::main::Rotation;
use crate::error::Error;
use std::sync::PoisonError;

impl Rotation {
    /// Runs until the screen is closed.
    pub fn run(&self) -> Result<(), Error> {
        let (mut state, effects) = init();

        self.render(&state);
        self.execute_effects(effects);

        let receiver = self
            .event_receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        while !matches!(state, State::Stopped) {
            let event = receiver.recv().map_err(|_| Error::EventChannelClosed)?;

            let _ = self.logger.info(&format!(
                "state: {:?} event: {}",
                state,
                event.to_display_string()
            ));

            let (new_state, effects) = transition(&self.config, state, event);

            let _ = self
                .logger
                .info(&format!("state: {:?} effects: {:?}", new_state, effects));

            state = new_state;

            self.render(&state);
            self.execute_effects(effects);
        }

        Ok(())
    }

    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleTick { .. } | Effect::CancelTick => self.run_effect(effect),
                effect => {
                    let self_clone = self.clone();
                    std::thread::spawn(move || self_clone.run_effect(effect));
                }
            }
        }
    }
}
