use crate::config::{Config, ResumePolicy};
use crate::error::Error;
use crate::image_classifier::prediction::Prediction;
use crate::screen::interface::ScreenEvent;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub asset: String,
    pub elapsed: Duration,
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
    pub prediction: Prediction,
}

impl ClassificationReport {
    pub fn metadata_text(&self) -> String {
        format!(
            "Image: {}\nTime: {}ms\n{}x{}; {:.2}MB; Score: {:.2}: Class: {}",
            self.asset,
            self.elapsed.as_millis(),
            self.width,
            self.height,
            (self.byte_size / 1024) as f64 / 1024.0,
            self.prediction.score,
            self.prediction.index,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Classified(ClassificationReport),
    Failed { asset: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cycle {
    /// Index of the asset the next tick classifies.
    pub index: usize,
    pub in_flight: Option<String>,
    pub last_outcome: Option<Outcome>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    LoadingModel { visible: bool },
    Failed { message: String },
    Running(Cycle),
    Paused(Cycle),
    Stopped,
}

#[derive(Debug)]
pub enum Event {
    ModelLoadDone(Result<(), Error>),
    Tick,
    ClassifyDone {
        asset: String,
        result: Result<ClassificationReport, Error>,
    },
    ScreenEvent(ScreenEvent),
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::ClassifyDone {
                asset,
                result: Ok(report),
            } => format!(
                "ClassifyDone({}: {} #{})",
                asset, report.prediction.label, report.prediction.index
            ),
            Event::ClassifyDone {
                asset,
                result: Err(e),
            } => format!("ClassifyDone({}: {})", asset, e),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToScreenEvents,
    LoadModel,
    ClassifyImage { asset: String },
    ScheduleTick { delay: Duration },
    CancelTick,
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State::LoadingModel { visible: true },
        vec![Effect::SubscribeToScreenEvents, Effect::LoadModel],
    )
}

pub fn transition(config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        (_, Event::ScreenEvent(ScreenEvent::Closed)) => (State::Stopped, vec![Effect::CancelTick]),
        (State::Stopped, _) => (State::Stopped, vec![]),

        // Startup
        (State::LoadingModel { visible }, Event::ModelLoadDone(Ok(()))) => {
            if config.image_assets.is_empty() {
                (
                    State::Failed {
                        message: "No images to classify".to_string(),
                    },
                    vec![],
                )
            } else if visible {
                tick(config, Cycle::default())
            } else {
                (State::Paused(Cycle::default()), vec![])
            }
        }
        (State::LoadingModel { .. }, Event::ModelLoadDone(Err(e))) => (
            State::Failed {
                message: e.to_string(),
            },
            vec![],
        ),
        (State::LoadingModel { .. }, Event::ScreenEvent(ScreenEvent::Hidden)) => {
            (State::LoadingModel { visible: false }, vec![])
        }
        (State::LoadingModel { .. }, Event::ScreenEvent(ScreenEvent::Visible)) => {
            (State::LoadingModel { visible: true }, vec![])
        }

        // Rotation
        (State::Running(cycle), Event::Tick) if cycle.in_flight.is_none() => tick(config, cycle),
        (State::Running(cycle), Event::ClassifyDone { asset, result }) => (
            State::Running(finish(cycle, asset, result)),
            vec![Effect::ScheduleTick {
                delay: config.rotation_interval,
            }],
        ),
        (State::Paused(cycle), Event::ClassifyDone { asset, result }) => {
            (State::Paused(finish(cycle, asset, result)), vec![])
        }

        // Lifecycle
        (State::Running(cycle), Event::ScreenEvent(ScreenEvent::Hidden)) => {
            (State::Paused(cycle), vec![Effect::CancelTick])
        }
        (State::Paused(mut cycle), Event::ScreenEvent(ScreenEvent::Visible)) => {
            if config.resume_policy == ResumePolicy::RestartFromZero {
                cycle.index = 0;
            }

            if cycle.in_flight.is_some() {
                (State::Running(cycle), vec![])
            } else {
                tick(config, cycle)
            }
        }

        (state, _) => (state, vec![]),
    }
}

/// Classifies the asset at the current index and advances the index.
fn tick(config: &Config, mut cycle: Cycle) -> (State, Vec<Effect>) {
    let count = config.image_assets.len();
    if count == 0 {
        return (
            State::Failed {
                message: "No images to classify".to_string(),
            },
            vec![],
        );
    }

    let current = cycle.index % count;
    let asset = config.image_assets[current].clone();

    cycle.index = (current + 1) % count;
    cycle.in_flight = Some(asset.clone());

    (State::Running(cycle), vec![Effect::ClassifyImage { asset }])
}

fn finish(mut cycle: Cycle, asset: String, result: Result<ClassificationReport, Error>) -> Cycle {
    cycle.in_flight = None;
    cycle.last_outcome = Some(match result {
        Ok(report) => Outcome::Classified(report),
        Err(e) => Outcome::Failed {
            asset,
            message: e.to_string(),
        },
    });
    cycle
}
