use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub score: f32,
    pub label: String,
}

impl Prediction {
    /// Picks the highest score; the first index wins ties and NaN never wins.
    pub fn from_scores(scores: &[f32], labels: &[&str]) -> Result<Self, Error> {
        let (index, score) = argmax(scores)
            .ok_or_else(|| Error::Inference("model produced no finite scores".to_string()))?;

        let label = match labels.get(index) {
            Some(label) => label.to_string(),
            None => format!("class {}", index),
        };

        Ok(Self {
            index,
            score,
            label,
        })
    }
}

pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;

    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }

    best
}
