use std::sync::Arc;

use serde::Serialize;
use shelf_core::tokenize;

use crate::error::ClassifyError;
use crate::genre::{GenreModel, ModelCollection};

/// The winning genre and its log-probability score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub genre: String,
    pub score: f64,
}

/// Log-probability of `tokens` under one genre:
/// `ln(prior) + Σ ln(P(token | genre))`.
pub fn score(genre: &GenreModel, tokens: &[String]) -> f64 {
    tokens.iter().fold(genre.prior_probability.ln(), |acc, token| {
        acc + genre.word_probability(token).ln()
    })
}

/// Pick the highest-scoring genre.
///
/// Genres are visited in name order and only a strictly greater score
/// replaces the current best, so ties go to the lexicographically first
/// genre. Genres with a zero prior are never candidates.
pub fn classify(tokens: &[String], collection: &ModelCollection) -> Result<Classification, ClassifyError> {
    if collection.is_empty() {
        return Err(ClassifyError::NoModel("model has no genres".to_string()));
    }

    let mut best: Option<(&GenreModel, f64)> = None;
    for genre in collection.iter().filter(|g| g.is_usable()) {
        let s = score(genre, tokens);
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((genre, s)),
        }
    }

    best.map(|(genre, score)| Classification {
        genre: genre.name.clone(),
        score,
    })
    .ok_or_else(|| ClassifyError::NoModel("no genre has a nonzero prior".to_string()))
}

/// Shared, read-only classifier handle. Cloning is cheap; every worker gets
/// its own clone of the same published model.
#[derive(Debug, Clone)]
pub struct Classifier {
    model: Arc<ModelCollection>,
}

impl Classifier {
    pub fn new(model: Arc<ModelCollection>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelCollection {
        &self.model
    }

    pub fn classify(&self, tokens: &[String]) -> Result<Classification, ClassifyError> {
        classify(tokens, &self.model)
    }

    /// Tokenize raw text and classify it.
    pub fn classify_text(&self, text: &str) -> Result<Classification, ClassifyError> {
        self.classify(&tokenize(text))
    }
}
