use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;
use shelf_core::{tokenize, LabeledText};
use tracing::{debug, info};

use crate::error::ModelError;
use crate::genre::{GenreModel, ModelCollection};

/// Raw counts gathered from one partition of the corpus.
#[derive(Debug, Default)]
struct PartialCounts {
    documents: u64,
    docs_per_genre: HashMap<String, u64>,
    words_per_genre: HashMap<String, HashMap<String, u64>>,
}

impl PartialCounts {
    fn add(mut self, record: &LabeledText) -> Self {
        self.documents += 1;
        *self.docs_per_genre.entry(record.genre.clone()).or_default() += 1;

        let words = self.words_per_genre.entry(record.genre.clone()).or_default();
        for token in tokenize(&record.text) {
            *words.entry(token).or_default() += 1;
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.documents += other.documents;
        for (genre, n) in other.docs_per_genre {
            *self.docs_per_genre.entry(genre).or_default() += n;
        }
        for (genre, words) in other.words_per_genre {
            let into = self.words_per_genre.entry(genre).or_default();
            for (word, n) in words {
                *into.entry(word).or_default() += n;
            }
        }
        self
    }
}

/// Train a model from labeled text.
///
/// Every genre in `predefined_genres` is present in the result; genres the
/// corpus never mentions get zero statistics. Genres that appear only in the
/// corpus are included too. Either a complete collection is returned or an
/// error, never a partially normalized model.
pub fn train(
    corpus: &[LabeledText],
    predefined_genres: &[String],
) -> Result<ModelCollection, ModelError> {
    let start = Instant::now();

    // Phase 1: parallel counting, one partial per rayon split, merged pairwise
    let counts = corpus
        .par_iter()
        .fold(PartialCounts::default, PartialCounts::add)
        .reduce(PartialCounts::default, PartialCounts::merge);

    // Phase 2: sequential normalization
    let mut collection = ModelCollection::with_total_documents(counts.documents);
    for name in predefined_genres {
        collection.insert(GenreModel::empty(name.as_str()));
    }

    for (genre, words) in counts.words_per_genre {
        let total: u64 = words.values().sum();
        let total_words_in_genre = u32::try_from(total)
            .ok()
            .filter(|t| *t <= i32::MAX as u32)
            .ok_or_else(|| ModelError::Overflow {
                genre: genre.clone(),
                max: i32::MAX,
            })?;

        let doc_count = counts.docs_per_genre.get(&genre).copied().unwrap_or(0);
        let prior_probability = if counts.documents > 0 {
            doc_count as f64 / counts.documents as f64
        } else {
            0.0
        };

        let word_probabilities = words
            .into_iter()
            .map(|(word, n)| (word, n as f64 / total as f64))
            .collect();

        debug!(
            genre = %genre,
            documents = doc_count,
            words = total_words_in_genre,
            "genre trained"
        );

        collection.insert(GenreModel {
            name: genre,
            prior_probability,
            total_words_in_genre,
            word_probabilities,
        });
    }

    info!(
        documents = counts.documents,
        genres = collection.len(),
        usable = collection.usable_genres(),
        "Trained model in {:.1}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(collection)
}
