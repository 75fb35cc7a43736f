use std::collections::BTreeMap;

/// Per-genre word statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenreModel {
    pub name: String,
    /// Fraction of training documents labeled with this genre.
    pub prior_probability: f64,
    /// Token occurrences seen for this genre during training.
    pub total_words_in_genre: u32,
    /// token -> count / total_words_in_genre
    pub word_probabilities: BTreeMap<String, f64>,
}

impl GenreModel {
    /// A genre with no statistics (zero prior, empty word table).
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A genre with a zero prior can never be selected.
    pub fn is_usable(&self) -> bool {
        self.prior_probability > 0.0
    }

    /// Probability used for tokens missing from the word table.
    pub fn unseen_probability(&self) -> f64 {
        1.0 / (f64::from(self.total_words_in_genre) + 1.0)
    }

    /// P(token | genre), falling back to [`Self::unseen_probability`].
    pub fn word_probability(&self, token: &str) -> f64 {
        self.word_probabilities
            .get(token)
            .copied()
            .unwrap_or_else(|| self.unseen_probability())
    }
}

/// All genre models of one trained or loaded model, ordered by genre name.
/// Iteration order is the arg-max tie-break order.
#[derive(Debug, Clone, Default)]
pub struct ModelCollection {
    genres: BTreeMap<String, GenreModel>,
    total_documents: Option<u64>,
}

impl ModelCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection with a known training document count.
    pub fn with_total_documents(total_documents: u64) -> Self {
        Self {
            genres: BTreeMap::new(),
            total_documents: Some(total_documents),
        }
    }

    /// Insert a genre, returning the model it replaced, if any.
    pub fn insert(&mut self, model: GenreModel) -> Option<GenreModel> {
        self.genres.insert(model.name.clone(), model)
    }

    pub fn get(&self, genre: &str) -> Option<&GenreModel> {
        self.genres.get(genre)
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.genres.contains_key(genre)
    }

    /// Genres in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = &GenreModel> {
        self.genres.values()
    }

    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    /// Number of genres with a nonzero prior.
    pub fn usable_genres(&self) -> usize {
        self.genres.values().filter(|g| g.is_usable()).count()
    }

    /// Training document count. Not persisted, so `None` after a load.
    pub fn total_documents(&self) -> Option<u64> {
        self.total_documents
    }
}

/// Collections are equal when they hold the same genres; the training
/// document count is not part of the persisted model.
impl PartialEq for ModelCollection {
    fn eq(&self, other: &Self) -> bool {
        self.genres == other.genres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(name: &str, prior: f64, words: &[(&str, f64)], total: u32) -> GenreModel {
        GenreModel {
            name: name.to_string(),
            prior_probability: prior,
            total_words_in_genre: total,
            word_probabilities: words.iter().map(|(w, p)| (w.to_string(), *p)).collect(),
        }
    }

    #[test]
    fn unseen_word_uses_fallback() {
        let g = genre("romance", 0.5, &[("love", 0.75)], 3);
        assert_eq!(g.word_probability("love"), 0.75);
        assert_eq!(g.word_probability("knife"), 0.25);
    }

    #[test]
    fn empty_genre_is_unusable() {
        let g = GenreModel::empty("horror");
        assert!(!g.is_usable());
        assert_eq!(g.unseen_probability(), 1.0);
    }

    #[test]
    fn iteration_is_lexicographic() {
        let mut c = ModelCollection::new();
        c.insert(GenreModel::empty("thriller"));
        c.insert(GenreModel::empty("crime"));
        c.insert(GenreModel::empty("romance"));
        let names: Vec<&str> = c.genre_names().collect();
        assert_eq!(names, vec!["crime", "romance", "thriller"]);
    }

    #[test]
    fn equality_ignores_document_count() {
        let mut a = ModelCollection::with_total_documents(7);
        let mut b = ModelCollection::new();
        a.insert(genre("crime", 1.0, &[("gun", 1.0)], 1));
        b.insert(genre("crime", 1.0, &[("gun", 1.0)], 1));
        assert_eq!(a, b);
        assert_eq!(a.total_documents(), Some(7));
        assert_eq!(b.total_documents(), None);
    }

    #[test]
    fn insert_reports_replacement() {
        let mut c = ModelCollection::new();
        assert!(c.insert(GenreModel::empty("crime")).is_none());
        assert!(c.insert(GenreModel::empty("crime")).is_some());
        assert_eq!(c.len(), 1);
    }
}
