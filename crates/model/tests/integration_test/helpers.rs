use shelf_core::LabeledText;
use shelf_model::{train, ModelCollection};

pub fn genres(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Small book-summary corpus with three well-separated genres.
pub fn book_corpus() -> Vec<LabeledText> {
    vec![
        LabeledText::new("crime", "The detective questioned the suspect about the murder."),
        LabeledText::new("crime", "A robbery at the bank; police chase the thief."),
        LabeledText::new("crime", "Evidence at the murder scene points to the butler."),
        LabeledText::new("travel", "A journey by train across the mountains of Europe."),
        LabeledText::new("travel", "Backpacking through Asia: beaches, temples, and trains."),
        LabeledText::new("science", "Quantum physics experiments reveal the nature of light."),
        LabeledText::new("science", "Evolution and genetics explain the diversity of life."),
    ]
}

pub fn trained_books() -> ModelCollection {
    train(&book_corpus(), &genres(&["crime", "travel", "science", "horror"])).unwrap()
}

/// Deterministic pseudo-random corpus (xorshift) for larger round-trips.
pub fn synthetic_corpus(seed: u64, documents: usize) -> Vec<LabeledText> {
    const GENRES: [&str; 4] = ["fantasy", "history", "sports", "psychology"];
    const WORDS: [&str; 12] = [
        "dragon", "empire", "goal", "mind", "sword", "war", "team", "dream", "magic", "king",
        "match", "fear",
    ];

    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    (0..documents)
        .map(|_| {
            let genre = GENRES[(next() % GENRES.len() as u64) as usize];
            let len = 1 + (next() % 20) as usize;
            let text: Vec<&str> = (0..len)
                .map(|_| WORDS[(next() % WORDS.len() as u64) as usize])
                .collect();
            LabeledText::new(genre, text.join(" "))
        })
        .collect()
}
