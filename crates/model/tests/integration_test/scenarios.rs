use std::sync::Arc;

use shelf_core::LabeledText;
use shelf_model::{train, Classifier, ClassifyError, ModelStore};

use crate::helpers::{genres, trained_books};

#[test]
fn thriller_romance_scenario() {
    let corpus = vec![
        LabeledText::new("thriller", "dark killer knife"),
        LabeledText::new("romance", "love heart love"),
    ];
    let model = train(&corpus, &genres(&["thriller", "romance"])).unwrap();

    assert_eq!(model.get("thriller").unwrap().prior_probability, 0.5);
    assert_eq!(model.get("romance").unwrap().prior_probability, 0.5);
    assert!((model.get("romance").unwrap().word_probabilities["love"] - 2.0 / 3.0).abs() < 1e-12);

    let classifier = Classifier::new(Arc::new(model));
    assert_eq!(classifier.classify_text("love love heart").unwrap().genre, "romance");
}

#[test]
fn book_summaries_classify_by_vocabulary() {
    let classifier = Classifier::new(Arc::new(trained_books()));

    assert_eq!(classifier.classify_text("The police found the murder weapon").unwrap().genre, "crime");
    assert_eq!(classifier.classify_text("Backpacking trains across Europe and Asia").unwrap().genre, "travel");
    assert_eq!(classifier.classify_text("Genetics of light and life").unwrap().genre, "science");
}

#[test]
fn loaded_model_classifies_like_trained_model() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ModelStore::new(tmp.path().join("model.dat"));
    let trained = trained_books();
    store.save(&trained).unwrap();

    let a = Classifier::new(Arc::new(trained));
    let b = Classifier::new(Arc::new(store.load().unwrap()));

    for text in ["a thief on a train", "", "quantum murder", "unknown words only"] {
        assert_eq!(a.classify_text(text).unwrap(), b.classify_text(text).unwrap());
    }
}

#[test]
fn genre_without_documents_never_selected() {
    let classifier = Classifier::new(Arc::new(trained_books()));
    for text in ["horror", "ghosts haunt the house", ""] {
        assert_ne!(classifier.classify_text(text).unwrap().genre, "horror");
    }
}

#[test]
fn model_trained_on_nothing_cannot_classify() {
    let model = train(&[], &genres(&["crime", "travel"])).unwrap();
    let classifier = Classifier::new(Arc::new(model));
    assert!(matches!(classifier.classify_text("anything"), Err(ClassifyError::NoModel(_))));
}
