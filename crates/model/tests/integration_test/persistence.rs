use std::fs;

use shelf_model::{train, ModelError, ModelStore, SaveOutcome};

use crate::helpers::{genres, synthetic_corpus, trained_books};

#[test]
fn trained_model_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ModelStore::new(tmp.path().join("model.dat"));
    let model = trained_books();

    store.save(&model).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, model);
    for genre in model.iter() {
        let other = loaded.get(&genre.name).unwrap();
        assert_eq!(other.total_words_in_genre, genre.total_words_in_genre);
        assert_eq!(other.prior_probability.to_bits(), genre.prior_probability.to_bits());
    }
}

#[test]
fn synthetic_models_round_trip() {
    for seed in [1, 7, 42, 1234] {
        let tmp = tempfile::tempdir().unwrap();
        let store = ModelStore::new(tmp.path().join("model.dat"));
        let model = train(&synthetic_corpus(seed, 300), &genres(&["travel"])).unwrap();

        store.save(&model).unwrap();
        assert_eq!(store.load().unwrap(), model, "seed {}", seed);
    }
}

#[test]
fn saving_twice_to_same_path_keeps_first_model() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ModelStore::new(tmp.path().join("model.dat"));
    let first = trained_books();
    let second = train(&synthetic_corpus(3, 50), &[]).unwrap();

    assert!(matches!(store.save(&first).unwrap(), SaveOutcome::Written { .. }));
    assert!(matches!(store.save(&second).unwrap(), SaveOutcome::Skipped { .. }));
    assert_eq!(store.load().unwrap(), first);
}

#[test]
fn identical_models_encode_identically() {
    let tmp = tempfile::tempdir().unwrap();
    let a = ModelStore::new(tmp.path().join("a.dat"));
    let b = ModelStore::new(tmp.path().join("b.dat"));

    a.save(&trained_books()).unwrap();
    b.save(&trained_books()).unwrap();

    assert_eq!(fs::read(a.path()).unwrap(), fs::read(b.path()).unwrap());
}

#[test]
fn garbage_file_is_malformed() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("model.dat");
    fs::write(&path, b"not a model at all").unwrap();

    assert!(matches!(ModelStore::new(&path).load(), Err(ModelError::Malformed { .. })));
}
