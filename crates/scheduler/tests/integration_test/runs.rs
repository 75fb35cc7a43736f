use shelf_model::ModelError;
use shelf_scheduler::{ModelOrigin, ModelPlan, RunPhase, SchedulerConfig, SchedulerError};

use crate::helpers::{genres, report_line, Workspace};

#[test]
fn first_run_trains_then_second_run_loads() {
    let ws = Workspace::new();
    let murder = ws.add_document("murder.txt", "The killer left the knife at the murder scene.");
    let trip = ws.add_document("trip.txt", "A slow journey by boat and train.");

    let first = ws.manager(SchedulerConfig::with_workers(2)).run(&ws.plan()).unwrap();
    assert!(matches!(first.model, ModelOrigin::Trained { documents: 4, persisted: true }));
    assert!(ws.model().exists());

    let mut expected = vec![report_line(&murder, "crime"), report_line(&trip, "travel")];
    expected.sort();
    assert_eq!(ws.report_lines(), expected);

    let second = ws.manager(SchedulerConfig::with_workers(3)).run(&ws.plan()).unwrap();
    assert!(matches!(second.model, ModelOrigin::Loaded { .. }));
    assert_eq!(second.predictions, first.predictions);

    // The report is append-only: both runs are recorded.
    assert_eq!(ws.report_lines().len(), 4);
}

#[test]
fn unwritable_model_path_still_classifies() {
    let ws = Workspace::new();
    let murder = ws.add_document("murder.txt", "The killer left the knife at the murder scene.");
    let blocker = ws.dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let model_path = blocker.join("model.dat");
    let plan = ModelPlan::new(&model_path, ws.dir.path().join("book.csv"), genres());
    let manager = ws.manager(SchedulerConfig::with_workers(2));

    let summary = manager.run(&plan).unwrap();

    assert_eq!(manager.phase().unwrap(), RunPhase::Done);
    assert!(matches!(summary.model, ModelOrigin::Trained { documents: 4, persisted: false }));
    assert_eq!(ws.report_lines(), vec![report_line(&murder, "crime")]);
    assert!(!model_path.exists());

    // Nothing was persisted, so the next run trains again.
    let again = ws.manager(SchedulerConfig::with_workers(1)).run(&plan).unwrap();
    assert!(matches!(again.model, ModelOrigin::Trained { persisted: false, .. }));
}

#[test]
fn unencodable_genre_leaves_no_partial_model() {
    let ws = Workspace::new();
    std::fs::write(
        ws.dir.path().join("book.csv"),
        "title,genre,summary\nA,crime,murder knife police\nB,cri\0me,a nul in the genre\n",
    )
    .unwrap();
    let doc = ws.add_document("a.txt", "murder");

    let summary = ws.manager(SchedulerConfig::with_workers(2)).run(&ws.plan()).unwrap();

    assert!(matches!(summary.model, ModelOrigin::Trained { documents: 2, persisted: false }));
    assert_eq!(ws.report_lines(), vec![report_line(&doc, "crime")]);
    assert!(!ws.model().exists());
}

#[test]
fn many_documents_across_weighted_workers() {
    let ws = Workspace::new();
    for i in 0..60 {
        let text = if i % 3 == 0 { "murder suspect police" } else { "journey beaches ferries" };
        ws.add_document(&format!("doc-{:02}.txt", i), text);
    }
    let config = SchedulerConfig::with_workers(3).with_efficiencies(vec![1, 2, 4]);
    let manager = ws.manager(config);

    let summary = manager.run(&ws.plan()).unwrap();

    assert_eq!(manager.phase().unwrap(), RunPhase::Done);
    assert_eq!(summary.classified(), 60);
    assert_eq!(summary.predictions["crime"], 20);
    assert_eq!(summary.predictions["travel"], 40);
    assert_eq!(ws.report_lines().len(), 60);

    let metrics = manager.context().metrics_snapshot().unwrap();
    assert_eq!(metrics.total_assigned(), 60);
    assert!(metrics.finished_at.is_some());
}

#[test]
fn binary_garbage_is_still_classified() {
    let ws = Workspace::new();
    std::fs::write(ws.documents().join("blob.bin"), b"\xff\xfe murder knife").unwrap();

    let summary = ws.manager(SchedulerConfig::with_workers(1)).run(&ws.plan()).unwrap();
    assert_eq!(summary.classified(), 1);
    assert_eq!(summary.predictions["crime"], 1);
}

#[test]
fn empty_directory_fails_before_training() {
    let ws = Workspace::new();
    let manager = ws.manager(SchedulerConfig::with_workers(2));

    assert!(matches!(manager.run(&ws.plan()), Err(SchedulerError::NoDocuments)));
    assert!(!ws.model().exists());
    assert!(!ws.report().exists());
}

#[test]
fn corrupt_model_is_fatal() {
    let ws = Workspace::new();
    ws.add_document("a.txt", "murder");
    std::fs::write(ws.model(), b"crime\0\x00\x00").unwrap();
    let manager = ws.manager(SchedulerConfig::with_workers(2));

    let err = manager.run(&ws.plan()).unwrap_err();
    assert!(matches!(err, SchedulerError::Model(ModelError::Malformed { .. })));
    assert_eq!(manager.phase().unwrap(), RunPhase::Failed);
    assert!(!ws.report().exists());
}
