use storage::repository::{
    PreferencesRepository, ProgressRepository, ProgressSnapshot, StorageError,
};
use storage::sqlite::SqliteRepository;
use trek_core::model::{AccessibilityPrefs, ProgressRecord, TextSize};

#[tokio::test]
async fn sqlite_round_trips_progress() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_progress().await.unwrap().is_none());

    let mut record = ProgressRecord::new();
    record.add_points(1050);
    record.extend_streak();
    record.extend_streak();
    record.insert_badge("Level 2 Scholar");
    record.insert_badge("Timeline Master");

    repo.save_progress(&ProgressSnapshot::from_record(&record))
        .await
        .unwrap();

    let loaded = repo
        .load_progress()
        .await
        .unwrap()
        .expect("saved progress")
        .into_record()
        .expect("valid record");
    assert_eq!(loaded, record);
}

#[tokio::test]
async fn sqlite_overwrites_whole_progress_record() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut record = ProgressRecord::new();
    record.add_points(100);
    repo.save_progress(&ProgressSnapshot::from_record(&record))
        .await
        .unwrap();

    record.add_points(400);
    record.insert_badge("History Explorer");
    repo.save_progress(&ProgressSnapshot::from_record(&record))
        .await
        .unwrap();

    let loaded = repo.load_progress().await.unwrap().expect("saved progress");
    assert_eq!(loaded.points, 500);
    assert_eq!(loaded.badges, vec!["History Explorer".to_owned()]);
}

#[tokio::test]
async fn sqlite_round_trips_preferences() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_prefs?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_preferences().await.unwrap().is_none());

    let prefs = AccessibilityPrefs {
        text_size: TextSize::Large,
        high_contrast: true,
        screen_reader: false,
        dyslexic_font: true,
    };
    repo.save_preferences(&prefs).await.unwrap();

    let loaded = repo.load_preferences().await.unwrap().expect("saved prefs");
    assert_eq!(loaded, prefs);
}

#[tokio::test]
async fn corrupt_blob_surfaces_as_serialization_error() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_corrupt?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    sqlx::query("INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)")
        .bind("gamification-progress")
        .bind("{not json")
        .bind("2024-01-01T00:00:00Z")
        .execute(repo.pool())
        .await
        .unwrap();

    let err = repo.load_progress().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}
