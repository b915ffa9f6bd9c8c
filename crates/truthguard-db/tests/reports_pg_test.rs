//! Live-Postgres integration tests for the report repository.
//!
//! Requires a running database (DATABASE_URL, or the default test URL on
//! port 15432). Run with:
//!
//! ```sh
//! cargo test -p truthguard-db -- --ignored
//! ```

use truthguard_db::{Database, ReportRepository, TruthLabel, DEFAULT_TEST_DATABASE_URL};

async fn test_db() -> Database {
    dotenvy::dotenv().ok();
    let url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string());
    let db = Database::connect(&url).await.expect("connect test db");
    db.migrate().await.expect("run migrations");
    db
}

#[tokio::test]
#[ignore]
async fn test_create_and_fetch_round_trip() {
    let db = test_db().await;

    let created = db
        .reports
        .create("Scientists confirm water is wet", TruthLabel::Real, 100)
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.label, TruthLabel::Real);
    assert_eq!(created.confidence, 100);

    let listed = db.reports.list_recent(1).await.unwrap();
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].text, "Scientists confirm water is wet");
}

#[tokio::test]
#[ignore]
async fn test_counts_track_created_labels() {
    let db = test_db().await;

    let before = db.reports.counts_by_label().await.unwrap();
    db.reports
        .create("dubious claim", TruthLabel::Suspicious, 50)
        .await
        .unwrap();
    let after = db.reports.counts_by_label().await.unwrap();

    assert_eq!(after.total_reports, before.total_reports + 1);
    assert_eq!(after.suspicious_count, before.suspicious_count + 1);
    assert_eq!(after.real_count, before.real_count);
    assert_eq!(after.fake_count, before.fake_count);
}

#[tokio::test]
#[ignore]
async fn test_list_recent_orders_newest_first() {
    let db = test_db().await;

    let first = db.reports.create("older", TruthLabel::Fake, 10).await.unwrap();
    let second = db.reports.create("newer", TruthLabel::Real, 90).await.unwrap();

    let listed = db.reports.list_recent(100).await.unwrap();
    let pos_first = listed.iter().position(|r| r.id == first.id).unwrap();
    let pos_second = listed.iter().position(|r| r.id == second.id).unwrap();
    assert!(pos_second < pos_first, "newer report must come first");
}
