//! Integration tests for the `trivia-db` data layer.
//!
//! Every test runs against its own in-memory `SQLite` database with the
//! embedded migrations applied, so no external services are needed.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing
)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use trivia_db::{ScoreStore, SqliteConfig, SqliteDb};
use trivia_types::AttemptId;

async fn setup() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("Failed to open in-memory database")
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
}

#[tokio::test]
async fn submit_assigns_increasing_ids() {
    let db = setup().await;
    let store = ScoreStore::new(db.pool());

    let first = store.submit("alice", 12_000, 9).await.unwrap();
    let second = store.submit("alice", 11_000, 9).await.unwrap();
    let third = store.submit("bob", 30_000, 4).await.unwrap();

    assert!(first < second);
    assert!(second < third);
    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn submitted_record_round_trips() {
    let db = setup().await;
    let store = ScoreStore::new(db.pool());
    let at = base_time() + Duration::milliseconds(321);

    let id = store.submit_at("carol", 45_678, 9, at).await.unwrap();
    let record = store.get(id).await.unwrap().expect("record exists");

    assert_eq!(record.id, id);
    assert_eq!(record.username, "carol");
    assert_eq!(record.time_ms, 45_678);
    assert_eq!(record.tiles_unlocked, 9);
    assert_eq!(record.created_at, at);

    assert!(store.get(AttemptId(9_999)).await.unwrap().is_none());
}

#[tokio::test]
async fn leaderboard_excludes_partial_attempts() {
    let db = setup().await;
    let store = ScoreStore::new(db.pool());

    store.submit("quitter", 1_000, 8).await.unwrap();
    store.submit("starter", 500, 0).await.unwrap();
    store.submit("finisher", 50_000, 9).await.unwrap();

    let board = store.leaderboard(None).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].username, "finisher");
    assert!(board.iter().all(|e| e.tiles_unlocked == 9));
}

#[tokio::test]
async fn leaderboard_orders_by_time_then_submission() {
    let db = setup().await;
    let store = ScoreStore::new(db.pool());
    let t0 = base_time();

    // Inserted out of order on purpose.
    store
        .submit_at("late-tie", 20_000, 9, t0 + Duration::seconds(10))
        .await
        .unwrap();
    store.submit_at("slow", 90_000, 9, t0).await.unwrap();
    store
        .submit_at("early-tie", 20_000, 9, t0 + Duration::seconds(5))
        .await
        .unwrap();
    store
        .submit_at("fastest", 15_000, 9, t0 + Duration::seconds(20))
        .await
        .unwrap();

    let board = store.leaderboard(None).await.unwrap();
    let names: Vec<&str> = board.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(names, ["fastest", "early-tie", "late-tie", "slow"]);

    for pair in board.windows(2) {
        assert!(pair[0].time_ms <= pair[1].time_ms);
        if pair[0].time_ms == pair[1].time_ms {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }
}

#[tokio::test]
async fn identical_time_and_timestamp_fall_back_to_insert_order() {
    let db = setup().await;
    let store = ScoreStore::new(db.pool());
    let t0 = base_time();

    store.submit_at("first", 10_000, 9, t0).await.unwrap();
    store.submit_at("second", 10_000, 9, t0).await.unwrap();

    let board = store.leaderboard(None).await.unwrap();
    assert_eq!(board[0].username, "first");
    assert_eq!(board[1].username, "second");
}

#[tokio::test]
async fn leaderboard_limit_returns_fastest() {
    let db = setup().await;
    let store = ScoreStore::new(db.pool());
    let t0 = base_time();

    store.submit_at("e", 50_000, 9, t0).await.unwrap();
    store.submit_at("b", 20_000, 9, t0 + Duration::seconds(2)).await.unwrap();
    store.submit_at("d", 40_000, 9, t0).await.unwrap();
    store.submit_at("a", 20_000, 9, t0 + Duration::seconds(1)).await.unwrap();
    store.submit_at("c", 30_000, 9, t0).await.unwrap();

    let top = store.leaderboard(Some(2)).await.unwrap();
    let names: Vec<&str> = top.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(names, ["a", "b"]);

    assert_eq!(store.leaderboard(None).await.unwrap().len(), 5);
    assert_eq!(store.leaderboard(Some(50)).await.unwrap().len(), 5);
    assert!(store.leaderboard(Some(0)).await.unwrap().is_empty());
}

#[tokio::test]
async fn same_user_keeps_every_attempt() {
    let db = setup().await;
    let store = ScoreStore::new(db.pool());

    store.submit("alice", 30_000, 9).await.unwrap();
    store.submit("alice", 25_000, 9).await.unwrap();

    let board = store.leaderboard(None).await.unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].time_ms, 25_000);
    assert_eq!(board[1].time_ms, 30_000);
}

#[tokio::test]
async fn file_database_persists_across_connections() {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "trivia-db-test-{}-{nanos}.sqlite",
        std::process::id()
    ));
    let url = format!("sqlite://{}?mode=rwc", path.display());

    {
        let db = SqliteDb::connect(&SqliteConfig::new(&url)).await.unwrap();
        db.run_migrations().await.unwrap();
        ScoreStore::new(db.pool())
            .submit("persisted", 1_234, 9)
            .await
            .unwrap();
        db.close().await;
    }

    let db = SqliteDb::connect(&SqliteConfig::new(&url)).await.unwrap();
    db.run_migrations().await.unwrap();
    let board = ScoreStore::new(db.pool()).leaderboard(None).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].username, "persisted");
    db.close().await;

    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
