//! Integration tests for the event store.
//!
//! These talk to a real MongoDB instance (`mongodb://localhost:27017`,
//! override with `AGENDA_MONGODB_URI`) and are gated behind a cargo
//! feature so a plain `cargo test` stays self-contained:
//!
//!     cargo test --features integration_tests
//!
//! Each test runs in its own throwaway database and drops it at the end.
#![cfg(feature = "integration_tests")]

use agenda_core::{EventStore, StoredEvent};
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Database};

async fn fresh_store() -> (Database, EventStore) {
    let uri = std::env::var("AGENDA_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let client = Client::with_uri_str(&uri)
        .await
        .expect("Should connect to MongoDB");

    let db = client.database(&format!("agenda_test_{}", ObjectId::new().to_hex()));
    let store = EventStore::new(&db);
    (db, store)
}

async fn teardown(db: Database) {
    db.drop().await.expect("Should drop test database");
}

fn ids(events: &[StoredEvent]) -> Vec<String> {
    let mut ids: Vec<String> = events.iter().map(|e| e.id.clone()).collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn test_add_valid_date_creates_one_pending_event() {
    let (db, store) = fresh_store().await;

    let added = store
        .add("Dentist", "2024-03-15", "Health")
        .await
        .expect("Should reach the collection");
    assert!(added);

    let pending = store.list_pending().await.expect("Should list");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].record.title, "Dentist");
    assert_eq!(pending[0].record.category, "Health");
    assert!(!pending[0].record.completed);

    assert!(store.list_completed().await.expect("Should list").is_empty());

    teardown(db).await;
}

#[tokio::test]
async fn test_add_malformed_date_is_a_pure_no_op() {
    let (db, store) = fresh_store().await;

    store
        .add("Existing", "2024-03-15", "X")
        .await
        .expect("Should insert");

    for bad in ["2024-13-40", "not-a-date", "", "15-03-2024"] {
        let added = store.add("Bad", bad, "X").await.expect("Should not error");
        assert!(!added, "'{}' should be rejected", bad);
    }

    let pending = store.list_pending().await.expect("Should list");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].record.title, "Existing");
    assert!(store.list_completed().await.expect("Should list").is_empty());

    teardown(db).await;
}

#[tokio::test]
async fn test_duplicate_events_are_allowed() {
    let (db, store) = fresh_store().await;

    for _ in 0..3 {
        assert!(store.add("Gym", "2024-03-15", "Sport").await.expect("Should insert"));
    }

    assert_eq!(store.list_pending().await.expect("Should list").len(), 3);

    teardown(db).await;
}

#[tokio::test]
async fn test_toggle_moves_event_between_lists() {
    let (db, store) = fresh_store().await;

    store
        .add("Dentist", "2024-03-15", "Health")
        .await
        .expect("Should insert");
    let id = store.list_pending().await.expect("Should list")[0].id.clone();

    assert!(store.toggle(&id).await.expect("Should toggle"));

    assert!(store.list_pending().await.expect("Should list").is_empty());
    let completed = store.list_completed().await.expect("Should list");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, id);
    assert!(completed[0].record.completed);

    teardown(db).await;
}

#[tokio::test]
async fn test_toggle_twice_restores_original_state() {
    let (db, store) = fresh_store().await;

    store
        .add("Dentist", "2024-03-15", "Health")
        .await
        .expect("Should insert");
    let before = store.list_pending().await.expect("Should list");
    let id = before[0].id.clone();

    assert!(store.toggle(&id).await.expect("Should toggle"));
    assert!(store.toggle(&id).await.expect("Should toggle"));

    let after = store.list_pending().await.expect("Should list");
    assert_eq!(after, before);

    teardown(db).await;
}

#[tokio::test]
async fn test_toggle_and_delete_unknown_id_are_no_ops() {
    let (db, store) = fresh_store().await;

    store
        .add("Dentist", "2024-03-15", "Health")
        .await
        .expect("Should insert");
    let before = store.list_pending().await.expect("Should list");

    // A well-formed identifier that was never issued, and text that is
    // not an identifier at all
    for id in [ObjectId::new().to_hex(), "definitely-not-an-id".to_string()] {
        assert!(!store.toggle(&id).await.expect("Should not error"));
        assert!(!store.delete(&id).await.expect("Should not error"));
    }

    assert_eq!(store.list_pending().await.expect("Should list"), before);
    assert!(store.list_completed().await.expect("Should list").is_empty());

    teardown(db).await;
}

#[tokio::test]
async fn test_delete_removes_event_from_both_lists() {
    let (db, store) = fresh_store().await;

    store
        .add("Dentist", "2024-03-15", "Health")
        .await
        .expect("Should insert");
    let id = store.list_pending().await.expect("Should list")[0].id.clone();

    assert!(store.delete(&id).await.expect("Should delete"));

    assert!(store.list_pending().await.expect("Should list").is_empty());
    assert!(store.list_completed().await.expect("Should list").is_empty());

    // Deleting again is a no-op
    assert!(!store.delete(&id).await.expect("Should not error"));

    teardown(db).await;
}

#[tokio::test]
async fn test_pending_and_completed_partition_all_events() {
    let (db, store) = fresh_store().await;

    for (title, date) in [
        ("One", "2024-03-15"),
        ("Two", "2024-04-01"),
        ("Three", "2024-05-20"),
    ] {
        store.add(title, date, "Misc").await.expect("Should insert");
    }

    let first = store.list_pending().await.expect("Should list")[0].id.clone();
    store.toggle(&first).await.expect("Should toggle");

    let pending = store.list_pending().await.expect("Should list");
    let completed = store.list_completed().await.expect("Should list");
    let all = store.list_all().await.expect("Should list");

    assert_eq!(pending.len(), 2);
    assert_eq!(completed.len(), 1);
    assert_eq!(all.len(), 3);

    let mut union = ids(&pending);
    union.extend(ids(&completed));
    union.sort();
    assert_eq!(union, ids(&all));

    for event in &pending {
        assert!(!completed.iter().any(|c| c.id == event.id));
    }

    teardown(db).await;
}

#[tokio::test]
async fn test_full_lifecycle_scenario() {
    let (db, store) = fresh_store().await;

    assert!(store.add("Dentist", "2024-03-15", "Health").await.expect("Should insert"));

    let pending = store.list_pending().await.expect("Should list");
    assert_eq!(pending.len(), 1);
    let id = pending[0].id.clone();

    store.toggle(&id).await.expect("Should toggle");
    assert!(store.list_pending().await.expect("Should list").is_empty());
    assert_eq!(store.list_completed().await.expect("Should list").len(), 1);

    store.delete(&id).await.expect("Should delete");
    assert!(store.list_pending().await.expect("Should list").is_empty());
    assert!(store.list_completed().await.expect("Should list").is_empty());

    teardown(db).await;
}
