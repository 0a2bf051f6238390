/// Record store routing tests
///
/// Insert/update routing by id presence, owner scoping, and delete
/// outcomes, exercised against the in-memory store implementation.
/// Run with: cargo test --test store_routing_tests
use vaultsync::{DeleteOutcome, MemoryStore, OwnerId, Record, RecordStore, SyncError};

fn named(name: &str) -> Record {
    let mut record = Record::new();
    record.set("name", name);
    record
}

fn names(rows: &[Record]) -> Vec<&str> {
    let mut names: Vec<&str> = rows.iter().filter_map(|r| r.get_str("name")).collect();
    names.sort_unstable();
    names
}

#[tokio::test]
async fn test_no_op_round_trip_is_idempotent() {
    let store = MemoryStore::new();
    let owner = OwnerId::new("u-1");

    store
        .upsert_many("education", vec![named("BSc"), named("MSc")], &owner)
        .await
        .unwrap();
    let first = store.fetch_all("education", &owner).await.unwrap();

    // Writing back exactly what was fetched changes nothing.
    store
        .upsert_many("education", first.clone(), &owner)
        .await
        .unwrap();
    let second = store.fetch_all("education", &owner).await.unwrap();

    assert_eq!(names(&first), names(&second));
    assert_eq!(
        first.iter().map(Record::id).collect::<Vec<_>>(),
        second.iter().map(Record::id).collect::<Vec<_>>()
    );
    assert_eq!(store.calls().inserts, 2);
    assert_eq!(store.calls().updates, 2);
}

#[tokio::test]
async fn test_record_without_id_routes_to_insert_exactly_once() {
    let store = MemoryStore::new();
    let owner = OwnerId::new("u-1");

    store
        .upsert_many("documents", vec![named("passport")], &owner)
        .await
        .unwrap();

    assert_eq!(store.calls().inserts, 1);
    assert_eq!(store.calls().updates, 0);
    assert_eq!(store.rows("documents").await.len(), 1);
}

#[tokio::test]
async fn test_record_with_id_routes_to_update_never_insert() {
    let store = MemoryStore::new();
    let owner = OwnerId::new("u-1");

    store
        .upsert_many("documents", vec![named("passport")], &owner)
        .await
        .unwrap();
    let mut row = store.fetch_all("documents", &owner).await.unwrap().remove(0);
    row.set("name", "passport-renewed");

    store.upsert_many("documents", vec![row], &owner).await.unwrap();

    assert_eq!(store.calls().inserts, 1);
    assert_eq!(store.calls().updates, 1);
    let rows = store.fetch_all("documents", &owner).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str("name"), Some("passport-renewed"));
}

#[tokio::test]
async fn test_update_never_crosses_owners() {
    let store = MemoryStore::new();
    let owner_a = OwnerId::new("owner-a");
    let owner_b = OwnerId::new("owner-b");

    store
        .upsert_many("vehicles", vec![named("a-car")], &owner_a)
        .await
        .unwrap();
    let stolen = store.fetch_all("vehicles", &owner_a).await.unwrap().remove(0);

    // Owner B replays A's row, id included. The update filter requires
    // both id and owner, so nothing matches and nothing changes.
    let mut forged = stolen.clone();
    forged.set("name", "b-car");
    store.upsert_many("vehicles", vec![forged], &owner_b).await.unwrap();

    let rows = store.fetch_all("vehicles", &owner_a).await.unwrap();
    assert_eq!(rows[0].get_str("name"), Some("a-car"));
    assert!(store.fetch_all("vehicles", &owner_b).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upsert_stamps_the_calling_owner() {
    let store = MemoryStore::new();
    let owner = OwnerId::new("owner-a");

    let mut record = named("x");
    record.set_owner(&OwnerId::new("someone-else"));
    store.upsert_many("vehicles", vec![record], &owner).await.unwrap();

    let rows = store.rows("vehicles").await;
    assert_eq!(rows[0].owner().unwrap().as_str(), "owner-a");
}

#[tokio::test]
async fn test_delete_own_row() {
    let store = MemoryStore::new();
    let owner = OwnerId::new("u-1");
    let id = store.seed("vehicles", {
        let mut r = named("mine");
        r.set_owner(&owner);
        r
    })
    .await;

    assert_eq!(
        store.delete_one("vehicles", &id, &owner).await.unwrap(),
        DeleteOutcome::Deleted
    );
    assert!(store.fetch_all("vehicles", &owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_not_owned_row_reports_not_found_and_leaves_it() {
    let store = MemoryStore::new();
    let owner_a = OwnerId::new("owner-a");
    let id = store.seed("vehicles", {
        let mut r = named("a-car");
        r.set_owner(&owner_a);
        r
    })
    .await;

    let outcome = store
        .delete_one("vehicles", &id, &OwnerId::new("owner-b"))
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::NotFound);

    // The true owner still sees the row.
    let rows = store.fetch_all("vehicles", &owner_a).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str("name"), Some("a-car"));
}

#[tokio::test]
async fn test_unresolved_owner_is_rejected_without_any_call() {
    let store = MemoryStore::new();
    let nobody = OwnerId::new("");

    assert!(matches!(
        store.fetch_all("vehicles", &nobody).await.unwrap_err(),
        SyncError::AuthRequired
    ));
    assert!(matches!(
        store
            .upsert_many("vehicles", vec![named("x")], &nobody)
            .await
            .unwrap_err(),
        SyncError::AuthRequired
    ));
    assert!(matches!(
        store
            .delete_one("vehicles", &vaultsync::RecordId::new("id"), &nobody)
            .await
            .unwrap_err(),
        SyncError::AuthRequired
    ));

    let calls = store.calls();
    assert_eq!(calls.fetches, 0);
    assert_eq!(calls.deletes, 0);
    assert_eq!(calls.inserts + calls.updates, 0);
}

#[tokio::test]
async fn test_server_timestamps_are_store_assigned() {
    let store = MemoryStore::new();
    let owner = OwnerId::new("u-1");

    // Client-supplied timestamps are stripped before the write.
    let mut record = named("x");
    record.set("created_at", "1999-01-01T00:00:00Z");
    record.set("updated_at", "1999-01-01T00:00:00Z");
    store.upsert_many("vehicles", vec![record], &owner).await.unwrap();

    let rows = store.fetch_all("vehicles", &owner).await.unwrap();
    assert_ne!(rows[0].get_str("created_at"), Some("1999-01-01T00:00:00Z"));
    assert_ne!(rows[0].get_str("updated_at"), Some("1999-01-01T00:00:00Z"));
}
