use compendium_core::db::open_db;
use compendium_core::{
    Appointment, CompendiumStore, Goal, LocalCache, Note, Snapshot, SqliteKeyValueStore,
    SNAPSHOT_STORAGE_KEY,
};
use serde_json::json;

#[test]
fn snapshot_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");

    let mut store = CompendiumStore::new();
    store.add_note(Note::new("Groceries", "milk, eggs"));
    store.add_appointment(Appointment::new("Dentist", "2026-11-02", "09:15"));
    store.add_goal(Goal::new("Read", "12 books"));
    let expected = store.get_data_for_save();

    {
        let conn = open_db(&path).unwrap();
        let cache = LocalCache::new(SqliteKeyValueStore::new(&conn));
        assert!(cache.save_snapshot(&expected));
    }

    let conn = open_db(&path).unwrap();
    let cache = LocalCache::new(SqliteKeyValueStore::new(&conn));
    assert!(cache.exists(SNAPSHOT_STORAGE_KEY));

    let mut restored = CompendiumStore::new();
    restored.restore_local(cache.load_snapshot());
    assert_eq!(restored.get_data_for_save(), expected);
}

#[test]
fn corrupted_snapshot_loads_as_empty() {
    let conn = open_db_in_memory_with_snapshot("{\"notes\": 42}");
    let cache = LocalCache::new(SqliteKeyValueStore::new(&conn));

    assert_eq!(cache.load_snapshot(), Snapshot::default());
}

#[test]
fn generic_values_round_trip_and_clear() {
    let conn = compendium_core::db::open_db_in_memory().unwrap();
    let cache = LocalCache::new(SqliteKeyValueStore::new(&conn));

    assert!(cache.save("k", &json!({"a": 1})));
    assert_eq!(cache.load("k", json!({})), json!({"a": 1}));

    assert!(cache.clear());
    assert!(!cache.exists("k"));
    assert_eq!(
        cache.load("k", json!({"fallback": true})),
        json!({"fallback": true})
    );
}

fn open_db_in_memory_with_snapshot(raw: &str) -> rusqlite::Connection {
    let conn = compendium_core::db::open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES (?1, ?2);",
        [SNAPSHOT_STORAGE_KEY, raw],
    )
    .unwrap();
    conn
}
