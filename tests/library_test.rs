use serde_json::json;
use spotipod::management::{
    ALBUMS_KEY, LibraryFilter, LibraryManager, LibraryStore, PLAYLISTS_KEY,
};
use spotipod::types::{ItemKind, Library, LibraryEntry, timestamp_now};
use tempfile::TempDir;

// Helper function to create a provider object with a few extra fields
fn create_test_entry(id: &str, name: &str) -> LibraryEntry {
    LibraryEntry(json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:x:{id}"),
        "images": [{ "url": format!("https://img/{id}") }],
        "tracks": { "total": 12 }
    }))
}

mod manager {
    use super::*;

    #[test]
    fn test_import_deduplicates_by_id() {
        let mut manager = LibraryManager::new("unused");

        assert!(manager.import(ItemKind::Playlist, create_test_entry("p1", "One")));
        assert!(!manager.import(ItemKind::Playlist, create_test_entry("p1", "Renamed")));
        // the same id may live in the other list
        assert!(manager.import(ItemKind::Album, create_test_entry("p1", "Album")));

        assert_eq!(manager.playlists().len(), 1);
        assert_eq!(manager.playlists()[0].name(), "One");
        assert!(manager.contains(ItemKind::Album, "p1"));
    }

    #[test]
    fn test_entries_without_id_are_refused() {
        let mut manager = LibraryManager::new("unused");
        assert!(!manager.import(ItemKind::Album, LibraryEntry(json!({ "name": "x" }))));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_items_order_and_filter() {
        let mut manager = LibraryManager::new("unused");
        manager.import(ItemKind::Album, create_test_entry("a1", "Album"));
        manager.import(ItemKind::Playlist, create_test_entry("p1", "Playlist"));
        manager.import(ItemKind::Playlist, create_test_entry("p2", "Playlist 2"));

        let all: Vec<_> = manager
            .items(LibraryFilter::All)
            .into_iter()
            .map(|i| (i.kind, i.entry.id().unwrap().to_string()))
            .collect();
        assert_eq!(
            all,
            vec![
                (ItemKind::Playlist, "p1".to_string()),
                (ItemKind::Playlist, "p2".to_string()),
                (ItemKind::Album, "a1".to_string()),
            ]
        );

        assert_eq!(manager.items(LibraryFilter::Albums).len(), 1);
        assert_eq!(manager.items(LibraryFilter::Playlists).len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut manager = LibraryManager::new("unused");
        manager.import(ItemKind::Album, create_test_entry("a1", "Album"));

        assert!(!manager.remove(ItemKind::Playlist, "a1"));
        assert_eq!(manager.remove_any("a1"), Some(ItemKind::Album));
        assert_eq!(manager.remove_any("a1"), None);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_replace_drops_duplicates() {
        let mut manager = LibraryManager::new("unused");
        manager.import(ItemKind::Album, create_test_entry("old", "Old"));

        manager.replace(
            vec![create_test_entry("p1", "A"), create_test_entry("p1", "B")],
            vec![create_test_entry("a1", "C")],
        );

        assert_eq!(manager.playlists().len(), 1);
        assert!(!manager.contains(ItemKind::Album, "old"));
        assert!(manager.contains(ItemKind::Album, "a1"));
    }

    #[tokio::test]
    async fn test_persist_and_load() {
        let dir = TempDir::new().unwrap();
        let mut manager = LibraryManager::new(dir.path());
        manager.import(ItemKind::Playlist, create_test_entry("p1", "Kept"));
        manager.persist().await.unwrap();

        assert!(dir.path().join(format!("{PLAYLISTS_KEY}.json")).is_file());
        assert!(dir.path().join(format!("{ALBUMS_KEY}.json")).is_file());

        let loaded = LibraryManager::load(dir.path()).await.unwrap();
        assert_eq!(loaded.playlists(), manager.playlists());
        // unknown provider fields are kept verbatim
        assert_eq!(loaded.playlists()[0].0["tracks"]["total"], 12);
        assert_eq!(
            loaded.playlists()[0].image_url(),
            Some("https://img/p1")
        );
    }

    #[tokio::test]
    async fn test_load_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = LibraryManager::load(dir.path().join("nothing-here"))
            .await
            .unwrap();
        assert!(loaded.is_empty());
    }
}

mod store {
    use super::*;

    #[tokio::test]
    async fn test_save_overwrites_and_load_reads_back() {
        let dir = TempDir::new().unwrap();
        let store = LibraryStore::new(dir.path());

        store
            .save("u1", vec![create_test_entry("p1", "First")], vec![])
            .await
            .unwrap();
        let saved = store
            .save("u1", vec![], vec![create_test_entry("a1", "Second")])
            .await
            .unwrap();

        let loaded = store.load("u1").await.unwrap();
        assert_eq!(loaded, serde_json::to_value(&saved).unwrap());
        assert_eq!(loaded["playlists"], json!([]));
    }

    #[tokio::test]
    async fn test_load_returns_hand_written_file_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = LibraryStore::new(dir.path());
        let stored = r#"{"userId":"u1","playlists":[{"name":"B","id":"p2"},{"id":"p1"}],"albums":[],"lastUpdated":"2024-01-01T00:00:00.000Z"}"#;
        std::fs::write(store.path_for("u1"), stored).unwrap();

        let loaded = store.load("u1").await.unwrap();

        assert_eq!(loaded.to_string(), stored);
    }

    #[tokio::test]
    async fn test_load_tolerates_missing_timestamp() {
        let dir = TempDir::new().unwrap();
        let store = LibraryStore::new(dir.path());
        std::fs::write(store.path_for("u1"), r#"{"userId":"u1","albums":[{"id":"a1"}]}"#).unwrap();

        let loaded: Library = serde_json::from_value(store.load("u1").await.unwrap()).unwrap();

        assert_eq!(loaded.albums.len(), 1);
        assert!(loaded.playlists.is_empty());
        assert_eq!(loaded.last_updated, None);
    }

    #[test]
    fn test_timestamp_has_milliseconds() {
        let stamp = timestamp_now();
        // 2026-10-18T09:30:00.123Z
        assert_eq!(stamp.len(), 24);
        assert!(stamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_load_unknown_user_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LibraryStore::new(dir.path().join("not-created-yet"));

        let library = store.load("nobody").await.unwrap();
        assert_eq!(library["userId"], "nobody");
        assert_eq!(library["playlists"], json!([]));
        assert_eq!(library["albums"], json!([]));
        assert!(library["lastUpdated"].is_string());
    }

    #[tokio::test]
    async fn test_load_invalid_json_fails() {
        let dir = TempDir::new().unwrap();
        let store = LibraryStore::new(dir.path());
        std::fs::write(store.path_for("u1"), "[").unwrap();

        assert!(store.load("u1").await.is_err());
    }

    #[tokio::test]
    async fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let store = LibraryStore::new(dir.path());
        store
            .save("u1", vec![create_test_entry("p1", "First")], vec![])
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path_for("u1")).unwrap())
                .unwrap();
        assert_eq!(raw["userId"], "u1");
        assert!(raw["lastUpdated"].is_string());
        assert_eq!(raw["playlists"][0]["id"], "p1");
    }
}
