use serde_json::json;
use spotipod::types::{ItemKind, LibraryEntry};
use spotipod::utils::*;

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Should be exactly 32 characters
    assert_eq!(state.len(), 32);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    assert_ne!(state, generate_state());
}

#[test]
fn test_parse_position_minutes_seconds() {
    assert_eq!(parse_position("0:00"), Some(0));
    assert_eq!(parse_position("1:30"), Some(90_000));
    assert_eq!(parse_position(" 12:05 "), Some(725_000));
}

#[test]
fn test_parse_position_milliseconds() {
    assert_eq!(parse_position("4500"), Some(4_500));
}

#[test]
fn test_parse_position_invalid() {
    assert_eq!(parse_position(""), None);
    assert_eq!(parse_position("1:75"), None);
    assert_eq!(parse_position("a:10"), None);
    assert_eq!(parse_position("-5"), None);
    assert!(parse_position_arg("soon").is_err());
}

#[test]
fn test_table_rows() {
    let entries = vec![
        LibraryEntry(json!({ "id": "a1", "name": "First" })),
        LibraryEntry(json!({ "name": "No id" })),
    ];

    let rows = table_rows(ItemKind::Album, &entries);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].kind, "album");
    assert_eq!(rows[0].name, "First");
    assert_eq!(rows[0].id, "a1");
    assert_eq!(rows[1].id, "");
}
