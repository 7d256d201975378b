//! Tests for in-memory dataset editing: connections, folders and tags.

use connvault::errors::VaultError;
use connvault::vault::{Connection, ConnectionType, Dataset, ROOT_FOLDER};

fn conn(name: &str, id: &str) -> Connection {
    let mut c = Connection::new(name, ConnectionType::Ssh, "host.lan");
    c.id = id.to_string();
    c
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

#[test]
fn add_and_find_by_id_or_name() {
    let mut d = Dataset::default();
    d.add_connection(conn("web-01", "conn-1")).unwrap();

    assert_eq!(d.find_connection("conn-1").unwrap().name, "web-01");
    assert_eq!(d.find_connection("web-01").unwrap().id, "conn-1");
    assert!(d.find_connection("nope").is_none());
}

#[test]
fn id_match_wins_over_name_match() {
    let mut d = Dataset::default();
    d.add_connection(conn("conn-2", "conn-1")).unwrap();
    d.add_connection(conn("other", "conn-2")).unwrap();

    assert_eq!(d.find_connection("conn-2").unwrap().name, "other");
}

#[test]
fn add_into_missing_folder_fails() {
    let mut d = Dataset::default();
    let mut c = conn("db", "conn-1");
    c.folder = "/nowhere".into();

    let result = d.add_connection(c);
    assert!(matches!(result, Err(VaultError::FolderNotFound(p)) if p == "/nowhere"));
    assert!(d.connections.is_empty());
}

#[test]
fn add_merges_tags_into_tag_set() {
    let mut d = Dataset::default();
    d.add_tag("prod");

    let mut c = conn("db", "conn-1");
    c.tags = vec!["prod".into(), "db".into()];
    d.add_connection(c).unwrap();

    assert_eq!(d.tags, vec!["prod", "db"]);
}

#[test]
fn update_replaces_and_bumps_timestamp() {
    let mut d = Dataset::default();
    d.add_connection(conn("db", "conn-1")).unwrap();
    let created = d.connections[0].updated_at;

    let mut edited = d.connections[0].clone();
    edited.host = "db2.lan".into();
    edited.port = Some(2222);
    d.update_connection(edited).unwrap();

    let stored = d.find_connection("conn-1").unwrap();
    assert_eq!(stored.host, "db2.lan");
    assert_eq!(stored.port, Some(2222));
    assert!(stored.updated_at >= created);
    assert_eq!(d.connections.len(), 1);
}

#[test]
fn update_unknown_connection_fails() {
    let mut d = Dataset::default();
    let result = d.update_connection(conn("ghost", "conn-404"));
    assert!(matches!(result, Err(VaultError::ConnectionNotFound(_))));
}

#[test]
fn delete_returns_removed_connection() {
    let mut d = Dataset::default();
    d.add_connection(conn("a", "conn-1")).unwrap();
    d.add_connection(conn("b", "conn-2")).unwrap();

    let removed = d.delete_connection("a").unwrap();
    assert_eq!(removed.id, "conn-1");
    assert_eq!(d.connections.len(), 1);
    assert!(d.delete_connection("a").is_err());
}

#[test]
fn toggle_favorite_flips() {
    let mut d = Dataset::default();
    d.add_connection(conn("a", "conn-1")).unwrap();

    assert!(d.toggle_favorite("a").unwrap());
    assert!(!d.toggle_favorite("conn-1").unwrap());
    assert!(d.toggle_favorite("missing").is_err());
}

#[test]
fn touch_records_last_used() {
    let mut d = Dataset::default();
    d.add_connection(conn("a", "conn-1")).unwrap();
    assert!(d.connections[0].last_used.is_none());

    let at = d.touch_last_used("a").unwrap();
    assert_eq!(d.connections[0].last_used, Some(at));
}

// ---------------------------------------------------------------------------
// Folders
// ---------------------------------------------------------------------------

#[test]
fn add_folder_rejects_duplicates_and_empty_paths() {
    let mut d = Dataset::default();
    d.add_folder("/servers", "Servers").unwrap();

    assert!(matches!(
        d.add_folder("/servers", "Again"),
        Err(VaultError::FolderAlreadyExists(_))
    ));
    assert!(matches!(
        d.add_folder(ROOT_FOLDER, "Root"),
        Err(VaultError::FolderAlreadyExists(_))
    ));
    assert!(d.add_folder("", "Empty").is_err());
    assert_eq!(d.folders.len(), 2);
}

#[test]
fn delete_folder_moves_connections_to_root() {
    let mut d = Dataset::default();
    d.add_folder("/lab", "Lab").unwrap();

    let mut a = conn("a", "conn-1");
    a.folder = "/lab".into();
    let mut b = conn("b", "conn-2");
    b.folder = "/lab".into();
    d.add_connection(a).unwrap();
    d.add_connection(b).unwrap();
    d.add_connection(conn("c", "conn-3")).unwrap();

    assert_eq!(d.delete_folder("/lab").unwrap(), 2);
    assert!(d.connections.iter().all(|c| c.folder == ROOT_FOLDER));
    assert_eq!(d.folders.len(), 1);
}

#[test]
fn root_folder_cannot_be_deleted() {
    let mut d = Dataset::default();
    assert!(d.delete_folder(ROOT_FOLDER).is_err());
    assert!(matches!(
        d.delete_folder("/missing"),
        Err(VaultError::FolderNotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[test]
fn add_tag_is_idempotent() {
    let mut d = Dataset::default();
    assert!(d.add_tag("prod"));
    assert!(!d.add_tag("prod"));
    assert_eq!(d.tags, vec!["prod"]);
}

#[test]
fn remove_tag_strips_it_from_connections() {
    let mut d = Dataset::default();
    let mut c = conn("a", "conn-1");
    c.tags = vec!["prod".into(), "db".into()];
    d.add_connection(c).unwrap();

    assert!(d.remove_tag("prod"));
    assert_eq!(d.tags, vec!["db"]);
    assert_eq!(d.connections[0].tags, vec!["db"]);
    assert!(!d.remove_tag("prod"));
}

#[test]
fn remove_tag_only_on_connections_reports_change() {
    let mut d = Dataset::default();
    let mut c = conn("a", "conn-1");
    c.tags = vec!["legacy".into()];
    d.add_connection(c).unwrap();
    // Tag set out of sync with the connections, e.g. from an older file.
    d.tags.clear();

    assert!(d.remove_tag("legacy"));
    assert!(d.connections[0].tags.is_empty());
    assert!(!d.remove_tag("legacy"));
}

#[test]
fn rename_tag_updates_connections() {
    let mut d = Dataset::default();
    let mut c = conn("a", "conn-1");
    c.tags = vec!["stage".into()];
    d.add_connection(c).unwrap();

    assert!(d.rename_tag("stage", "staging"));
    assert_eq!(d.tags, vec!["staging"]);
    assert_eq!(d.connections[0].tags, vec!["staging"]);
    assert!(!d.rename_tag("stage", "x"));
}

#[test]
fn rename_into_existing_tag_merges() {
    let mut d = Dataset::default();
    let mut a = conn("a", "conn-1");
    a.tags = vec!["prd".into(), "prod".into()];
    let mut b = conn("b", "conn-2");
    b.tags = vec!["prd".into()];
    d.add_connection(a).unwrap();
    d.add_connection(b).unwrap();

    assert!(d.rename_tag("prd", "prod"));
    assert_eq!(d.tags, vec!["prod"]);
    assert_eq!(d.connections[0].tags, vec!["prod"]);
    assert_eq!(d.connections[1].tags, vec!["prod"]);
}

// ---------------------------------------------------------------------------
// JSON shape
// ---------------------------------------------------------------------------

#[test]
fn json_roundtrip_keeps_every_field() {
    let mut d = Dataset::default();
    let mut c = Connection::new("desk", ConnectionType::AnyDesk, "123 456 789");
    c.password = Some("pin".into());
    c.notes = Some("front office".into());
    c.custom_command = Some("anydesk {host}".into());
    c.favorite = true;
    d.add_connection(c).unwrap();
    d.touch_last_used("desk").unwrap();

    let parsed = Dataset::from_json(&d.to_json().unwrap()).unwrap();
    assert_eq!(parsed, d);
}

#[test]
fn malformed_json_is_serialization_error() {
    assert!(matches!(
        Dataset::from_json("not json"),
        Err(VaultError::SerializationError(_))
    ));
}

#[test]
fn missing_collections_default_to_empty() {
    let d = Dataset::from_json("{}").unwrap();
    assert!(d.connections.is_empty());
    assert!(d.folders.is_empty());
    assert!(d.tags.is_empty());
}
