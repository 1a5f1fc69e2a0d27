use indexxo_core::{ConfigError, Entry, EntryKind, FileTypes, Settings, SpaceConfig};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_entry_wire_fields() {
    let types = FileTypes::default();
    let entry = Entry::file("/root/a.txt", 10, &types);

    let json = serde_json::to_value(&entry).unwrap();
    let object = json.as_object().unwrap();

    // Exactly the stable contract, nothing else
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["extension", "full_name", "full_path", "name", "size", "type"]
    );

    assert_eq!(json["full_path"], "/root/a.txt");
    assert_eq!(json["full_name"], "a.txt");
    assert_eq!(json["name"], "a");
    assert_eq!(json["size"], 10);
    assert_eq!(json["extension"], ".txt");
    assert_eq!(json["type"], "document");
}

#[test]
fn test_folder_serializes_null_extension() {
    let entry = Entry::folder("/root/sub", 20).into_space();
    let json = serde_json::to_value(&entry).unwrap();

    assert!(json["extension"].is_null());
    assert_eq!(json["type"], "space");
    assert_eq!(json["name"], "sub");
}

#[test]
fn test_entry_deserializes_from_wire() {
    let entry: Entry = serde_json::from_str(
        r#"{"full_path":"/m/song.flac","full_name":"song.flac","name":"song","size":7,"extension":".flac","type":"audio"}"#,
    )
    .unwrap();

    assert_eq!(entry.path, PathBuf::from("/m/song.flac"));
    assert_eq!(entry.kind, EntryKind::Audio);
    assert_eq!(entry, Entry::file("/m/song.flac", 7, &FileTypes::default()));
}

#[test]
fn test_extensionless_file_serializes_null_extension() {
    let entry = Entry::file("/root/Makefile", 4, &FileTypes::default());
    let json = serde_json::to_value(&entry).unwrap();

    assert!(json["extension"].is_null());
    assert_eq!(json["name"], "Makefile");
    assert_eq!(json["type"], "other");
}

#[cfg(unix)]
#[test]
fn test_non_utf8_path_serializes_lossily() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let path = PathBuf::from("/root").join(OsStr::from_bytes(b"caf\xe9.txt"));
    let entry = Entry::file(&path, 3, &FileTypes::default());

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["full_path"], "/root/caf\u{FFFD}.txt");
    assert_eq!(json["full_name"], "caf\u{FFFD}.txt");
    assert_eq!(json["extension"], ".txt");
}

#[test]
fn test_classifier_from_explicit_map() {
    let mut map = HashMap::new();
    map.insert("txt".to_string(), EntryKind::Document);
    map.insert("jpg".to_string(), EntryKind::Image);
    let types = FileTypes::new(map).unwrap();

    assert_eq!(types.classify("txt"), EntryKind::Document);
    assert_eq!(types.classify("jpg"), EntryKind::Image);
    assert_eq!(types.classify("mp4"), EntryKind::Other);

    // Repeated lookups are stable
    for _ in 0..3 {
        assert_eq!(types.classify("jpg"), EntryKind::Image);
    }
}

#[test]
fn test_classifier_rejects_folder_kind() {
    let mut map = HashMap::new();
    map.insert("d".to_string(), EntryKind::Folder);
    assert!(matches!(
        FileTypes::new(map),
        Err(ConfigError::InvalidCategory { .. })
    ));
}

#[test]
fn test_empty_classifier() {
    let types = FileTypes::empty();
    assert!(types.is_empty());
    assert_eq!(types.classify("jpg"), EntryKind::Other);
}

#[test]
fn test_settings_load_resolves_filetypes() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("filetypes.json"), r#"{"raw": "image"}"#).unwrap();
    fs::write(
        temp.path().join("indexxo.toml"),
        "filetypes = \"filetypes.json\"\n\n[[spaces]]\nroot = \"/srv\"\n",
    )
    .unwrap();

    let settings = Settings::load(temp.path().join("indexxo.toml")).unwrap();
    assert_eq!(settings.filetypes, Some(temp.path().join("filetypes.json")));
    assert_eq!(settings.spaces, vec![SpaceConfig::new("/srv")]);

    let types = settings.file_types().unwrap();
    assert_eq!(types.classify("raw"), EntryKind::Image);
}

#[test]
fn test_settings_load_missing_file() {
    let err = Settings::load("/nonexistent/indexxo.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_settings_invalid_toml() {
    let err = Settings::from_toml_str("spaces = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_space_config_ignoring() {
    let config = SpaceConfig::new("/srv").ignoring("/srv/cache").ignoring("/srv/tmp");
    assert_eq!(config.ignore.len(), 2);
    assert_eq!(config.ignore[0], PathBuf::from("/srv/cache"));
}
