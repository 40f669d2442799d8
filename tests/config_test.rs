use lsifgen::config::*;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = EmitConfig::default();
    assert_eq!(config.language, "unknown");
    assert_eq!(config.tool_name, "lsifgen");
    assert!(!config.embed_contents);
    assert!(config.project_root.is_empty());
    assert!(!config.tool_version.is_empty());
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lsifgen.json");
    let config = EmitConfig {
        language: "c".to_string(),
        embed_contents: true,
        ..EmitConfig::default()
    };
    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(config, loaded);
}

#[test]
fn test_partial_config_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{"language":"rust"}"#).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.language, "rust");
    assert_eq!(loaded.tool_name, "lsifgen");
    assert!(!loaded.embed_contents);
}

#[test]
fn test_load_missing_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_config(&dir.path().join("nope.json")).is_err());
}

#[test]
fn test_config_serde_roundtrip() {
    let config = EmitConfig::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let deserialized: EmitConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, deserialized);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/dir/config.json");
    save_config(&path, &EmitConfig::default()).unwrap();
    assert!(path.exists());
}
