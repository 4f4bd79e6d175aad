use super::*;

#[test]
fn default_values() {
    let config = StoreConfig::default();
    assert_eq!(config.max_dispatch_depth, DEFAULT_MAX_DISPATCH_DEPTH);
    assert!(config.catch_panics);
    assert_eq!(config, StoreConfig::new());
}

#[test]
fn builder() {
    let config = StoreConfig::new()
        .with_max_dispatch_depth(3)
        .with_catch_panics(false);
    assert_eq!(config.max_dispatch_depth, 3);
    assert!(!config.catch_panics);
}

#[test]
fn deserialize_partial() {
    let config: StoreConfig = serde_json::from_str(r#"{ "max_dispatch_depth": 8 }"#).unwrap();
    assert_eq!(config.max_dispatch_depth, 8);
    assert!(config.catch_panics);
}

#[test]
fn deserialize_empty() {
    let config: StoreConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, StoreConfig::default());
}

#[test]
fn serialize() {
    let json = serde_json::to_value(StoreConfig::new().with_catch_panics(false)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "max_dispatch_depth": 64, "catch_panics": false })
    );
}
