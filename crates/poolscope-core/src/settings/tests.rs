//! Tests for pool settings

use super::*;

#[test]
fn test_settings_new() {
    let settings = PoolSettings::new(50);
    assert_eq!(settings.max_size(), 50);
    assert_eq!(settings.min_size(), 0);
}

#[test]
fn test_settings_with_min_size() {
    let settings = PoolSettings::new(50).with_min_size(5);
    assert_eq!(settings.min_size(), 5);
    assert_eq!(settings.max_size(), 50);
}

#[test]
fn test_min_size_clamped_to_max() {
    let settings = PoolSettings::new(10).with_min_size(25);
    assert_eq!(settings.min_size(), 10);
}

#[test]
fn test_settings_default() {
    let settings = PoolSettings::default();
    assert_eq!(settings.max_size(), DEFAULT_MAX_POOL_SIZE);
    assert_eq!(settings.min_size(), 0);
}

#[test]
fn test_settings_serialization() {
    let settings = PoolSettings::new(20).with_min_size(2);
    let json = serde_json::to_string(&settings).unwrap();
    assert!(json.contains("\"max_size\":20"));
    assert!(json.contains("\"min_size\":2"));

    let deserialized: PoolSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, settings);
}
