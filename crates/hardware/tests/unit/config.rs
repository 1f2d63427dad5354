//! # Configuration Tests
//!
//! Defaults, JSON deserialization and geometry validation.

use cachesim_core::CacheHierarchy;
use cachesim_core::common::error::ConfigError;
use cachesim_core::config::*;
use pretty_assertions::assert_eq;

#[test]
fn test_config_default() {
    let config = HierarchyConfig::default();
    assert_eq!(config.memory_latency, 100);
    assert_eq!(config.block_size_log2, 6);
    assert!(config.write_allocate);
    assert_eq!(
        config.l1,
        LevelConfig {
            size_log2: 12,
            ways_log2: 0,
            latency: 1
        }
    );
    assert_eq!(
        config.l2,
        LevelConfig {
            size_log2: 15,
            ways_log2: 2,
            latency: 10
        }
    );
}

#[test]
fn test_default_config_is_valid() {
    assert!(HierarchyConfig::default().validate().is_ok());
}

#[test]
fn test_level_geometry_helpers() {
    let config = HierarchyConfig::default();
    assert_eq!(config.block_size(), 64);
    assert_eq!(config.l1.line_count(config.block_size_log2), 64);
    assert_eq!(config.l1.ways(), 1);
    assert_eq!(config.l2.line_count(config.block_size_log2), 512);
    assert_eq!(config.l2.ways(), 4);
}

#[test]
fn test_json_full_document() {
    let json = r#"{
        "memory_latency": 50,
        "block_size_log2": 5,
        "write_allocate": false,
        "l1": { "size_log2": 10, "ways_log2": 1, "latency": 2 },
        "l2": { "size_log2": 14, "ways_log2": 3, "latency": 12 }
    }"#;
    let config = HierarchyConfig::from_json(json).unwrap();
    assert_eq!(config.memory_latency, 50);
    assert_eq!(config.block_size_log2, 5);
    assert!(!config.write_allocate);
    assert_eq!(config.l1.ways_log2, 1);
    assert_eq!(config.l2.latency, 12);
}

#[test]
fn test_json_missing_fields_use_defaults() {
    let config = HierarchyConfig::from_json(r#"{ "memory_latency": 7 }"#).unwrap();
    let default = HierarchyConfig::default();
    assert_eq!(config.memory_latency, 7);
    assert_eq!(config.block_size_log2, default.block_size_log2);
    assert_eq!(config.l1, default.l1);
    assert_eq!(config.l2, default.l2);
}

#[test]
fn test_json_level_ways_default_to_direct_mapped() {
    let config =
        HierarchyConfig::from_json(r#"{ "l1": { "size_log2": 9, "latency": 3 } }"#).unwrap();
    assert_eq!(config.l1.ways_log2, 0);
    assert_eq!(config.l1.latency, 3);
}

#[test]
fn test_json_round_trip_through_serialize() {
    let config = HierarchyConfig::default();
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(HierarchyConfig::from_json(&text).unwrap(), config);
}

#[test]
fn test_json_malformed_is_rejected() {
    let err = HierarchyConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_json_invalid_geometry_is_rejected() {
    let json = r#"{ "block_size_log2": 6, "l1": { "size_log2": 5, "latency": 1 } }"#;
    let err = HierarchyConfig::from_json(json).unwrap_err();
    assert!(matches!(err, ConfigError::NoSets { level: "L1", .. }));
}

#[test]
fn test_level_smaller_than_one_set() {
    let mut config = HierarchyConfig::default();
    // 2^8 bytes / 2^6-byte blocks = 4 lines, not enough for 8 ways.
    config.l2.size_log2 = 8;
    config.l2.ways_log2 = 3;
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NoSets {
            level: "L2",
            size_log2: 8,
            ways_log2: 3,
            block_size_log2: 6
        }
    ));
}

#[test]
fn test_fully_associative_single_set_is_valid() {
    let mut config = HierarchyConfig::default();
    config.l1.size_log2 = 8;
    config.l1.ways_log2 = 2;
    assert!(config.validate().is_ok());
    let caches = CacheHierarchy::new(config).unwrap();
    assert_eq!(caches.near().set_count(), 1);
    assert_eq!(caches.near().ways(), 4);
}

#[test]
fn test_too_many_lines() {
    let mut config = HierarchyConfig::default();
    config.block_size_log2 = 0;
    config.l2.size_log2 = MAX_LINES_LOG2 + 1;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TooManyLines { level: "L2", .. })
    ));
}

#[test]
fn test_block_larger_than_address() {
    let mut config = HierarchyConfig::default();
    config.block_size_log2 = 64;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::BlockTooLarge(64))
    ));
}

#[test]
fn test_hierarchy_rejects_invalid_config() {
    let mut config = HierarchyConfig::default();
    config.l1.size_log2 = 0;
    assert!(CacheHierarchy::new(config).is_err());
}

#[test]
fn test_hierarchy_geometry_from_logs() {
    let config = HierarchyConfig {
        memory_latency: 100,
        block_size_log2: 4,
        write_allocate: true,
        l1: LevelConfig {
            size_log2: 10,
            ways_log2: 1,
            latency: 1,
        },
        l2: LevelConfig {
            size_log2: 13,
            ways_log2: 2,
            latency: 10,
        },
    };
    let caches = CacheHierarchy::new(config).unwrap();
    // L1: 2^10 / 2^4 = 64 lines, 2-way → 32 sets.
    assert_eq!(caches.near().set_count(), 32);
    assert_eq!(caches.near().set_bits(), 5);
    // L2: 2^13 / 2^4 = 512 lines, 4-way → 128 sets.
    assert_eq!(caches.far().set_count(), 128);
    assert_eq!(caches.far().set_bits(), 7);
    assert_eq!(caches.config(), &config);
}
