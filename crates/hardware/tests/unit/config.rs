//! Configuration Unit Tests.
//!
//! Verifies defaults, JSON deserialization (including the short `s/b/E/d`
//! aliases) and the geometry checks performed before a cache is allocated.

use pretty_assertions::assert_eq;
use rstest::rstest;
use wbcache_core::common::error::CacheError;
use wbcache_core::Cache;
use wbcache_core::config::{CacheConfig, Geometry};

#[test]
fn default_config_is_small_direct_mapped() {
    let config = CacheConfig::default();
    assert_eq!(
        config,
        CacheConfig {
            set_bits: 4,
            block_bits: 4,
            associativity: 1,
            depth: 0,
        }
    );
    let geometry = config.validate().unwrap();
    assert_eq!(geometry.num_sets(), 16);
    assert_eq!(geometry.block_size(), 16);
    assert!(geometry.is_direct_mapped());
}

#[test]
fn json_long_field_names() {
    let json = r#"{ "set_bits": 1, "block_bits": 5, "associativity": 4, "depth": 3 }"#;
    let config: CacheConfig = serde_json::from_str(json).unwrap();
    let geometry = config.validate().unwrap();
    assert_eq!(geometry.num_sets(), 2);
    assert_eq!(geometry.block_size(), 32);
    assert_eq!(geometry.associativity(), 4);
    assert_eq!(geometry.depth(), 3);
    assert_eq!(geometry.capacity_bytes(), 2 * 4 * 32);
}

#[test]
fn json_short_aliases() {
    let json = r#"{ "s": 0, "b": 6, "E": 8 }"#;
    let config: CacheConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.set_bits, 0);
    assert_eq!(config.block_bits, 6);
    assert_eq!(config.associativity, 8);
    assert_eq!(config.depth, 0);
    assert!(config.validate().unwrap().is_fully_associative());
}

#[test]
fn json_missing_fields_take_defaults() {
    let config: CacheConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, CacheConfig::default());
}

#[test]
fn serializes_round_trip_through_json() {
    let config = CacheConfig {
        set_bits: 3,
        block_bits: 2,
        associativity: 2,
        depth: 1,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: CacheConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn zero_associativity_rejected() {
    let config = CacheConfig {
        associativity: 0,
        ..CacheConfig::default()
    };
    assert_eq!(config.validate(), Err(CacheError::ZeroAssociativity));
}

#[rstest]
#[case(33, 32)]
#[case(64, 1)]
#[case(1, 64)]
fn address_overflow_rejected(#[case] s: u32, #[case] b: u32) {
    let config = CacheConfig {
        set_bits: s,
        block_bits: b,
        ..CacheConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(CacheError::AddressBitsOverflow {
            set_bits: s,
            block_bits: b,
        })
    );
}

#[rstest]
#[case(64, 0, 1)]
#[case(0, 64, 1)]
#[case(40, 30, 1)]
#[case(30, 30, usize::MAX)]
#[case(58, 0, 1)]
#[case(60, 0, 1)]
fn unaddressable_storage_rejected(#[case] s: u32, #[case] b: u32, #[case] e: usize) {
    let config = CacheConfig {
        set_bits: s,
        block_bits: b,
        associativity: e,
        depth: 0,
    };
    assert!(matches!(
        config.validate(),
        Err(CacheError::StorageOverflow { .. }) | Err(CacheError::AddressBitsOverflow { .. })
    ));
}

#[test]
fn geometry_converts_back_to_config() {
    let config = CacheConfig {
        set_bits: 2,
        block_bits: 3,
        associativity: 2,
        depth: 5,
    };
    let geometry = Geometry::try_from(config).unwrap();
    assert_eq!(CacheConfig::from(geometry), config);
}

#[test]
fn error_messages_name_the_problem() {
    assert_eq!(
        CacheError::ZeroAssociativity.to_string(),
        "associativity must be at least 1 (got 0)"
    );
    assert_eq!(
        CacheError::InvalidSet {
            set_index: 9,
            num_sets: 4
        }
        .to_string(),
        "invalid set 9: expected 0 <= set < 4"
    );
}

#[rstest]
#[case(58, 0, 1)]
#[case(57, 1, 2)]
fn line_metadata_counts_toward_storage(#[case] s: u32, #[case] b: u32, #[case] e: usize) {
    let config = CacheConfig {
        set_bits: s,
        block_bits: b,
        associativity: e,
        depth: 0,
    };
    let expected = CacheError::StorageOverflow {
        set_bits: s,
        block_bits: b,
        associativity: e,
    };
    assert_eq!(config.validate(), Err(expected.clone()));
    assert_eq!(Cache::from_config(&config).unwrap_err(), expected);
}
