//! Tests for the shared station library

use std::io::Write;

use crate::config::StationConfig;
use crate::types::{FuelVariant, UnknownVariant};

// ============================================================================
// Fuel variants
// ============================================================================

#[test]
fn test_variant_parse_is_case_insensitive() {
    assert_eq!("regular".parse::<FuelVariant>(), Ok(FuelVariant::Regular));
    assert_eq!("PREMIUM".parse::<FuelVariant>(), Ok(FuelVariant::Premium));
    assert_eq!(" Diesel ".parse::<FuelVariant>(), Ok(FuelVariant::Diesel));
}

#[test]
fn test_unknown_variant_rejected() {
    let err = "kerosene".parse::<FuelVariant>().unwrap_err();
    assert_eq!(err, UnknownVariant("kerosene".to_string()));
    assert!("".parse::<FuelVariant>().is_err());
}

#[test]
fn test_variant_display_matches_parse() {
    for variant in FuelVariant::ALL {
        assert_eq!(variant.to_string().parse::<FuelVariant>(), Ok(variant));
    }
}

#[test]
fn test_variant_serializes_lowercase() {
    let json = serde_json::to_string(&FuelVariant::Diesel).unwrap();
    assert_eq!(json, "\"diesel\"");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_default_config() {
    let config = StationConfig::default();
    assert_eq!(config.log_filter, "info");
    assert!(config.prices.is_empty());
    assert_eq!(config.pump.millis_per_unit, 100);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(
        file,
        "log_filter = \"debug\"\n\n[prices]\nregular = 0.8\ndiesel = 1.0\n"
    )
    .unwrap();

    let config = StationConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.log_filter, "debug");

    let prices = config.variant_prices().unwrap();
    assert_eq!(
        prices,
        vec![(FuelVariant::Regular, 0.8), (FuelVariant::Diesel, 1.0)]
    );
}

#[test]
fn test_load_missing_file_fails() {
    let result = StationConfig::load(Some(std::path::Path::new("/nonexistent/station.toml")));
    assert!(result.is_err());
}

#[test]
fn test_unknown_price_key_rejected() {
    let mut config = StationConfig::default();
    config.prices.insert("kerosene".to_string(), 2.0);
    assert!(config.variant_prices().is_err());
}
