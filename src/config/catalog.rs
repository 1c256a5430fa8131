//! Catalog seed configuration loading from catalog.toml
//!
//! This module provides functionality to load potential-option definitions
//! from a TOML seed file. The options defined in catalog.toml stand in for
//! the out-of-band data-ingestion collaborator and are upserted into the
//! catalog table on startup.

use crate::entities::potential_option::{Grade, OptionTier};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// List of potential-option definitions to ingest
    pub options: Vec<OptionConfig>,
}

/// Configuration for a single potential option
#[derive(Debug, Deserialize, Clone)]
pub struct OptionConfig {
    /// Rarity tier (R, E, U, L)
    pub grade: Grade,
    /// Potential slot tier the option belongs to
    pub option_type: OptionTier,
    /// Stable code identifying the option kind
    pub option_id: String,
    /// Whether this is a prime option variant
    #[serde(default)]
    pub is_prime: bool,
    /// Level bucket for option availability
    pub item_level_tier: i32,
    /// Inclusive lower bound of the item level range
    #[serde(default)]
    pub item_level_min: i32,
    /// Inclusive upper bound of the item level range
    #[serde(default = "default_item_level_max")]
    pub item_level_max: i32,
    /// Equipment slots where the option may appear; empty = unrestricted
    #[serde(default)]
    pub allowed_slots: Vec<String>,
    /// Primary magnitude
    pub value_1: f64,
    /// Secondary magnitude
    #[serde(default)]
    pub value_2: f64,
    /// Free-form qualifier text
    #[serde(default)]
    pub value_etc: Option<String>,
    /// Display text with `{value1}` / `{value2}` placeholders
    pub display_template: String,
    /// Provenance label for the row
    #[serde(default = "default_data_source")]
    pub data_source: String,
}

const fn default_item_level_max() -> i32 {
    250
}

fn default_data_source() -> String {
    "seed".to_string()
}

/// Loads catalog seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}

/// Loads catalog seed configuration from the default location (./catalog.toml)
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("catalog.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            [[options]]
            grade = "L"
            option_type = "Upper"
            option_id = "str_pct"
            item_level_tier = 3
            item_level_min = 121
            value_1 = 12.0
            display_template = "STR : +{value1}%"

            [[options]]
            grade = "U"
            option_type = "Lower"
            option_id = "boss_dmg"
            is_prime = true
            item_level_tier = 3
            allowed_slots = ["weapon", "emblem"]
            value_1 = 30.0
            value_2 = 0.0
            display_template = "Boss monster damage : +{value1}%"
        "#;

        let config: CatalogConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.options.len(), 2);

        let first = &config.options[0];
        assert_eq!(first.grade, Grade::Legendary);
        assert_eq!(first.option_type, OptionTier::Upper);
        assert!(!first.is_prime);
        assert_eq!(first.item_level_min, 121);
        assert_eq!(first.item_level_max, 250); // default
        assert!(first.allowed_slots.is_empty()); // default
        assert_eq!(first.data_source, "seed"); // default

        let second = &config.options[1];
        assert!(second.is_prime);
        assert_eq!(second.item_level_min, 0); // default
        assert_eq!(second.allowed_slots, vec!["weapon", "emblem"]);
    }

    #[test]
    fn test_parse_rejects_unknown_grade() {
        let toml_str = r#"
            [[options]]
            grade = "X"
            option_type = "Upper"
            option_id = "str_pct"
            item_level_tier = 1
            value_1 = 3.0
            display_template = "STR : +{value1}%"
        "#;

        assert!(toml::from_str::<CatalogConfig>(toml_str).is_err());
    }
}
