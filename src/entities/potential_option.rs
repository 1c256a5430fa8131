//! Potential option entity - One candidate stat/effect line a game item's
//! potential slot can roll.
//!
//! Rows are populated by the catalog ingestion path and are read-only for the
//! resolver and simulator. The tuple (`grade`, `option_type`, `option_id`,
//! `item_level_tier`) identifies an eligibility row for ingestion upserts;
//! duplicate rows are treated as independent weighted entries by the resolver.

use crate::errors::Error;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rarity tier of a potential roll, ascending rarity.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Grade {
    /// Rare (R)
    #[sea_orm(string_value = "R")]
    #[serde(rename = "R", alias = "Rare", alias = "rare")]
    Rare,
    /// Epic (E)
    #[sea_orm(string_value = "E")]
    #[serde(rename = "E", alias = "Epic", alias = "epic")]
    Epic,
    /// Unique (U)
    #[sea_orm(string_value = "U")]
    #[serde(rename = "U", alias = "Unique", alias = "unique")]
    Unique,
    /// Legendary (L)
    #[sea_orm(string_value = "L")]
    #[serde(rename = "L", alias = "Legendary", alias = "legendary")]
    Legendary,
}

impl Grade {
    /// Parses a grade from caller-supplied text.
    ///
    /// Accepts the single-letter code (`R`/`E`/`U`/`L`) or the full name,
    /// case-insensitively. Anything else is a validation error - this runs
    /// before any catalog query is issued.
    pub fn parse(input: &str) -> crate::errors::Result<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "R" | "RARE" => Ok(Self::Rare),
            "E" | "EPIC" => Ok(Self::Epic),
            "U" | "UNIQUE" => Ok(Self::Unique),
            "L" | "LEGENDARY" => Ok(Self::Legendary),
            other => Err(Error::Validation {
                message: format!("unknown grade '{other}' (expected one of R, E, U, L)"),
            }),
        }
    }

    /// Human-readable grade name for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Unique => "Unique",
            Self::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which potential slot tier an option belongs to.
///
/// `Upper` is the primary (main potential) tier, `Lower` the secondary
/// (additional potential) tier.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(5))")]
pub enum OptionTier {
    /// Primary potential tier
    #[sea_orm(string_value = "upper")]
    #[serde(rename = "upper", alias = "Upper")]
    Upper,
    /// Secondary (additional) potential tier
    #[sea_orm(string_value = "lower")]
    #[serde(rename = "lower", alias = "Lower")]
    Lower,
}

impl OptionTier {
    /// Parses an option tier from caller-supplied text, case-insensitively.
    pub fn parse(input: &str) -> crate::errors::Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            other => Err(Error::Validation {
                message: format!("unknown option tier '{other}' (expected 'upper' or 'lower')"),
            }),
        }
    }
}

impl std::fmt::Display for OptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upper => f.write_str("upper"),
            Self::Lower => f.write_str("lower"),
        }
    }
}

/// Potential option database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "potential_option")]
pub struct Model {
    /// Unique identifier for the option row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Rarity tier this option rolls at
    pub grade: Grade,
    /// Potential slot tier (upper/lower) the option belongs to
    pub option_type: OptionTier,
    /// Stable code identifying the option kind (e.g., `"str_pct"`)
    pub option_id: String,
    /// Whether this is a prime ("true/unique") option variant, drawn from a separate pool
    pub is_prime: bool,
    /// Integer bucket an item's level falls into for option availability
    pub item_level_tier: i32,
    /// Inclusive lower bound of the item level range
    pub item_level_min: i32,
    /// Inclusive upper bound of the item level range
    pub item_level_max: i32,
    /// JSON array of equipment-slot identifiers where this option may appear;
    /// an empty array means unrestricted
    pub allowed_slots: Json,
    /// Primary magnitude (e.g., a stat percentage)
    pub value_1: f64,
    /// Secondary magnitude (e.g., a trigger probability or duration)
    pub value_2: f64,
    /// Free-form qualifier text
    pub value_etc: Option<String>,
    /// Display text with `{value1}` / `{value2}` placeholders
    pub display_template: String,
    /// Provenance of the row (e.g., `"seed"`, an ingestion batch name)
    pub data_source: Option<String>,
    /// When the row was first ingested
    pub created_at: DateTimeUtc,
    /// When the row's values were last refreshed
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Whether this option may appear in the given equipment slot.
    ///
    /// An empty (or non-array) `allowed_slots` value means the option is
    /// unrestricted and matches every slot.
    #[must_use]
    pub fn allows_slot(&self, slot: &str) -> bool {
        match self.allowed_slots.as_array() {
            Some(slots) if !slots.is_empty() => {
                slots.iter().any(|entry| entry.as_str() == Some(slot))
            }
            _ => true,
        }
    }

    /// Whether the given item level falls inside this option's inclusive range.
    #[must_use]
    pub const fn matches_level(&self, item_level: i32) -> bool {
        self.item_level_min <= item_level && item_level <= self.item_level_max
    }
}

/// `PotentialOption` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grade_parse_accepts_codes_and_names() {
        assert_eq!(Grade::parse("L").unwrap(), Grade::Legendary);
        assert_eq!(Grade::parse("legendary").unwrap(), Grade::Legendary);
        assert_eq!(Grade::parse(" r ").unwrap(), Grade::Rare);
        assert_eq!(Grade::parse("Epic").unwrap(), Grade::Epic);
        assert_eq!(Grade::parse("u").unwrap(), Grade::Unique);
    }

    #[test]
    fn test_grade_parse_rejects_unknown() {
        let err = Grade::parse("X").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_grade_ordering_is_ascending_rarity() {
        assert!(Grade::Rare < Grade::Epic);
        assert!(Grade::Epic < Grade::Unique);
        assert!(Grade::Unique < Grade::Legendary);
    }

    #[test]
    fn test_option_tier_parse() {
        assert_eq!(OptionTier::parse("upper").unwrap(), OptionTier::Upper);
        assert_eq!(OptionTier::parse("LOWER").unwrap(), OptionTier::Lower);
        assert!(matches!(
            OptionTier::parse("middle").unwrap_err(),
            Error::Validation { .. }
        ));
    }

    fn sample_model(allowed_slots: Json) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 1,
            grade: Grade::Legendary,
            option_type: OptionTier::Upper,
            option_id: "str_pct".to_string(),
            is_prime: false,
            item_level_tier: 3,
            item_level_min: 121,
            item_level_max: 250,
            allowed_slots,
            value_1: 12.0,
            value_2: 0.0,
            value_etc: None,
            display_template: "STR : +{value1}%".to_string(),
            data_source: Some("seed".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_allows_slot_empty_is_unrestricted() {
        let model = sample_model(json!([]));
        assert!(model.allows_slot("hat"));
        assert!(model.allows_slot("weapon"));
    }

    #[test]
    fn test_allows_slot_restricted_set() {
        let model = sample_model(json!(["weapon", "emblem"]));
        assert!(model.allows_slot("weapon"));
        assert!(!model.allows_slot("hat"));
    }

    #[test]
    fn test_matches_level_inclusive_bounds() {
        let model = sample_model(json!([]));
        assert!(model.matches_level(121));
        assert!(model.matches_level(250));
        assert!(model.matches_level(150));
        assert!(!model.matches_level(120));
        assert!(!model.matches_level(251));
    }
}
