//! Shared test utilities for `MapleBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::bot::BotIdentity,
    core::{
        command_log::NewCommandLog,
        executor::CommandContext,
    },
    entities::{CommandOutcome, Grade, OptionTier, potential_option},
    errors::Result,
};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde_json::json;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Catalog row parameters with sensible defaults for tests.
///
/// # Defaults
/// * `grade`: Legendary
/// * `option_type`: Upper
/// * `option_id`: `"str_pct"`
/// * `is_prime`: false
/// * level range: 0..=250, tier 3
/// * `allowed_slots`: empty (unrestricted)
/// * `display_template`: `"STR : +{value1}%"`
#[derive(Debug, Clone)]
pub struct TestOption {
    /// Rarity tier
    pub grade: Grade,
    /// Potential slot tier
    pub option_type: OptionTier,
    /// Option kind code
    pub option_id: &'static str,
    /// Prime pool membership
    pub is_prime: bool,
    /// Level bucket
    pub item_level_tier: i32,
    /// Inclusive level lower bound
    pub item_level_min: i32,
    /// Inclusive level upper bound
    pub item_level_max: i32,
    /// Slot restriction; empty = unrestricted
    pub allowed_slots: Vec<&'static str>,
    /// Primary magnitude
    pub value_1: f64,
    /// Secondary magnitude
    pub value_2: f64,
    /// Display template
    pub display_template: &'static str,
}

impl Default for TestOption {
    fn default() -> Self {
        Self {
            grade: Grade::Legendary,
            option_type: OptionTier::Upper,
            option_id: "str_pct",
            is_prime: false,
            item_level_tier: 3,
            item_level_min: 0,
            item_level_max: 250,
            allowed_slots: Vec::new(),
            value_1: 12.0,
            value_2: 0.0,
            display_template: "STR : +{value1}%",
        }
    }
}

/// Inserts a catalog row built from a [`TestOption`].
pub async fn insert_option(
    db: &DatabaseConnection,
    spec: TestOption,
) -> Result<potential_option::Model> {
    let now = chrono::Utc::now();
    let row = potential_option::ActiveModel {
        grade: Set(spec.grade),
        option_type: Set(spec.option_type),
        option_id: Set(spec.option_id.to_string()),
        is_prime: Set(spec.is_prime),
        item_level_tier: Set(spec.item_level_tier),
        item_level_min: Set(spec.item_level_min),
        item_level_max: Set(spec.item_level_max),
        allowed_slots: Set(json!(spec.allowed_slots)),
        value_1: Set(spec.value_1),
        value_2: Set(spec.value_2),
        value_etc: Set(None),
        display_template: Set(spec.display_template.to_string()),
        data_source: Set(Some("test".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}

/// Builds an unpersisted catalog model for pure (no-database) tests.
#[must_use]
pub fn make_test_option_model(option_id: &str) -> potential_option::Model {
    let now = chrono::Utc::now();
    potential_option::Model {
        id: 0,
        grade: Grade::Legendary,
        option_type: OptionTier::Upper,
        option_id: option_id.to_string(),
        is_prime: false,
        item_level_tier: 3,
        item_level_min: 0,
        item_level_max: 250,
        allowed_slots: json!([]),
        value_1: 12.0,
        value_2: 0.0,
        value_etc: None,
        display_template: "STR : +{value1}%".to_string(),
        data_source: Some("test".to_string()),
        created_at: now,
        updated_at: now,
    }
}

/// A fixed bot identity for ledger tests.
#[must_use]
pub fn test_identity() -> BotIdentity {
    BotIdentity {
        name: "maple-buddy-test".to_string(),
        version: "0.0.0".to_string(),
        db_user: "test_principal".to_string(),
    }
}

/// A command context with a full set of Discord identity fields.
#[must_use]
pub fn test_command_context(command_name: &str) -> CommandContext {
    let mut ctx = CommandContext::new(command_name);
    ctx.guild_id = Some(1001);
    ctx.guild_name = Some("Test Guild".to_string());
    ctx.channel_id = Some(2002);
    ctx.channel_name = Some("general".to_string());
    ctx.user_id = Some(3003);
    ctx.user_name = Some("tester".to_string());
    ctx
}

/// A success-shaped command ledger entry for insert/query tests.
#[must_use]
pub fn test_command_log_entry(command_name: &str) -> NewCommandLog {
    NewCommandLog {
        guild_id: Some(1001),
        guild_name: Some("Test Guild".to_string()),
        channel_id: Some(2002),
        channel_name: Some("general".to_string()),
        user_id: Some(3003),
        user_name: Some("tester".to_string()),
        command_name: command_name.to_string(),
        command_name_alt: command_name.to_string(),
        args: json!({}),
        result: CommandOutcome::Success,
        elapsed_ms: 5,
        error_code: None,
        error_type: None,
        error_message: None,
        stack_trace: None,
        extra: json!({}),
    }
}
