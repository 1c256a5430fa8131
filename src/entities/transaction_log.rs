//! Transaction log entity - One record per data-mutating action performed
//! during command execution.
//!
//! Written by business logic at the moment a mutation is committed, never
//! retroactively. No foreign key links this table to the command log; the
//! two ledgers correlate only by shared guild/user identity and time
//! window, so callers must not assume referential integrity between them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_log")]
pub struct Model {
    /// Unique identifier for the log record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the record was written
    pub created_at: DateTimeUtc,
    /// Acting database principal the mutation ran as
    pub db_user: String,
    /// Name of the bot build that performed the mutation
    pub bot_name: String,
    /// Version of the bot build that performed the mutation
    pub bot_version: String,
    /// Table the mutation targeted
    pub target_table: String,
    /// Free text describing the mutation (e.g., `"insert"`, `"update"`)
    pub action: String,
    /// Optional human-readable description of the change
    pub description: Option<String>,
    /// Discord guild ID the triggering command came from, if any
    pub guild_id: Option<i64>,
    /// Display name of the guild
    pub guild_name: Option<String>,
    /// Discord channel ID the triggering command came from, if any
    pub channel_id: Option<i64>,
    /// Display name of the channel
    pub channel_name: Option<String>,
    /// Discord user ID of the triggering user, if any
    pub user_id: Option<i64>,
    /// Display name of the triggering user
    pub user_name: Option<String>,
    /// Free-form detail text
    pub extra_detail: Option<String>,
}

/// `TransactionLog` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
