//! Command log entity - One record per bot command invocation.
//!
//! Written exactly once by the command execution wrapper after the command has
//! fully resolved, never mutated afterwards, retained indefinitely. `args` and
//! `extra` are JSON objects of scalar values; failure detail lands in the
//! `error_code` / `error_type` / `error_message` / `stack_trace` columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of a command invocation as recorded in the ledger.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(7))")]
pub enum CommandOutcome {
    /// The command body returned normally
    #[sea_orm(string_value = "success")]
    Success,
    /// The command body failed with a recoverable, user-correctable error
    #[sea_orm(string_value = "warning")]
    Warning,
    /// The command body failed with an unrecoverable or uncategorized error
    #[sea_orm(string_value = "error")]
    Error,
}

impl std::fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Command log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "command_log")]
pub struct Model {
    /// Unique identifier for the log record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the record was written (record identity anchor)
    pub created_at: DateTimeUtc,
    /// Discord guild ID the command was invoked from, if any
    pub guild_id: Option<i64>,
    /// Display name of the guild
    pub guild_name: Option<String>,
    /// Discord channel ID the command was invoked from, if any
    pub channel_id: Option<i64>,
    /// Display name of the channel
    pub channel_name: Option<String>,
    /// Discord user ID of the invoker, if any
    pub user_id: Option<i64>,
    /// Display name of the invoker
    pub user_name: Option<String>,
    /// Canonical command name
    pub command_name: String,
    /// Alias the command was invoked under (defaults to `command_name`)
    pub command_name_alt: String,
    /// Structured capture of the command's input parameters (JSON object)
    pub args: Json,
    /// Invocation outcome: success, warning, or error
    pub result: CommandOutcome,
    /// Wall-clock duration of the command body in milliseconds, always >= 0
    pub elapsed_ms: i64,
    /// Stable taxonomy code on failure (e.g., `"validation_error"`)
    pub error_code: Option<String>,
    /// Error variant name on failure (e.g., `"NoEligibleOptions"`)
    pub error_type: Option<String>,
    /// Human-readable error message on failure
    pub error_message: Option<String>,
    /// Captured backtrace for error-severity failures
    pub stack_trace: Option<String>,
    /// Free-form mapping for uncategorized context (JSON object)
    pub extra: Json,
}

/// `CommandLog` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
