//! Transaction ledger business logic.
//!
//! The transaction ledger records each data-mutating action a command (or the
//! catalog ingestion path) performs, independently of command-level outcome.
//! Records are written at the moment a mutation is committed, never
//! retroactively, and correlate with the command ledger only by shared
//! guild/user identity and time window.

use crate::{
    config::bot::BotIdentity,
    core::command_log::{AuditFilter, DEFAULT_AUDIT_LIMIT},
    entities::{TransactionLog, transaction_log},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

/// A transaction ledger record ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewTransactionLog {
    /// Acting database principal
    pub db_user: String,
    /// Name of the bot build performing the mutation
    pub bot_name: String,
    /// Version of the bot build performing the mutation
    pub bot_version: String,
    /// Table the mutation targets
    pub target_table: String,
    /// Free text describing the mutation
    pub action: String,
    /// Optional human-readable description of the change
    pub description: Option<String>,
    /// Discord guild ID of the triggering command, if any
    pub guild_id: Option<i64>,
    /// Display name of the guild
    pub guild_name: Option<String>,
    /// Discord channel ID of the triggering command, if any
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

impl NewTransactionLog {
    /// Creates a ledger entry for a mutation performed by the bot itself
    /// (e.g., catalog ingestion) with no triggering Discord context.
    #[must_use]
    pub fn system(identity: &BotIdentity, target_table: &str, action: &str) -> Self {
        Self {
            db_user: identity.db_user.clone(),
            bot_name: identity.name.clone(),
            bot_version: identity.version.clone(),
            target_table: target_table.to_string(),
            action: action.to_string(),
            description: None,
            guild_id: None,
            guild_name: None,
            channel_id: None,
            channel_name: None,
            user_id: None,
            user_name: None,
            extra_detail: None,
        }
    }
}

/// Inserts one transaction ledger record.
///
/// Like command ledger writes, this is an independent auto-committing
/// insert; callers invoke it at the point their mutation is committed.
pub async fn record_transaction(
    db: &DatabaseConnection,
    entry: NewTransactionLog,
) -> Result<transaction_log::Model> {
    let record = transaction_log::ActiveModel {
        created_at: Set(chrono::Utc::now()),
        db_user: Set(entry.db_user),
        bot_name: Set(entry.bot_name),
        bot_version: Set(entry.bot_version),
        target_table: Set(entry.target_table),
        action: Set(entry.action),
        description: Set(entry.description),
        guild_id: Set(entry.guild_id),
        guild_name: Set(entry.guild_name),
        channel_id: Set(entry.channel_id),
        channel_name: Set(entry.channel_name),
        user_id: Set(entry.user_id),
        user_name: Set(entry.user_name),
        extra_detail: Set(entry.extra_detail),
        ..Default::default()
    };

    record.insert(db).await.map_err(Into::into)
}

/// Retrieves transaction ledger records matching the filter, newest first.
pub async fn find_transaction_logs(
    db: &DatabaseConnection,
    filter: &AuditFilter,
) -> Result<Vec<transaction_log::Model>> {
    let mut query = TransactionLog::find()
        .order_by_desc(transaction_log::Column::CreatedAt)
        .order_by_desc(transaction_log::Column::Id);

    if let Some(guild_id) = filter.guild_id {
        query = query.filter(transaction_log::Column::GuildId.eq(guild_id));
    }
    if let Some(user_id) = filter.user_id {
        query = query.filter(transaction_log::Column::UserId.eq(user_id));
    }
    if let Some(since) = filter.since {
        query = query.filter(transaction_log::Column::CreatedAt.gte(since));
    }
    if let Some(until) = filter.until {
        query = query.filter(transaction_log::Column::CreatedAt.lte(until));
    }

    query
        .limit(filter.limit.unwrap_or(DEFAULT_AUDIT_LIMIT))
        .all(db)
        .await
        .map_err(Into::into)
}
