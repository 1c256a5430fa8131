//! Command ledger business logic.
//!
//! The command ledger holds exactly one record per bot command invocation,
//! written by the execution wrapper after the command has fully resolved.
//! This module owns the insert path and the audit query surface consumed by
//! reporting tooling. Records are append-only; no update or delete path
//! exists.

use crate::{
    entities::{CommandLog, CommandOutcome, command_log},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

/// Default row cap for audit queries when the caller does not specify one.
pub const DEFAULT_AUDIT_LIMIT: u64 = 50;

/// A command ledger record ready to be inserted.
///
/// `created_at` is stamped at insert time; everything else is supplied by
/// the execution wrapper.
#[derive(Debug, Clone)]
pub struct NewCommandLog {
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
    /// Alias the command was invoked under
    pub command_name_alt: String,
    /// Structured capture of the command's input parameters
    pub args: Json,
    /// Invocation outcome
    pub result: CommandOutcome,
    /// Wall-clock duration of the command body in milliseconds
    pub elapsed_ms: i64,
    /// Stable taxonomy code on failure
    pub error_code: Option<String>,
    /// Error variant name on failure
    pub error_type: Option<String>,
    /// Human-readable error message on failure
    pub error_message: Option<String>,
    /// Captured backtrace for error-severity failures
    pub stack_trace: Option<String>,
    /// Free-form mapping for uncategorized context
    pub extra: Json,
}

/// Filter for the audit query surface.
///
/// All fields are optional; an empty filter returns the most recent records
/// up to [`DEFAULT_AUDIT_LIMIT`].
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Restrict to one guild
    pub guild_id: Option<i64>,
    /// Restrict to one user
    pub user_id: Option<i64>,
    /// Only records created at or after this instant
    pub since: Option<DateTimeUtc>,
    /// Only records created at or before this instant
    pub until: Option<DateTimeUtc>,
    /// Maximum number of records to return
    pub limit: Option<u64>,
}

/// Inserts one command ledger record.
///
/// This is a single auto-committing insert: no transaction spans a command
/// boundary, and the record is never touched again after this write.
pub async fn record_command(
    db: &DatabaseConnection,
    entry: NewCommandLog,
) -> Result<command_log::Model> {
    let record = command_log::ActiveModel {
        created_at: Set(chrono::Utc::now()),
        guild_id: Set(entry.guild_id),
        guild_name: Set(entry.guild_name),
        channel_id: Set(entry.channel_id),
        channel_name: Set(entry.channel_name),
        user_id: Set(entry.user_id),
        user_name: Set(entry.user_name),
        command_name: Set(entry.command_name),
        command_name_alt: Set(entry.command_name_alt),
        args: Set(entry.args),
        result: Set(entry.result),
        elapsed_ms: Set(entry.elapsed_ms),
        error_code: Set(entry.error_code),
        error_type: Set(entry.error_type),
        error_message: Set(entry.error_message),
        stack_trace: Set(entry.stack_trace),
        extra: Set(entry.extra),
        ..Default::default()
    };

    record.insert(db).await.map_err(Into::into)
}

/// Retrieves command ledger records matching the filter, newest first.
///
/// This is the read surface for external reporting/ops tooling; it never
/// mutates the ledger.
pub async fn find_command_logs(
    db: &DatabaseConnection,
    filter: &AuditFilter,
) -> Result<Vec<command_log::Model>> {
    let mut query = CommandLog::find()
        .order_by_desc(command_log::Column::CreatedAt)
        .order_by_desc(command_log::Column::Id);

    if let Some(guild_id) = filter.guild_id {
        query = query.filter(command_log::Column::GuildId.eq(guild_id));
    }
    if let Some(user_id) = filter.user_id {
        query = query.filter(command_log::Column::UserId.eq(user_id));
    }
    if let Some(since) = filter.since {
        query = query.filter(command_log::Column::CreatedAt.gte(since));
    }
    if let Some(until) = filter.until {
        query = query.filter(command_log::Column::CreatedAt.lte(until));
    }

    query
        .limit(filter.limit.unwrap_or(DEFAULT_AUDIT_LIMIT))
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{setup_test_db, test_command_log_entry};

    #[tokio::test]
    async fn test_record_command_persists_all_fields() -> Result<()> {
        let db = setup_test_db().await?;

        let mut entry = test_command_log_entry("cube");
        entry.error_code = Some("validation_error".to_string());
        entry.error_type = Some("Validation".to_string());
        entry.error_message = Some("count must be at least 1".to_string());
        entry.result = CommandOutcome::Warning;

        let record = record_command(&db, entry).await?;
        assert_eq!(record.command_name, "cube");
        assert_eq!(record.command_name_alt, "cube");
        assert_eq!(record.result, CommandOutcome::Warning);
        assert_eq!(record.error_code.as_deref(), Some("validation_error"));
        assert!(record.elapsed_ms >= 0);

        let fetched = CommandLog::find_by_id(record.id).one(&db).await?.unwrap();
        assert_eq!(fetched, record);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_command_logs_filters_by_guild_and_user() -> Result<()> {
        let db = setup_test_db().await?;

        let mut for_guild_one = test_command_log_entry("cube");
        for_guild_one.guild_id = Some(1);
        for_guild_one.user_id = Some(10);
        record_command(&db, for_guild_one).await?;

        let mut for_guild_two = test_command_log_entry("options");
        for_guild_two.guild_id = Some(2);
        for_guild_two.user_id = Some(20);
        record_command(&db, for_guild_two).await?;

        let guild_filter = AuditFilter {
            guild_id: Some(1),
            ..Default::default()
        };
        let records = find_command_logs(&db, &guild_filter).await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].command_name, "cube");

        let user_filter = AuditFilter {
            user_id: Some(20),
            ..Default::default()
        };
        let records = find_command_logs(&db, &user_filter).await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].command_name, "options");

        Ok(())
    }

    #[tokio::test]
    async fn test_find_command_logs_time_range_and_order() -> Result<()> {
        let db = setup_test_db().await?;

        let first = record_command(&db, test_command_log_entry("first")).await?;
        let second = record_command(&db, test_command_log_entry("second")).await?;

        // Newest first
        let records = find_command_logs(&db, &AuditFilter::default()).await?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second.id);
        assert_eq!(records[1].id, first.id);

        // A window ending before the ledger began matches nothing
        let before = first.created_at - chrono::Duration::hours(1);
        let filter = AuditFilter {
            until: Some(before),
            ..Default::default()
        };
        assert!(find_command_logs(&db, &filter).await?.is_empty());

        // A window starting at the first record matches everything
        let filter = AuditFilter {
            since: Some(first.created_at),
            ..Default::default()
        };
        assert_eq!(find_command_logs(&db, &filter).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_command_logs_respects_limit() -> Result<()> {
        let db = setup_test_db().await?;

        for _ in 0..5 {
            record_command(&db, test_command_log_entry("cube")).await?;
        }

        let filter = AuditFilter {
            limit: Some(3),
            ..Default::default()
        };
        assert_eq!(find_command_logs(&db, &filter).await?.len(), 3);

        Ok(())
    }
}
