//! Command execution wrapper.
//!
//! Every command invocation funnels through [`execute`], which times the
//! caller-supplied body, classifies its outcome, and writes exactly one
//! command ledger record - always, regardless of how the body finishes.
//! Raw internal errors never escape past this boundary: callers receive a
//! [`CommandFailure`] carrying only the stable taxonomy code and a
//! user-presentable notice.

use crate::{
    core::command_log::{self, NewCommandLog},
    entities::CommandOutcome,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};
use std::backtrace::Backtrace;
use std::future::Future;
use std::time::Instant;
use tracing::{error, info, warn};

/// Identity and argument capture for one command invocation, supplied by the
/// external command-handling framework.
///
/// Everything the ledger needs travels in here explicitly; the core never
/// reads ambient global bot state.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
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
    /// Alias the command was invoked under, when different from the name
    pub command_name_alt: Option<String>,
    /// Structured capture of the command's input parameters
    pub args: Map<String, Value>,
    /// Free-form mapping for uncategorized context
    pub extra: Map<String, Value>,
}

impl CommandContext {
    /// Creates a context for the named command with no Discord identity.
    #[must_use]
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            ..Default::default()
        }
    }

    /// Adds one captured argument, builder style.
    #[must_use]
    pub fn with_arg(mut self, key: &str, value: Value) -> Self {
        self.args.insert(key.to_string(), value);
        self
    }
}

/// User-facing failure notice returned when a command body fails.
///
/// Holds the stable taxonomy code and a presentable message; the raw error,
/// its message, and its backtrace live only in the ledger.
#[derive(Debug, Clone)]
pub struct CommandFailure {
    /// Stable taxonomy code (e.g., `"validation_error"`)
    pub code: &'static str,
    /// User-presentable failure notice
    pub notice: String,
}

impl std::fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.notice)
    }
}

/// Runs a command body under full instrumentation.
///
/// Records a monotonic start time, invokes the body, and writes one command
/// ledger record once the body has fully resolved. `elapsed_ms` is captured
/// before any ledger I/O, so it reflects the body's real duration only. On
/// failure the error is classified (recoverable classes log as `warning`,
/// everything else as `error` with a captured backtrace) and translated
/// into a [`CommandFailure`] for the caller.
///
/// Ledger writes are best-effort: if the ledger itself is unreachable the
/// failure is logged via `tracing` and the invocation's primary result
/// stands untouched.
pub async fn execute<T, F, Fut>(
    db: &DatabaseConnection,
    ctx: &CommandContext,
    body: F,
) -> std::result::Result<T, CommandFailure>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let outcome = body().await;
    let elapsed_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);

    match outcome {
        Ok(value) => {
            info!(
                "{} success (elapsed: {}ms)",
                ctx.command_name, elapsed_ms
            );
            write_record(db, build_entry(ctx, CommandOutcome::Success, elapsed_ms, None)).await;
            Ok(value)
        }
        Err(err) => {
            let result = if err.is_recoverable() {
                CommandOutcome::Warning
            } else {
                CommandOutcome::Error
            };
            match result {
                CommandOutcome::Warning => warn!(
                    "{} warning ({err}) (elapsed: {}ms)",
                    ctx.command_name, elapsed_ms
                ),
                _ => error!(
                    "{} error ({err}) (elapsed: {}ms)",
                    ctx.command_name, elapsed_ms
                ),
            }
            write_record(db, build_entry(ctx, result, elapsed_ms, Some(&err))).await;
            Err(CommandFailure {
                code: err.code(),
                notice: err.user_notice(),
            })
        }
    }
}

/// Assembles the ledger entry for one finished invocation.
///
/// A backtrace is captured only for error-severity failures; warnings carry
/// their message and taxonomy fields without one.
fn build_entry(
    ctx: &CommandContext,
    result: CommandOutcome,
    elapsed_ms: i64,
    failure: Option<&Error>,
) -> NewCommandLog {
    let stack_trace = failure.and_then(|_| {
        matches!(result, CommandOutcome::Error)
            .then(|| Backtrace::force_capture().to_string())
    });

    NewCommandLog {
        guild_id: ctx.guild_id,
        guild_name: ctx.guild_name.clone(),
        channel_id: ctx.channel_id,
        channel_name: ctx.channel_name.clone(),
        user_id: ctx.user_id,
        user_name: ctx.user_name.clone(),
        command_name: ctx.command_name.clone(),
        command_name_alt: ctx
            .command_name_alt
            .clone()
            .unwrap_or_else(|| ctx.command_name.clone()),
        args: Value::Object(ctx.args.clone()),
        result,
        elapsed_ms,
        error_code: failure.map(|e| e.code().to_string()),
        error_type: failure.map(|e| e.kind().to_string()),
        error_message: failure.map(std::string::ToString::to_string),
        stack_trace,
        extra: Value::Object(ctx.extra.clone()),
    }
}

/// Writes the ledger record, swallowing (but logging) store failures.
async fn write_record(db: &DatabaseConnection, entry: NewCommandLog) {
    if let Err(write_err) = command_log::record_command(db, entry).await {
        error!("Failed to write command ledger record: {write_err}");
    }
}
