//! Discord command implementations.
//!
//! Each command adapts its poise context into a core [`CommandContext`] and
//! runs its business logic through the command execution wrapper, so every
//! invocation lands in the command ledger exactly once.

/// Audit ledger inspection command
pub mod audit;
/// Cube roll simulation and option listing commands
pub mod cube;
/// General utility commands (ping)
pub mod general;

use crate::{bot::BotData, core::executor::CommandContext, errors::Error};

pub use audit::*;
pub use cube::*;
pub use general::*;

/// Captures the Discord identity of an invocation into a core command context.
///
/// Snowflake IDs are stored as signed 64-bit integers in the ledger; current
/// Discord IDs fit comfortably. The invoked name is recorded as the alias
/// when the user typed something other than the canonical command name.
pub(crate) fn command_context(
    ctx: &poise::Context<'_, BotData, Error>,
    command_name: &str,
) -> CommandContext {
    let mut command_ctx = CommandContext::new(command_name);
    command_ctx.guild_id = ctx.guild_id().and_then(|id| i64::try_from(id.get()).ok());
    command_ctx.guild_name = ctx.guild().map(|guild| guild.name.clone());
    command_ctx.channel_id = i64::try_from(ctx.channel_id().get()).ok();
    command_ctx.user_id = i64::try_from(ctx.author().id.get()).ok();
    command_ctx.user_name = Some(ctx.author().name.clone());

    let invoked = ctx.invoked_command_name();
    if invoked != command_name {
        command_ctx.command_name_alt = Some(invoked.to_string());
    }

    command_ctx
}
