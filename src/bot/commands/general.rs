//! General Discord commands - `ping`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::command_context},
        core::executor,
        errors::Error,
    };

    /// Checks that the bot is alive and the ledger pipeline works.
    ///
    /// Even `ping` goes through the execution wrapper: every invocation of
    /// every command produces exactly one command ledger record.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> crate::errors::Result<()> {
        let db = &ctx.data().database;
        let command_ctx = command_context(&ctx, "ping");

        let result = executor::execute(db, &command_ctx, || async { Ok("🏓 Pong!") }).await;

        match result {
            Ok(reply) => ctx.say(reply).await?,
            Err(failure) => ctx.say(format!("❌ {failure}")).await?,
        };

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
