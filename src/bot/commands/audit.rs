//! Audit Discord command - recent command ledger entries.
//!
//! Thin read-only view over the audit query surface, scoped to the invoking
//! guild. The audit lookup itself also runs through the execution wrapper,
//! so inspecting the ledger is ledgered too.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::command_context},
        core::{
            command_log::{self, AuditFilter},
            executor,
        },
        errors::Error,
    };
    use serde_json::json;

    /// Shows the most recent command ledger entries for this guild.
    #[poise::command(slash_command, prefix_command)]
    pub async fn audit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Maximum number of records to show (default 10)"] limit: Option<u64>,
    ) -> crate::errors::Result<()> {
        let limit = limit.unwrap_or(10).min(25);
        let db = &ctx.data().database;

        let command_ctx =
            command_context(&ctx, "audit").with_arg("limit", json!(limit));

        let guild_id = command_ctx.guild_id;
        let records = executor::execute(db, &command_ctx, || async {
            let filter = AuditFilter {
                guild_id,
                limit: Some(limit),
                ..Default::default()
            };
            command_log::find_command_logs(db, &filter).await
        })
        .await;

        match records {
            Ok(records) => {
                if records.is_empty() {
                    ctx.say("📭 No command records for this guild yet.").await?;
                    return Ok(());
                }

                let mut reply = format!("📒 Last {} command invocations:\n", records.len());
                for record in &records {
                    reply.push_str(&format!(
                        "`{}` {} -> {} ({}ms)\n",
                        record.created_at.format("%Y-%m-%d %H:%M:%S"),
                        record.command_name,
                        record.result,
                        record.elapsed_ms
                    ));
                }
                ctx.say(reply).await?;
            }
            Err(failure) => {
                ctx.say(format!("❌ {failure}")).await?;
            }
        }

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
