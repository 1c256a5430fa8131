//! Cube simulation Discord commands - `cube` and `options`.
//!
//! This module contains commands that interact with the potential option
//! catalog through the resolver and simulator, wrapped by the command
//! execution wrapper so each invocation is ledgered exactly once.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::command_context, handlers::autocomplete},
        core::{
            executor,
            resolver::{self, RollContext},
            simulator,
        },
        errors::{Error, Result},
    };
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;

    /// Most rolls a single invocation may simulate, to keep replies readable.
    const MAX_ROLL_COUNT: u32 = 10;

    /// Most option lines the `options` command lists before truncating.
    const MAX_LISTED_OPTIONS: usize = 20;

    /// Simulates cube rolls against an item's potential option pool.
    ///
    /// The item context (grade, level, slot, optional tier) is validated and
    /// resolved to its eligible options, then `count` independent weighted
    /// rolls are drawn with a fresh entropy-seeded RNG.
    #[poise::command(slash_command, prefix_command)]
    pub async fn cube(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Potential grade: R, E, U, or L"]
        #[autocomplete = "autocomplete::autocomplete_grade"]
        grade: String,
        #[description = "Item level (0-250)"] item_level: i32,
        #[description = "Equipment slot (e.g. hat, weapon)"]
        #[autocomplete = "autocomplete::autocomplete_slot"]
        slot: String,
        #[description = "Number of rolls to simulate (default 1, max 10)"] count: Option<u32>,
        #[description = "Potential tier: upper or lower"] tier: Option<String>,
    ) -> Result<()> {
        let count = count.unwrap_or(1);
        let db = &ctx.data().database;

        let command_ctx = command_context(&ctx, "cube")
            .with_arg("grade", json!(grade))
            .with_arg("item_level", json!(item_level))
            .with_arg("slot", json!(slot))
            .with_arg("count", json!(count))
            .with_arg("tier", json!(tier));

        let rolls = executor::execute(db, &command_ctx, || async {
            if count > MAX_ROLL_COUNT {
                return Err(Error::Validation {
                    message: format!("count must be at most {MAX_ROLL_COUNT} (got {count})"),
                });
            }
            let roll_ctx = RollContext::parse(&grade, item_level, &slot, tier.as_deref())?;
            let eligible = resolver::resolve(db, &roll_ctx).await?;
            let mut rng = StdRng::from_entropy();
            simulator::roll(&eligible, count, &mut rng)
        })
        .await;

        match rolls {
            Ok(outcomes) => {
                let mut reply = format!(
                    "🎲 Cube results for a level {item_level} {slot} at grade {grade}:\n"
                );
                for (index, outcome) in outcomes.iter().enumerate() {
                    if outcomes.len() > 1 {
                        reply.push_str(&format!("**Roll {}**\n", index + 1));
                    }
                    for line in outcome.lines() {
                        let marker = if line.option.is_prime { "✨" } else { "•" };
                        reply.push_str(&format!("{marker} {}\n", line.display));
                    }
                }
                ctx.say(reply).await?;
            }
            Err(failure) => {
                ctx.say(format!("❌ {failure}")).await?;
            }
        }

        Ok(())
    }

    /// Lists the eligible potential options for an item context.
    ///
    /// Shows each option's rendered line and its selection share within its
    /// pool, so users can see what a cube roll could land on.
    #[poise::command(slash_command, prefix_command)]
    pub async fn options(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Potential grade: R, E, U, or L"]
        #[autocomplete = "autocomplete::autocomplete_grade"]
        grade: String,
        #[description = "Item level (0-250)"] item_level: i32,
        #[description = "Equipment slot (e.g. hat, weapon)"]
        #[autocomplete = "autocomplete::autocomplete_slot"]
        slot: String,
        #[description = "Potential tier: upper or lower"] tier: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let command_ctx = command_context(&ctx, "options")
            .with_arg("grade", json!(grade))
            .with_arg("item_level", json!(item_level))
            .with_arg("slot", json!(slot))
            .with_arg("tier", json!(tier));

        let resolved = executor::execute(db, &command_ctx, || async {
            let roll_ctx = RollContext::parse(&grade, item_level, &slot, tier.as_deref())?;
            resolver::resolve(db, &roll_ctx).await
        })
        .await;

        match resolved {
            Ok(set) => {
                let mut reply = format!(
                    "📋 {} eligible options for a level {item_level} {slot} at grade {grade}:\n",
                    set.len()
                );

                let mut listed = 0usize;
                for (pool_name, pool) in [("regular", &set.regular), ("prime", &set.prime)] {
                    if pool.is_empty() {
                        continue;
                    }
                    let pool_total: f64 = pool.iter().map(|entry| entry.weight).sum();
                    for entry in pool {
                        if listed == MAX_LISTED_OPTIONS {
                            break;
                        }
                        let share = entry.weight / pool_total * 100.0;
                        reply.push_str(&format!(
                            "• [{pool_name}] {} ({share:.1}%)\n",
                            simulator::render_display(&entry.option)
                        ));
                        listed += 1;
                    }
                }
                if set.len() > listed {
                    reply.push_str(&format!("…and {} more\n", set.len() - listed));
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
