//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `MapleBuddy` application,
//! including all slash commands, autocomplete handlers, and bot context
//! management. Commands contain no business logic: each one adapts its poise
//! context into a [`crate::core::executor::CommandContext`] and funnels through
//! the command execution wrapper.

/// Discord command implementations (cube, options, audit, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::config::bot::BotIdentity;
use crate::errors::Error;
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the resolved bot
/// identity that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Identity stamped onto transaction ledger records
    pub identity: BotIdentity,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection
    /// and bot identity. This is typically called during bot initialization
    /// to set up the shared context for all commands.
    #[must_use]
    pub const fn new(database: DatabaseConnection, identity: BotIdentity) -> Self {
        Self { database, identity }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {}", error)).await {
                tracing::error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e)
            }
        }
    }
}

/// Builds the poise framework, registers commands globally, and runs the
/// Serenity client until it exits.
#[instrument(skip(token, database, identity))]
pub async fn run_bot(
    token: String,
    database: DatabaseConnection,
    identity: BotIdentity,
) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::cube(),
                commands::options(),
                commands::audit(),
                commands::ping(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, identity))
            })
        })
        .build();

    // Define necessary gateway intents
    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT; // If you plan to use prefix commands too

    info!("Setting up Serenity client for Poise framework...");
    let client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await;

    match client {
        Ok(mut c) => {
            info!("Starting bot client...");
            if let Err(why) = c.start().await {
                tracing::error!("Client error: {:?}", why);
                return Err(why);
            }
        }
        Err(e) => {
            tracing::error!("Error creating client: {:?}", e);
            return Err(e);
        }
    }
    Ok(())
}
