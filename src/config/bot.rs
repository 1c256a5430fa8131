//! Bot identity configuration from environment variables
//!
//! The transaction ledger records which bot build and database principal
//! performed each mutation; this module resolves those values once at
//! startup so they can be threaded through explicitly instead of read from
//! ambient global state.

/// Identity of the running bot build, stamped onto transaction ledger records.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    /// Bot name (`BOT_NAME` env var, defaults to the crate name)
    pub name: String,
    /// Bot version (crate version at build time)
    pub version: String,
    /// Acting database principal (`DATABASE_USER` env var, defaults to `"maple_bot"`)
    pub db_user: String,
}

impl BotIdentity {
    /// Resolves the bot identity from the environment, with sensible defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            name: std::env::var("BOT_NAME").unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            db_user: std::env::var("DATABASE_USER").unwrap_or_else(|_| "maple_bot".to_string()),
        }
    }
}
