//! Unified error types for `MapleBuddy`.
//!
//! Every failure the core can raise is a variant of [`Error`]. The Command
//! Execution Wrapper classifies errors through the methods on this enum: a
//! stable taxonomy [`code`](Error::code), the variant [`kind`](Error::kind)
//! name, a warning-vs-error [`is_recoverable`](Error::is_recoverable) split,
//! and a user-presentable [`user_notice`](Error::user_notice). Raw internal
//! errors never cross the command boundary.

use crate::entities::potential_option::{Grade, OptionTier};
use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input to the resolver or simulator
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// The resolver found zero matching catalog rows for valid input.
    /// Carries the full query context so callers can distinguish a
    /// legitimate "no options here" from a data gap.
    #[error("No eligible options for grade {grade}, level {item_level}, slot '{slot}'")]
    NoEligibleOptions {
        /// Requested potential grade
        grade: Grade,
        /// Item level used for the range filter
        item_level: i32,
        /// Equipment slot identifier
        slot: String,
        /// Requested option tier, if the caller narrowed to one
        option_type: Option<OptionTier>,
    },

    /// Every weight in a non-empty draw pool was zero - a data-integrity defect
    #[error("Degenerate distribution: total weight is zero across {entries} entries")]
    DegenerateDistribution {
        /// Number of entries in the defective pool
        entries: usize,
    },

    /// Catalog or ledger store unreachable or rejected an operation
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration error (bad config file, missing setting)
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    /// Any uncategorized failure from a command body
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the failure
        message: String,
    },
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Stable taxonomy code recorded in the command ledger's `error_code` column.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NoEligibleOptions { .. } => "no_eligible_options",
            Self::DegenerateDistribution { .. } => "degenerate_distribution",
            Self::Database(_) => "store_unavailable",
            Self::Config { .. } => "config_error",
            Self::Io(_) | Self::EnvVar(_) | Self::Framework(_) | Self::Internal { .. } => {
                "internal_error"
            }
        }
    }

    /// Variant name recorded in the command ledger's `error_type` column.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Validation",
            Self::NoEligibleOptions { .. } => "NoEligibleOptions",
            Self::DegenerateDistribution { .. } => "DegenerateDistribution",
            Self::Database(_) => "Database",
            Self::Config { .. } => "Config",
            Self::Io(_) => "Io",
            Self::EnvVar(_) => "EnvVar",
            Self::Framework(_) => "Framework",
            Self::Internal { .. } => "Internal",
        }
    }

    /// Whether this failure is recoverable from the user's point of view.
    ///
    /// Recoverable failures (bad input, no matching data) are logged as
    /// `warning`; everything else is logged as `error`.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NoEligibleOptions { .. }
        )
    }

    /// Stable, user-presentable failure notice for the Discord reply.
    ///
    /// Internal detail (database messages, backtraces) never appears here;
    /// it goes to the ledger instead.
    #[must_use]
    pub fn user_notice(&self) -> String {
        match self {
            Self::Validation { message } => format!("Invalid input: {message}"),
            Self::NoEligibleOptions {
                grade,
                item_level,
                slot,
                ..
            } => format!(
                "No potential options found for a level {item_level} item in slot '{slot}' at grade {grade}."
            ),
            Self::DegenerateDistribution { .. } => {
                "The option data for this item looks broken. Please report this.".to_string()
            }
            _ => "Something went wrong while running this command. Please try again later."
                .to_string(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
