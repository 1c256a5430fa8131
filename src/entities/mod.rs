//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod command_log;
pub mod potential_option;
pub mod transaction_log;

// Re-export specific types to avoid conflicts
pub use command_log::{
    Column as CommandLogColumn, CommandOutcome, Entity as CommandLog, Model as CommandLogModel,
};
pub use potential_option::{
    Column as PotentialOptionColumn, Entity as PotentialOption, Grade,
    Model as PotentialOptionModel, OptionTier,
};
pub use transaction_log::{
    Column as TransactionLogColumn, Entity as TransactionLog, Model as TransactionLogModel,
};
