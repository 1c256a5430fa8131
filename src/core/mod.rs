//! Core business logic - framework-agnostic catalog access, option
//! resolution, roll simulation, and the two audit ledgers.
//!
//! Nothing in this module touches Discord types; the bot layer adapts its
//! context into [`executor::CommandContext`] and calls down through
//! [`executor::execute`].

/// Potential option catalog data access and ingestion
pub mod catalog;
/// Command ledger insert path and audit query surface
pub mod command_log;
/// Command execution wrapper - timing, classification, ledger writes
pub mod executor;
/// Eligible-option resolution and weighting policy
pub mod resolver;
/// Weighted cube roll simulation
pub mod simulator;
/// Transaction ledger insert path and audit query surface
pub mod transaction_log;
