//! Discord interaction handlers.

/// Autocomplete providers for command parameters
pub mod autocomplete;
