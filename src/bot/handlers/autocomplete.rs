//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters
//! like potential grades and equipment slots. Both parameter spaces are
//! small closed sets, so suggestions come from static lists rather than
//! database queries.

use crate::{bot::BotData, errors::Error};

/// Equipment slot identifiers the catalog restricts options to.
pub const EQUIPMENT_SLOTS: &[&str] = &[
    "belt", "bottom", "cape", "earring", "emblem", "eye", "face", "gloves", "hat", "heart",
    "overall", "pendant", "ring", "secondary", "shoes", "shoulder", "top", "weapon",
];

/// Provides autocomplete suggestions for potential grades.
///
/// Suggests both the single-letter codes and the full grade names, since
/// [`crate::entities::Grade::parse`] accepts either form.
pub async fn autocomplete_grade(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let grades = ["R", "E", "U", "L", "Rare", "Epic", "Unique", "Legendary"];
    let partial_lower = partial.to_lowercase();

    grades
        .iter()
        .filter(|grade| grade.to_lowercase().starts_with(&partial_lower))
        .map(|&grade| grade.to_string())
        .collect()
}

/// Provides autocomplete suggestions for equipment slot names.
pub async fn autocomplete_slot(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    EQUIPMENT_SLOTS
        .iter()
        .filter(|slot| slot.contains(&partial_lower))
        .map(|&slot| slot.to_string())
        .take(25) // Discord autocomplete limit
        .collect()
}
