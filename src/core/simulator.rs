//! Cube roll simulation.
//!
//! Pure computation over an [`EligibleSet`]: weighted random selection of
//! option lines, one line per non-empty pool per roll, with the random source
//! injected so runs are reproducible under test. Rolls are independent and
//! identically distributed - the real cube mechanic has no memory of prior
//! results, and neither does this simulator.

use crate::{
    core::resolver::{EligibleSet, WeightedOption},
    entities::potential_option,
    errors::{Error, Result},
};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

/// Placeholder token substituted with `value_1` when rendering a line.
pub const PLACEHOLDER_VALUE_1: &str = "{value1}";
/// Placeholder token substituted with `value_2` when rendering a line.
pub const PLACEHOLDER_VALUE_2: &str = "{value2}";

/// One drawn option line with its rendered display text.
#[derive(Debug, Clone)]
pub struct RolledLine {
    /// The chosen catalog row
    pub option: potential_option::Model,
    /// `display_template` with both value placeholders substituted
    pub display: String,
}

/// Outcome of one simulated cube roll.
///
/// Each non-empty pool in the eligible set contributes one independently
/// drawn line; at least one of the two fields is always populated.
#[derive(Debug, Clone)]
pub struct RollOutcome {
    /// Line drawn from the regular pool, when that pool has rows
    pub regular: Option<RolledLine>,
    /// Line drawn from the prime pool, when that pool has rows
    pub prime: Option<RolledLine>,
}

impl RollOutcome {
    /// Iterates the drawn lines in display order (regular first).
    pub fn lines(&self) -> impl Iterator<Item = &RolledLine> {
        self.regular.iter().chain(self.prime.iter())
    }
}

/// Simulates `count` independent cube rolls against an eligible set.
///
/// Selection probability for an entry is its weight divided by its pool's
/// total weight. The random source is injected rather than globally seeded:
/// production callers pass an entropy-seeded RNG, tests pass a deterministic
/// one and get identical outcome sequences for identical inputs.
pub fn roll<R: Rng + ?Sized>(
    set: &EligibleSet,
    count: u32,
    rng: &mut R,
) -> Result<Vec<RollOutcome>> {
    if count == 0 {
        return Err(Error::Validation {
            message: "roll count must be at least 1".to_string(),
        });
    }
    if set.is_empty() {
        return Err(Error::Validation {
            message: "cannot roll against an empty eligible set".to_string(),
        });
    }

    let regular_dist = pool_distribution(&set.regular)?;
    let prime_dist = pool_distribution(&set.prime)?;

    let mut outcomes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let regular = match &regular_dist {
            Some(dist) => Some(draw(&set.regular, dist, rng)),
            None => None,
        };
        let prime = match &prime_dist {
            Some(dist) => Some(draw(&set.prime, dist, rng)),
            None => None,
        };
        outcomes.push(RollOutcome { regular, prime });
    }

    Ok(outcomes)
}

/// Renders an option's display template with its values substituted.
///
/// Integral values print without a trailing `.0` so templates read the way
/// the game presents them (`"STR : +12%"`, not `"STR : +12.0%"`).
#[must_use]
pub fn render_display(option: &potential_option::Model) -> String {
    option
        .display_template
        .replace(PLACEHOLDER_VALUE_1, &format_value(option.value_1))
        .replace(PLACEHOLDER_VALUE_2, &format_value(option.value_2))
}

/// Builds the weighted distribution for one pool.
///
/// An empty pool is a normal absence (no draw slot); a non-empty pool whose
/// weights cannot form a distribution - all zero, negative, or non-finite -
/// is a data-integrity defect.
fn pool_distribution(pool: &[WeightedOption]) -> Result<Option<WeightedIndex<f64>>> {
    if pool.is_empty() {
        return Ok(None);
    }

    WeightedIndex::new(pool.iter().map(|entry| entry.weight))
        .map(Some)
        .map_err(|_| Error::DegenerateDistribution {
            entries: pool.len(),
        })
}

fn draw<R: Rng + ?Sized>(
    pool: &[WeightedOption],
    dist: &WeightedIndex<f64>,
    rng: &mut R,
) -> RolledLine {
    let chosen = &pool[dist.sample(rng)];
    RolledLine {
        option: chosen.option.clone(),
        display: render_display(&chosen.option),
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
