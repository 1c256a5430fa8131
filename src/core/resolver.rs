//! Option resolution business logic.
//!
//! The resolver translates an item's context (grade, level, slot, requested
//! tier) into the concrete eligible-option population and effective selection
//! weights the simulator draws from. Input validation happens in
//! [`RollContext::parse`], before any catalog query is issued.

use crate::{
    core::catalog,
    entities::{Grade, OptionTier, potential_option},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Selection weight assigned to every matching catalog row.
///
/// The catalog schema encodes no per-row weight, so selection is uniform per
/// matching row within its pool: each row's probability is
/// `DEFAULT_OPTION_WEIGHT / pool total`. Prime rows form a separate pool and
/// are drawn independently, which is what keeps them rarer in practice - the
/// prime pool is smaller. Changing this constant changes every simulated
/// probability in the system.
pub const DEFAULT_OPTION_WEIGHT: f64 = 1.0;

/// Validated item context for one resolution request.
#[derive(Debug, Clone)]
pub struct RollContext {
    /// Potential grade to roll at
    pub grade: Grade,
    /// Item level, used against each row's inclusive level range
    pub item_level: i32,
    /// Equipment slot identifier
    pub slot: String,
    /// Narrow to one potential tier, or consider both when `None`
    pub option_type: Option<OptionTier>,
}

impl RollContext {
    /// Validates raw caller input into a usable context.
    ///
    /// Unknown grades or tiers, negative item levels, and blank slots are
    /// rejected here with a validation error so that no catalog query is
    /// ever issued for malformed input.
    pub fn parse(
        grade: &str,
        item_level: i32,
        slot: &str,
        option_type: Option<&str>,
    ) -> Result<Self> {
        let grade = Grade::parse(grade)?;

        if item_level < 0 {
            return Err(Error::Validation {
                message: format!("item level must not be negative (got {item_level})"),
            });
        }

        let slot = slot.trim();
        if slot.is_empty() {
            return Err(Error::Validation {
                message: "equipment slot must not be empty".to_string(),
            });
        }

        let option_type = option_type.map(OptionTier::parse).transpose()?;

        Ok(Self {
            grade,
            item_level,
            slot: slot.to_string(),
            option_type,
        })
    }
}

/// One eligible option together with its effective selection weight.
#[derive(Debug, Clone)]
pub struct WeightedOption {
    /// The catalog row
    pub option: potential_option::Model,
    /// Effective selection weight within the row's pool
    pub weight: f64,
}

/// The eligible-option population for one roll, split into the regular pool
/// and the separate, smaller prime pool.
#[derive(Debug, Clone, Default)]
pub struct EligibleSet {
    /// Non-prime rows; one line per roll is drawn from here
    pub regular: Vec<WeightedOption>,
    /// Prime (`is_prime`) rows; drawn independently when non-empty
    pub prime: Vec<WeightedOption>,
}

impl EligibleSet {
    /// Total number of eligible rows across both pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regular.len() + self.prime.len()
    }

    /// Whether both pools are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.prime.is_empty()
    }

    /// Sum of weights across both pools.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.regular
            .iter()
            .chain(self.prime.iter())
            .map(|entry| entry.weight)
            .sum()
    }
}

/// Resolves an item context into its eligible-option population.
///
/// Matching rows are partitioned into the regular and prime pools, each row
/// carrying [`DEFAULT_OPTION_WEIGHT`]. Duplicate rows stay independent
/// weighted entries. A fully empty population fails with
/// [`Error::NoEligibleOptions`] carrying the input context, so callers can
/// distinguish "this item legitimately has no options here" from a data gap.
pub async fn resolve(db: &DatabaseConnection, ctx: &RollContext) -> Result<EligibleSet> {
    let rows =
        catalog::find_options(db, ctx.grade, ctx.item_level, &ctx.slot, ctx.option_type).await?;

    let mut set = EligibleSet::default();
    for row in rows {
        let pool = if row.is_prime {
            &mut set.prime
        } else {
            &mut set.regular
        };
        pool.push(WeightedOption {
            option: row,
            weight: DEFAULT_OPTION_WEIGHT,
        });
    }

    if set.is_empty() {
        return Err(Error::NoEligibleOptions {
            grade: ctx.grade,
            item_level: ctx.item_level,
            slot: ctx.slot.clone(),
            option_type: ctx.option_type,
        });
    }

    Ok(set)
}
