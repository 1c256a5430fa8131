//! Potential option catalog data access.
//!
//! The catalog is read-mostly: the resolver queries it through
//! [`find_options`], and the only write path is the ingestion surface
//! ([`ingest_option`] / [`seed_from_config`]) used by the out-of-band data
//! collaborator. Every committed ingestion mutation writes one transaction
//! ledger record.

use crate::{
    config::{
        bot::BotIdentity,
        catalog::{CatalogConfig, OptionConfig},
    },
    core::transaction_log::{self, NewTransactionLog},
    entities::{Grade, OptionTier, PotentialOption, potential_option},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves the catalog rows eligible for an item context, ordered by id.
///
/// A row matches iff its grade equals `grade`, its tier equals `option_type`
/// when one is specified, its inclusive level range contains `item_level`,
/// and its slot set is empty or contains `slot`. An empty result is a normal
/// outcome here, not an error - the resolver decides whether emptiness is
/// reportable. Grade, tier, and level bounds filter in SQL; slot-set
/// membership is checked in Rust over the JSON column.
pub async fn find_options(
    db: &DatabaseConnection,
    grade: Grade,
    item_level: i32,
    slot: &str,
    option_type: Option<OptionTier>,
) -> Result<Vec<potential_option::Model>> {
    let mut query = PotentialOption::find()
        .filter(potential_option::Column::Grade.eq(grade))
        .filter(potential_option::Column::ItemLevelMin.lte(item_level))
        .filter(potential_option::Column::ItemLevelMax.gte(item_level))
        .order_by_asc(potential_option::Column::Id);

    if let Some(tier) = option_type {
        query = query.filter(potential_option::Column::OptionType.eq(tier));
    }

    let rows = query.all(db).await?;
    Ok(rows
        .into_iter()
        .filter(|row| row.allows_slot(slot))
        .collect())
}

/// Upserts one catalog row from an ingestion definition.
///
/// Rows are keyed on the eligibility tuple (grade, `option_type`,
/// `option_id`, `item_level_tier`). An existing row keeps its identity and
/// `created_at` while its values, display fields, and `updated_at` are
/// refreshed; a missing row is inserted. One transaction ledger record is
/// written per committed mutation.
pub async fn ingest_option(
    db: &DatabaseConnection,
    identity: &BotIdentity,
    config: &OptionConfig,
) -> Result<potential_option::Model> {
    let existing = PotentialOption::find()
        .filter(potential_option::Column::Grade.eq(config.grade))
        .filter(potential_option::Column::OptionType.eq(config.option_type))
        .filter(potential_option::Column::OptionId.eq(config.option_id.as_str()))
        .filter(potential_option::Column::ItemLevelTier.eq(config.item_level_tier))
        .one(db)
        .await?;

    let now = chrono::Utc::now();
    let (model, action) = if let Some(existing) = existing {
        let mut row: potential_option::ActiveModel = existing.into();
        row.is_prime = Set(config.is_prime);
        row.item_level_min = Set(config.item_level_min);
        row.item_level_max = Set(config.item_level_max);
        row.allowed_slots = Set(serde_json::json!(config.allowed_slots));
        row.value_1 = Set(config.value_1);
        row.value_2 = Set(config.value_2);
        row.value_etc = Set(config.value_etc.clone());
        row.display_template = Set(config.display_template.clone());
        row.data_source = Set(Some(config.data_source.clone()));
        row.updated_at = Set(now);
        (row.update(db).await?, "update")
    } else {
        let row = potential_option::ActiveModel {
            grade: Set(config.grade),
            option_type: Set(config.option_type),
            option_id: Set(config.option_id.clone()),
            is_prime: Set(config.is_prime),
            item_level_tier: Set(config.item_level_tier),
            item_level_min: Set(config.item_level_min),
            item_level_max: Set(config.item_level_max),
            allowed_slots: Set(serde_json::json!(config.allowed_slots)),
            value_1: Set(config.value_1),
            value_2: Set(config.value_2),
            value_etc: Set(config.value_etc.clone()),
            display_template: Set(config.display_template.clone()),
            data_source: Set(Some(config.data_source.clone())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        (row.insert(db).await?, "insert")
    };

    let mut ledger_entry = NewTransactionLog::system(identity, "potential_option", action);
    ledger_entry.description = Some(format!(
        "{action} option '{}' (grade {}, tier {})",
        config.option_id, config.grade, config.item_level_tier
    ));
    transaction_log::record_transaction(db, ledger_entry).await?;

    Ok(model)
}

/// Ingests every option in a catalog seed configuration.
///
/// Returns the number of rows upserted. Used at startup to bring the
/// catalog in line with catalog.toml.
pub async fn seed_from_config(
    db: &DatabaseConnection,
    identity: &BotIdentity,
    config: &CatalogConfig,
) -> Result<usize> {
    let mut count = 0;
    for option in &config.options {
        ingest_option(db, identity, option).await?;
        count += 1;
    }
    info!("Ingested {count} catalog option rows");
    Ok(count)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::command_log::AuditFilter;
    use crate::test_utils::{TestOption, insert_option, setup_test_db, test_identity};

    fn sample_config() -> OptionConfig {
        OptionConfig {
            grade: Grade::Legendary,
            option_type: OptionTier::Upper,
            option_id: "str_pct".to_string(),
            is_prime: false,
            item_level_tier: 3,
            item_level_min: 121,
            item_level_max: 250,
            allowed_slots: Vec::new(),
            value_1: 12.0,
            value_2: 0.0,
            value_etc: None,
            display_template: "STR : +{value1}%".to_string(),
            data_source: "seed".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_options_filters_grade_level_and_slot() -> Result<()> {
        let db = setup_test_db().await?;

        let matching = insert_option(
            &db,
            TestOption {
                item_level_min: 121,
                ..Default::default()
            },
        )
        .await?;
        // Wrong grade
        insert_option(
            &db,
            TestOption {
                grade: Grade::Unique,
                option_id: "dex_pct",
                ..Default::default()
            },
        )
        .await?;
        // Level range below the query level
        insert_option(
            &db,
            TestOption {
                option_id: "int_pct",
                item_level_min: 0,
                item_level_max: 120,
                ..Default::default()
            },
        )
        .await?;
        // Restricted to a different slot
        insert_option(
            &db,
            TestOption {
                option_id: "boss_dmg",
                allowed_slots: vec!["weapon"],
                ..Default::default()
            },
        )
        .await?;

        let rows = find_options(&db, Grade::Legendary, 150, "hat", None).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, matching.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_options_narrows_by_tier() -> Result<()> {
        let db = setup_test_db().await?;

        insert_option(&db, TestOption::default()).await?;
        insert_option(
            &db,
            TestOption {
                option_type: OptionTier::Lower,
                option_id: "all_stat",
                ..Default::default()
            },
        )
        .await?;

        let upper = find_options(&db, Grade::Legendary, 150, "hat", Some(OptionTier::Upper)).await?;
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].option_id, "str_pct");

        let both = find_options(&db, Grade::Legendary, 150, "hat", None).await?;
        assert_eq!(both.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_options_empty_result_is_not_an_error() -> Result<()> {
        let db = setup_test_db().await?;
        let rows = find_options(&db, Grade::Rare, 10, "hat", None).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_ingest_option_inserts_then_updates() -> Result<()> {
        let db = setup_test_db().await?;
        let identity = test_identity();

        let inserted = ingest_option(&db, &identity, &sample_config()).await?;
        assert_eq!(inserted.value_1, 12.0);

        // Re-ingesting the same eligibility tuple with new values updates in place
        let mut updated_config = sample_config();
        updated_config.value_1 = 13.0;
        let updated = ingest_option(&db, &identity, &updated_config).await?;

        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.value_1, 13.0);
        assert_eq!(updated.created_at, inserted.created_at);
        assert!(updated.updated_at >= inserted.updated_at);

        let all = PotentialOption::find().all(&db).await?;
        assert_eq!(all.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_ingest_option_writes_transaction_ledger() -> Result<()> {
        let db = setup_test_db().await?;
        let identity = test_identity();

        ingest_option(&db, &identity, &sample_config()).await?;
        ingest_option(&db, &identity, &sample_config()).await?;

        let records =
            transaction_log::find_transaction_logs(&db, &AuditFilter::default()).await?;
        assert_eq!(records.len(), 2);
        // Newest first: the second ingest was an update
        assert_eq!(records[0].action, "update");
        assert_eq!(records[1].action, "insert");
        assert!(records.iter().all(|r| r.target_table == "potential_option"));

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_from_config_ingests_every_option() -> Result<()> {
        let db = setup_test_db().await?;
        let identity = test_identity();

        let mut second = sample_config();
        second.option_id = "dex_pct".to_string();
        let config = CatalogConfig {
            options: vec![sample_config(), second],
        };

        let count = seed_from_config(&db, &identity, &config).await?;
        assert_eq!(count, 2);
        assert_eq!(PotentialOption::find().all(&db).await?.len(), 2);

        Ok(())
    }
}
