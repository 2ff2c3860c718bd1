use std::collections::HashMap;

use sqlx::PgPool;

use super::document::{SeedDocument, SeedError};

/// Row counts written by a successful seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub transactions: usize,
}

/// Replace the contents of both tables with `document`.
///
/// Everything runs in one database transaction: the truncate, the category
/// inserts and the transaction inserts either all commit or none do.
/// Identity sequences restart, so category ids follow document order from 1.
pub async fn seed_database(pool: &PgPool, document: &SeedDocument) -> Result<SeedSummary, SeedError> {
    document.validate()?;
    let summary = replace_contents(pool, document).await?;

    tracing::info!(
        categories = summary.categories,
        transactions = summary.transactions,
        "Database seeded successfully"
    );

    Ok(summary)
}

async fn replace_contents(pool: &PgPool, document: &SeedDocument) -> Result<SeedSummary, SeedError> {
    let mut tx = pool.begin().await?;

    tracing::info!("Clearing existing data");
    sqlx::query("TRUNCATE TABLE transactions, categories RESTART IDENTITY CASCADE")
        .execute(&mut *tx)
        .await?;

    let mut category_ids = HashMap::with_capacity(document.categories.len());
    for name in &document.categories {
        let id: i32 = sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;
        category_ids.insert(name.clone(), id);
    }

    let rows = document.resolve(&category_ids)?;
    for fields in &rows {
        sqlx::query(
            r#"
            INSERT INTO transactions (description, amount, type, category_id, user_id, date)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
            "#,
        )
        .bind(&fields.description)
        .bind(fields.amount)
        .bind(&fields.kind)
        .bind(fields.category_id)
        .bind(fields.user_id)
        .bind(fields.date)
        .execute(&mut *tx)
        .await?;
    }

    // An early return above drops `tx`, which rolls back
    tx.commit().await?;

    Ok(SeedSummary {
        categories: category_ids.len(),
        transactions: rows.len(),
    })
}
