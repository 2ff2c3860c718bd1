use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::transactions::models::{TransactionFields, TransactionWithCategory};

/// Storage for transactions. Every read hands back the row joined with its category.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Transactions in id order, windowed by `skip`/`limit`
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<TransactionWithCategory>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<TransactionWithCategory>>;

    /// Insert a row. An unknown `category_id` is a validation error.
    async fn insert(&self, fields: TransactionFields) -> Result<TransactionWithCategory>;

    /// Replace every mutable column of row `id`; `None` when it does not exist
    async fn update(
        &self,
        id: i32,
        fields: TransactionFields,
    ) -> Result<Option<TransactionWithCategory>>;

    /// Remove row `id`, returning it as it was before deletion
    async fn delete(&self, id: i32) -> Result<Option<TransactionWithCategory>>;
}

/// Postgres-backed [`TransactionRepository`].
///
/// Writes run as a single `INSERT/UPDATE/DELETE ... RETURNING` inside a CTE
/// joined to `categories`, so the returned row is exactly what was written.
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, category_id: i32, action: &str) -> AppError {
    if is_foreign_key_violation(&e) {
        return AppError::Validation(format!("Category {} does not exist", category_id));
    }
    tracing::error!("Failed to {} transaction: {:?}", action, e);
    AppError::Database(e)
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<TransactionWithCategory>> {
        sqlx::query_as::<_, TransactionWithCategory>(
            r#"
            SELECT t.id, t.description, t.amount, t.type, t.category_id, t.user_id, t.date,
                   c.name AS category_name
            FROM transactions t
            JOIN categories c ON c.id = t.category_id
            ORDER BY t.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list transactions: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TransactionWithCategory>> {
        sqlx::query_as::<_, TransactionWithCategory>(
            r#"
            SELECT t.id, t.description, t.amount, t.type, t.category_id, t.user_id, t.date,
                   c.name AS category_name
            FROM transactions t
            JOIN categories c ON c.id = t.category_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get transaction {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, fields: TransactionFields) -> Result<TransactionWithCategory> {
        let category_id = fields.category_id;
        sqlx::query_as::<_, TransactionWithCategory>(
            r#"
            WITH inserted AS (
                INSERT INTO transactions (description, amount, type, category_id, user_id, date)
                VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
                RETURNING id, description, amount, type, category_id, user_id, date
            )
            SELECT i.id, i.description, i.amount, i.type, i.category_id, i.user_id, i.date,
                   c.name AS category_name
            FROM inserted i
            JOIN categories c ON c.id = i.category_id
            "#,
        )
        .bind(fields.description)
        .bind(fields.amount)
        .bind(fields.kind)
        .bind(fields.category_id)
        .bind(fields.user_id)
        .bind(fields.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, category_id, "create"))
    }

    async fn update(
        &self,
        id: i32,
        fields: TransactionFields,
    ) -> Result<Option<TransactionWithCategory>> {
        let category_id = fields.category_id;
        sqlx::query_as::<_, TransactionWithCategory>(
            r#"
            WITH updated AS (
                UPDATE transactions
                SET description = $1,
                    amount = $2,
                    type = $3,
                    category_id = $4,
                    user_id = $5,
                    date = COALESCE($6, date)
                WHERE id = $7
                RETURNING id, description, amount, type, category_id, user_id, date
            )
            SELECT u.id, u.description, u.amount, u.type, u.category_id, u.user_id, u.date,
                   c.name AS category_name
            FROM updated u
            JOIN categories c ON c.id = u.category_id
            "#,
        )
        .bind(fields.description)
        .bind(fields.amount)
        .bind(fields.kind)
        .bind(fields.category_id)
        .bind(fields.user_id)
        .bind(fields.date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, category_id, "update"))
    }

    async fn delete(&self, id: i32) -> Result<Option<TransactionWithCategory>> {
        sqlx::query_as::<_, TransactionWithCategory>(
            r#"
            WITH deleted AS (
                DELETE FROM transactions
                WHERE id = $1
                RETURNING id, description, amount, type, category_id, user_id, date
            )
            SELECT d.id, d.description, d.amount, d.type, d.category_id, d.user_id, d.date,
                   c.name AS category_name
            FROM deleted d
            JOIN categories c ON c.id = d.category_id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete transaction {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;

    async fn create_category(pool: &PgPool, name: &str) -> i32 {
        sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn transaction_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn fields(description: &str, amount: &str, category_id: i32) -> TransactionFields {
        TransactionFields {
            description: description.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            kind: "debit".to_string(),
            category_id,
            user_id: 1,
            date: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insert_returns_joined_row_with_exact_amount(pool: PgPool) {
        let food = create_category(&pool, "Food").await;
        let repo = PgTransactionRepository::new(pool);

        let created = repo.insert(fields("Groceries", "50.25", food)).await.unwrap();
        assert_eq!(created.category_name, "Food");
        assert_eq!(created.amount, Decimal::from_str("50.25").unwrap());

        let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.amount.to_string(), "50.25");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insert_with_unknown_category_is_rejected(pool: PgPool) {
        let repo = PgTransactionRepository::new(pool.clone());

        let err = repo.insert(fields("Orphan", "10.00", 42)).await.unwrap_err();
        assert!(
            matches!(err, AppError::Validation(ref msg) if msg == "Category 42 does not exist"),
            "unexpected error: {:?}",
            err
        );
        assert_eq!(transaction_count(&pool).await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_with_unknown_category_leaves_row_unchanged(pool: PgPool) {
        let food = create_category(&pool, "Food").await;
        let repo = PgTransactionRepository::new(pool);
        let created = repo.insert(fields("Lunch", "12.50", food)).await.unwrap();

        let err = repo
            .update(created.id, fields("Changed", "99.99", 4242))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Category 4242 does not exist"));

        let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_without_date_keeps_stored_date(pool: PgPool) {
        let food = create_category(&pool, "Food").await;
        let rent = create_category(&pool, "Rent").await;
        let repo = PgTransactionRepository::new(pool);

        let stored_date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let mut original = fields("Dinner", "30.00", food);
        original.date = Some(stored_date);
        let created = repo.insert(original).await.unwrap();

        let updated = repo
            .update(created.id, fields("Deposit", "800.00", rent))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, "Deposit");
        assert_eq!(updated.category_name, "Rent");
        assert_eq!(updated.date, stored_date);

        let new_date = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut dated = fields("Deposit", "800.00", rent);
        dated.date = Some(new_date);
        let redated = repo.update(created.id, dated).await.unwrap().unwrap();
        assert_eq!(redated.date, new_date);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_missing_id_returns_none(pool: PgPool) {
        let food = create_category(&pool, "Food").await;
        let repo = PgTransactionRepository::new(pool);

        assert!(repo
            .update(99999, fields("Nobody", "1.00", food))
            .await
            .unwrap()
            .is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_returns_row_as_it_was(pool: PgPool) {
        let food = create_category(&pool, "Food").await;
        let repo = PgTransactionRepository::new(pool.clone());
        let created = repo.insert(fields("To Delete", "100.00", food)).await.unwrap();

        let deleted = repo.delete(created.id).await.unwrap().unwrap();
        assert_eq!(deleted, created);
        assert_eq!(deleted.category_name, "Food");

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(repo.delete(created.id).await.unwrap().is_none());
        assert_eq!(transaction_count(&pool).await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_windows_over_id_order(pool: PgPool) {
        let food = create_category(&pool, "Food").await;
        let repo = PgTransactionRepository::new(pool);
        for i in 0..10 {
            repo.insert(fields(&format!("Test {}", i), "1.00", food))
                .await
                .unwrap();
        }

        let page = repo.list(2, 5).await.unwrap();
        let descriptions: Vec<&str> = page.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Test 2", "Test 3", "Test 4", "Test 5", "Test 6"]
        );
        assert!(page.windows(2).all(|w| w[0].id < w[1].id));

        assert!(repo.list(10, 5).await.unwrap().is_empty());
    }
}
