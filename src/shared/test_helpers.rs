use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;

use crate::core::app::{build_router, AppServices};
use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::{CategoryRepository, CategoryService};
use crate::features::transactions::models::{TransactionFields, TransactionWithCategory};
use crate::features::transactions::{TransactionRepository, TransactionService};

#[derive(Debug, Clone)]
struct StoredTransaction {
    id: i32,
    fields: TransactionFields,
}

#[derive(Debug, Default)]
struct StoreState {
    categories: Vec<Category>,
    transactions: Vec<StoredTransaction>,
    last_transaction_id: i32,
}

impl StoreState {
    fn category(&self, id: i32) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn join(&self, stored: &StoredTransaction) -> TransactionWithCategory {
        let category_name = self
            .category(stored.fields.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        TransactionWithCategory {
            id: stored.id,
            description: stored.fields.description.clone(),
            amount: stored.fields.amount,
            kind: stored.fields.kind.clone(),
            category_id: stored.fields.category_id,
            user_id: stored.fields.user_id,
            date: stored.fields.date.unwrap_or_else(Utc::now),
            category_name,
        }
    }

    fn ensure_category(&self, category_id: i32) -> Result<()> {
        match self.category(category_id) {
            Some(_) => Ok(()),
            None => Err(AppError::Validation(format!(
                "Category {} does not exist",
                category_id
            ))),
        }
    }
}

/// In-memory stand-in for the Postgres repositories, with the same
/// id ordering and foreign key behaviour.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    pub fn add_category(&self, name: &str) -> Category {
        let mut state = self.state();
        let category = Category {
            id: state.categories.len() as i32 + 1,
            name: name.to_string(),
        };
        state.categories.push(category.clone());
        category
    }

    /// Insert directly, bypassing the HTTP layer
    pub fn add_transaction(&self, fields: TransactionFields) -> TransactionWithCategory {
        let mut state = self.state();
        state.ensure_category(fields.category_id).unwrap();
        insert_locked(&mut state, fields)
    }

    pub fn transaction_count(&self) -> usize {
        self.state().transactions.len()
    }
}

fn insert_locked(state: &mut StoreState, mut fields: TransactionFields) -> TransactionWithCategory {
    state.last_transaction_id += 1;
    fields.date = Some(fields.date.unwrap_or_else(Utc::now));
    let stored = StoredTransaction {
        id: state.last_transaction_id,
        fields,
    };
    let joined = state.join(&stored);
    state.transactions.push(stored);
    joined
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.state().categories.clone())
    }
}

#[async_trait]
impl TransactionRepository for InMemoryStore {
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<TransactionWithCategory>> {
        let state = self.state();
        Ok(state
            .transactions
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .map(|t| state.join(t))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TransactionWithCategory>> {
        let state = self.state();
        Ok(state
            .transactions
            .iter()
            .find(|t| t.id == id)
            .map(|t| state.join(t)))
    }

    async fn insert(&self, fields: TransactionFields) -> Result<TransactionWithCategory> {
        let mut state = self.state();
        state.ensure_category(fields.category_id)?;
        Ok(insert_locked(&mut state, fields))
    }

    async fn update(
        &self,
        id: i32,
        mut fields: TransactionFields,
    ) -> Result<Option<TransactionWithCategory>> {
        let mut state = self.state();
        let Some(index) = state.transactions.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        state.ensure_category(fields.category_id)?;

        fields.date = fields.date.or(state.transactions[index].fields.date);
        state.transactions[index].fields = fields;
        Ok(Some(state.join(&state.transactions[index])))
    }

    async fn delete(&self, id: i32) -> Result<Option<TransactionWithCategory>> {
        let mut state = self.state();
        let Some(index) = state.transactions.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let removed = state.transactions.remove(index);
        Ok(Some(state.join(&removed)))
    }
}

/// Full application router over `store`, default config, served in-process
pub fn test_server(store: Arc<InMemoryStore>) -> TestServer {
    let services = AppServices {
        categories: Arc::new(CategoryService::new(store.clone())),
        transactions: Arc::new(TransactionService::new(store)),
    };
    let router = build_router(&AppConfig::default(), &SwaggerConfig::default(), services);
    TestServer::new(router).unwrap()
}
