use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::transactions::dtos::{TransactionRequestDto, TransactionResponseDto};
use crate::features::transactions::repositories::TransactionRepository;
use crate::shared::constants::TRANSACTION_NOT_FOUND;
use crate::shared::types::PaginationQuery;

/// Service for transaction CRUD
pub struct TransactionService {
    repository: Arc<dyn TransactionRepository>,
}

fn not_found() -> AppError {
    AppError::NotFound(TRANSACTION_NOT_FOUND.to_string())
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }

    /// List transactions in creation order, windowed by `skip`/`limit`
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<Vec<TransactionResponseDto>> {
        let transactions = self
            .repository
            .list(pagination.skip, pagination.limit)
            .await?;

        Ok(transactions.into_iter().map(|t| t.into()).collect())
    }

    pub async fn get(&self, id: i32) -> Result<TransactionResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|t| t.into())
            .ok_or_else(not_found)
    }

    pub async fn create(&self, dto: TransactionRequestDto) -> Result<TransactionResponseDto> {
        let transaction = self.repository.insert(dto.into()).await?;

        tracing::info!(
            "Transaction created: id={}, category_id={}, user_id={}",
            transaction.id,
            transaction.category_id,
            transaction.user_id
        );

        Ok(transaction.into())
    }

    /// Replace every mutable field of transaction `id`
    pub async fn update(&self, id: i32, dto: TransactionRequestDto) -> Result<TransactionResponseDto> {
        let transaction = self
            .repository
            .update(id, dto.into())
            .await?
            .ok_or_else(not_found)?;

        tracing::info!("Transaction updated: id={}", transaction.id);

        Ok(transaction.into())
    }

    /// Delete transaction `id`, returning it as it was before removal
    pub async fn delete(&self, id: i32) -> Result<TransactionResponseDto> {
        let transaction = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!("Transaction deleted: id={}", transaction.id);

        Ok(transaction.into())
    }
}
