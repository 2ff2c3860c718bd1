use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::transactions::dtos::{TransactionRequestDto, TransactionResponseDto};
use crate::features::transactions::services::TransactionService;
use crate::shared::types::{ErrorResponse, PaginationQuery};

/// List transactions
///
/// Returns transactions in creation order, windowed by `skip` and `limit`.
/// Also served without the trailing slash.
#[utoipa::path(
    get,
    path = "/api/v1/transactions/",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of transactions", body = Vec<TransactionResponseDto>),
        (status = 422, description = "Invalid pagination parameters", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn list_transactions(
    State(service): State<Arc<TransactionService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<Vec<TransactionResponseDto>>> {
    pagination
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let transactions = service.list(&pagination).await?;
    Ok(Json(transactions))
}

/// Get a transaction by id
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    params(
        ("id" = i32, Path, description = "Transaction id")
    ),
    responses(
        (status = 200, description = "Transaction found", body = TransactionResponseDto),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn get_transaction(
    State(service): State<Arc<TransactionService>>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<TransactionResponseDto>> {
    let transaction = service.get(id).await?;
    Ok(Json(transaction))
}

/// Create a transaction
///
/// Responds 200 (not 201) with the stored transaction.
#[utoipa::path(
    post,
    path = "/api/v1/transactions/",
    request_body = TransactionRequestDto,
    responses(
        (status = 200, description = "Transaction created", body = TransactionResponseDto),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn create_transaction(
    State(service): State<Arc<TransactionService>>,
    AppJson(dto): AppJson<TransactionRequestDto>,
) -> Result<Json<TransactionResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let transaction = service.create(dto).await?;
    Ok(Json(transaction))
}

/// Replace a transaction
#[utoipa::path(
    put,
    path = "/api/v1/transactions/{id}",
    params(
        ("id" = i32, Path, description = "Transaction id")
    ),
    request_body = TransactionRequestDto,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionResponseDto),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn update_transaction(
    State(service): State<Arc<TransactionService>>,
    AppPath(id): AppPath<i32>,
    AppJson(dto): AppJson<TransactionRequestDto>,
) -> Result<Json<TransactionResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let transaction = service.update(id, dto).await?;
    Ok(Json(transaction))
}

/// Delete a transaction
///
/// Returns the transaction as it was immediately before deletion.
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    params(
        ("id" = i32, Path, description = "Transaction id")
    ),
    responses(
        (status = 200, description = "Deleted transaction", body = TransactionResponseDto),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn delete_transaction(
    State(service): State<Arc<TransactionService>>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<TransactionResponseDto>> {
    let transaction = service.delete(id).await?;
    Ok(Json(transaction))
}
