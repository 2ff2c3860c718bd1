use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::transactions::handlers;
use crate::features::transactions::services::TransactionService;

/// Create routes for the transactions feature, relative to the API prefix.
///
/// The collection answers with and without a trailing slash.
pub fn routes(service: Arc<TransactionService>) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(handlers::get_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction),
        )
        .with_state(service)
}
