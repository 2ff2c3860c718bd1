use utoipa::{Modify, OpenApi};

use crate::core::app;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::transactions::{
    dtos as transactions_dtos, handlers as transactions_handlers,
};
use crate::shared::types::{ErrorResponse, HealthResponse, WelcomeResponse};

/// Prefix the handler annotations are written against
const DOCUMENTED_PREFIX: &str = "/api/v1";

#[derive(OpenApi)]
#[openapi(
    paths(
        // System
        app::root,
        app::health_check,
        // Categories
        categories_handlers::list_categories,
        // Transactions
        transactions_handlers::list_transactions,
        transactions_handlers::get_transaction,
        transactions_handlers::create_transaction,
        transactions_handlers::update_transaction,
        transactions_handlers::delete_transaction,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            HealthResponse,
            WelcomeResponse,
            // Categories
            categories_dtos::CategoryResponseDto,
            // Transactions
            transactions_dtos::TransactionRequestDto,
            transactions_dtos::TransactionResponseDto,
        )
    ),
    tags(
        (name = "system", description = "Health and service info"),
        (name = "categories", description = "Transaction categories"),
        (name = "transactions", description = "Financial transactions CRUD"),
    ),
    info(
        title = "FinTech Transaction Dashboard API",
        version = "1.0.0",
        description = "API for managing and visualizing financial transactions.",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

/// Rewrites documented API paths to the prefix the router is actually mounted at
pub struct ApiPrefixModifier {
    pub prefix: String,
}

impl Modify for ApiPrefixModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if self.prefix == DOCUMENTED_PREFIX {
            return;
        }

        let paths = std::mem::take(&mut openapi.paths.paths);
        openapi.paths.paths = paths
            .into_iter()
            .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
                Some(rest) => (format!("{}{}", self.prefix, rest), item),
                None => (path, item),
            })
            .collect();
    }
}
