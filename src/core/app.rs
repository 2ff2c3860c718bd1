use std::sync::Arc;

use axum::{middleware::from_fn, routing::get, Json, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, ApiPrefixModifier, SwaggerInfoModifier};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::transactions::{routes as transactions_routes, TransactionService};
use crate::shared::types::{HealthResponse, WelcomeResponse};

/// Services shared by the HTTP handlers
pub struct AppServices {
    pub categories: Arc<CategoryService>,
    pub transactions: Arc<TransactionService>,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse)
    ),
    tag = "system"
)]
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the FinTech Transaction Dashboard API!".to_string(),
    })
}

fn swagger_routes(app: &AppConfig, swagger: &SwaggerConfig) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: swagger.title.clone(),
        version: swagger.version.clone(),
        description: swagger.description.clone(),
    }
    .modify(&mut openapi);
    ApiPrefixModifier {
        prefix: app.api_prefix.clone(),
    }
    .modify(&mut openapi);

    let ui = Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    if let Some(credentials) = swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        ui.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        ui
    }
}

/// Build the complete application router: API routes under the configured
/// prefix, system routes at the root, and the CORS/tracing/request-id stack.
pub fn build_router(app: &AppConfig, swagger: &SwaggerConfig, services: AppServices) -> Router {
    let api = Router::new()
        .merge(categories_routes::routes(services.categories))
        .merge(transactions_routes::routes(services.transactions));

    // axum does not nest at the root
    let api = if app.api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(&app.api_prefix, api)
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(swagger_routes(app, swagger))
        .merge(api)
        .layer(middleware::cors_layer(&app.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
