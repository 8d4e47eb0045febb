//! Router configuration for the API.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// Middleware is applied in reverse order of declaration, so the request id
/// is assigned before the logging middleware reads it.
///
/// # Routes
/// - `/api/v1/users` - User CRUD operations
/// - `/health`, `/health/ready`, `/health/live` - Probes
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState) -> Router {
    let api_v1 = Router::new().nest("/users", handlers::users::user_routes());

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(handlers::health::health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
