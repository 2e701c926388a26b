//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::{extract::DefaultBodyLimit, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Allowance for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/auth/register` - Create an operator account
/// - `POST /api/auth/login` - Log in with username and password
/// - `GET /api/auth/logout` - Logout current user
/// - `GET /api/auth/user` - Get current user information
/// - `PUT /api/user/profile` - Change username and/or password
/// - `GET /api/orders` - Search and paginate orders
/// - `GET /api/orders/{id}` - Get one order
/// - `PUT /api/orders/{id}` - Edit an order
/// - `POST /api/orders/upload` - Ingest an uploaded spreadsheet
/// - `POST /api/orders/batch-delete` - Delete several orders
///
/// The OpenAPI specification is available at `/api/docs/openapi.json` and Swagger UI is
/// served at `/api/docs`.
///
/// # Arguments
/// - `max_upload_bytes` - Largest accepted upload, request bodies are capped slightly above it
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, page_size, max_upload_bytes };
/// let router = routes(max_upload_bytes).with_state(app_state);
/// ```
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Orderdesk", description = "Orderdesk API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::user::USER_TAG, description = "Profile API routes"),
        (name = controller::order::ORDER_TAG, description = "Order API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::user::update_profile))
        .routes(routes!(controller::order::list_orders))
        .routes(routes!(
            controller::order::get_order,
            controller::order::update_order
        ))
        .routes(routes!(controller::order::upload_orders))
        .routes(routes!(controller::order::batch_delete_orders))
        .split_for_parts();

    routes
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
