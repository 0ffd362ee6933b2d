//! services/dashboard/src/web/router.rs
//!
//! Assembles the page routes, the middleware stack and the Swagger UI.

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;
use travel_portal_core::validation::MAX_UPLOAD_BYTES;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::web::middleware::{require_session, route_guard};
use crate::web::responses::ErrorBody;
use crate::web::rest::ApiDoc;
use crate::web::state::AppState;
use crate::web::{actions, auth, pages, support};

// Room for the multipart envelope and text fields around one maximal file.
const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::message("Halaman tidak ditemukan")))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);
    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            warn!("Ignoring invalid CORS_ORIGIN '{}': {}", config.cors_origin, e);
            layer
        }
    }
}

/// Builds the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Public routes (the guard bounces signed-in users away from these)
    let public_routes = Router::new()
        .route("/login", get(auth::login_page).post(auth::login_handler))
        .route("/register", get(auth::register_page).post(auth::register_handler))
        .route("/logout", post(auth::logout_handler));

    // Protected routes (a resolved session is required)
    let protected_routes = Router::new()
        .route("/dashboard", get(pages::dashboard_home))
        .route(
            "/dashboard/packages",
            get(pages::packages_page).post(actions::create_package),
        )
        .route("/dashboard/packages/{id}", get(pages::package_detail))
        .route(
            "/dashboard/registrations",
            get(pages::registrations_page).post(actions::start_registration),
        )
        .route(
            "/dashboard/payments",
            get(pages::payments_page).post(actions::submit_payment),
        )
        .route("/dashboard/payments/{id}/verify", patch(actions::verify_payment))
        .route(
            "/dashboard/documents",
            get(pages::documents_page).post(actions::upload_document),
        )
        .route("/dashboard/commissions", get(pages::commissions_page))
        .route("/dashboard/commissions/referral", post(actions::generate_referral))
        .route("/dashboard/jamaah", get(pages::jamaah_page))
        .route("/dashboard/users", get(pages::users_page))
        .route("/dashboard/profile", put(actions::update_profile))
        .route("/dashboard/support", get(support::conversations_page))
        .route("/dashboard/support/{room_id}", get(support::conversation_page))
        .route("/dashboard/support/{room_id}/messages", post(support::send_message))
        .route("/dashboard/blog", get(pages::blog_page).post(actions::create_post))
        .route(
            "/dashboard/gallery",
            get(pages::gallery_page).post(actions::upload_gallery_item),
        )
        .route("/dashboard/finance", get(pages::finance_page))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(axum_middleware::from_fn(route_guard))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
