use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::Next,
    response::Response,
    routing::get,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

// Module for routing segregation (Public vs Admin).
pub mod routes;
use auth::AdminToken; // The validated admin session token.
use routes::{admin, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry
// point (main.rs) and the integration tests.
pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use repository::{MemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application by aggregating every `#[utoipa::path]` handler and every
/// `ToSchema` model. The resulting JSON is served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::pages::get_public_pages, handlers::pages::get_page_by_slug,
        handlers::pages::get_admin_pages, handlers::pages::create_page,
        handlers::pages::update_page, handlers::pages::delete_page,
        handlers::pages::restore_page, handlers::pages::get_trashed_pages,
        handlers::pages::duplicate_page, handlers::pages::init_default_pages,
        handlers::blog::get_public_blog, handlers::blog::get_blog_post,
        handlers::blog::get_admin_posts, handlers::blog::create_post,
        handlers::blog::update_post, handlers::blog::delete_post,
        handlers::blog::restore_post, handlers::blog::get_trashed_posts,
        handlers::gallery::get_public_gallery, handlers::gallery::get_admin_gallery,
        handlers::gallery::add_gallery_image, handlers::gallery::update_gallery_image,
        handlers::gallery::delete_gallery_image,
        handlers::news::get_public_news, handlers::news::get_admin_news,
        handlers::news::create_news, handlers::news::update_news,
        handlers::news::delete_news,
        handlers::contacts::submit_contact_form, handlers::contacts::get_all_contacts,
        handlers::contacts::update_contact_status, handlers::contacts::export_contacts,
        handlers::admin::admin_login, handlers::admin::verify_admin,
        handlers::admin::admin_logout, handlers::admin::change_password,
        handlers::admin::get_dashboard_stats, handlers::admin::increment_donations,
        handlers::admin::cleanup_trash, handlers::admin::empty_trash,
        handlers::content::get_site_settings, handlers::content::save_site_settings,
        handlers::content::get_impressum, handlers::content::get_admin_impressum,
        handlers::content::update_impressum,
        handlers::content::get_datenschutz, handlers::content::get_admin_datenschutz,
        handlers::content::update_datenschutz,
        handlers::content::get_cookies, handlers::content::get_admin_cookies,
        handlers::content::update_cookies,
        handlers::content::get_landing_content, handlers::content::get_admin_landing_content,
        handlers::content::update_landing_content,
        handlers::content::get_static_page, handlers::content::get_all_static_pages,
        handlers::content::get_admin_static_page, handlers::content::update_static_page,
        handlers::search::search_content, handlers::search::seed_data,
        handlers::search::root, handlers::search::health,
    ),
    components(
        schemas(
            models::ContentStatus, models::Page, models::PageCreate,
            models::BlogPost, models::BlogPostCreate,
            models::GalleryImage, models::NewsItem, models::NewsItemCreate,
            models::ContactSubmission, models::ContactFormInput,
            models::AdminLogin, models::LoginResponse,
            models::DashboardStats, models::TrashCounts,
            models::SiteSettings, models::ImpressumContent, models::DatenschutzContent,
            models::CookiesContent, models::LandingContent,
            models::StaticPageContent, models::StaticPageHit, models::SearchResults,
        )
    ),
    tags(
        (name = "gltz-api", description = "gltz.de family website API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container holding all application services and
/// configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: abstracts database access.
    pub repo: RepositoryState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These let extractors pull individual components out of the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// admin_guard
///
/// Middleware that enforces a valid admin session for the protected admin
/// routes.
///
/// *Mechanism*: It attempts to extract `AdminToken` from the request. Since
/// `AdminToken` implements `FromRequestParts`, a missing, unknown or expired
/// token rejects the request with 401 before the handler runs. On success the
/// request proceeds unchanged.
pub async fn admin_guard(_token: AdminToken, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's routing structure, applies global and scoped
/// middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Liveness probe, outside the /api prefix so load balancers can hit
        // it directly.
        .route("/health", get(handlers::search::health))
        // Public Routes under /api: no middleware applied. `nest` answers at
        // "/api" but not "/api/", so the banner is also wired at the
        // trailing-slash form.
        .route("/api/", get(handlers::search::root))
        .nest("/api", public::public_routes())
        // Admin Routes under /api/admin. The session endpoints are open; the
        // rest is wrapped in the token guard inside `admin_routes`.
        .nest("/api/admin", admin::admin_routes(state.clone()))
        // Apply the unified state to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID generation: a unique UUID per incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request tracing: wraps the request/response lifecycle in
                // a span carrying the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID propagation: returns the x-request-id header
                // to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes the `TraceLayer` span: includes the `x-request-id` header (if
/// present) alongside the HTTP method and URI, so every log line for one
/// request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
