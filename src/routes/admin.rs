use crate::{AppState, admin_guard, handlers};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

/// Admin Router Module
///
/// Defines the routes under `/admin`. The session endpoints (login, verify,
/// logout, change-password) manage tokens themselves and stay open; every
/// other route sits behind the session-token guard.
///
/// Access Control:
/// The protected sub-router is wrapped in `route_layer` with the token guard,
/// so a missing or expired token is rejected before any handler runs. The
/// session endpoints are merged in afterwards and bypass the layer.
pub fn admin_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        // Pages: the soft-delete lifecycle lives here (trash listing,
        // restore, duplicate, permanent delete via ?permanent=true).
        .route(
            "/pages",
            get(handlers::pages::get_admin_pages).post(handlers::pages::create_page),
        )
        .route("/pages/trash", get(handlers::pages::get_trashed_pages))
        .route("/pages/init-defaults", post(handlers::pages::init_default_pages))
        .route(
            "/pages/{id}",
            put(handlers::pages::update_page).delete(handlers::pages::delete_page),
        )
        .route("/pages/{id}/restore", post(handlers::pages::restore_page))
        .route("/pages/{id}/duplicate", post(handlers::pages::duplicate_page))
        // Blog posts: same lifecycle as pages, but deletes and restores
        // report success regardless of whether the id exists.
        .route(
            "/posts",
            get(handlers::blog::get_admin_posts).post(handlers::blog::create_post),
        )
        .route("/posts/trash", get(handlers::blog::get_trashed_posts))
        .route(
            "/posts/{id}",
            put(handlers::blog::update_post).delete(handlers::blog::delete_post),
        )
        .route("/posts/{id}/restore", post(handlers::blog::restore_post))
        // Gallery: add/update go through query parameters, deletes are
        // permanent (no trash).
        .route(
            "/gallery",
            get(handlers::gallery::get_admin_gallery).post(handlers::gallery::add_gallery_image),
        )
        .route(
            "/gallery/{id}",
            put(handlers::gallery::update_gallery_image)
                .delete(handlers::gallery::delete_gallery_image),
        )
        // News banners
        .route(
            "/news",
            get(handlers::news::get_admin_news).post(handlers::news::create_news),
        )
        .route(
            "/news/{id}",
            put(handlers::news::update_news).delete(handlers::news::delete_news),
        )
        // Contact submissions
        .route("/contacts", get(handlers::contacts::get_all_contacts))
        .route("/contacts/export", get(handlers::contacts::export_contacts))
        .route(
            "/contacts/{id}/status",
            put(handlers::contacts::update_contact_status),
        )
        // Content singletons and static pages
        .route(
            "/page-content/impressum",
            get(handlers::content::get_admin_impressum).put(handlers::content::update_impressum),
        )
        .route(
            "/page-content/datenschutz",
            get(handlers::content::get_admin_datenschutz)
                .put(handlers::content::update_datenschutz),
        )
        .route(
            "/page-content/cookies",
            get(handlers::content::get_admin_cookies).put(handlers::content::update_cookies),
        )
        .route(
            "/landing-content",
            get(handlers::content::get_admin_landing_content)
                .put(handlers::content::update_landing_content),
        )
        .route("/static-pages", get(handlers::content::get_all_static_pages))
        .route(
            "/static-pages/{page_id}",
            get(handlers::content::get_admin_static_page)
                .put(handlers::content::update_static_page),
        )
        // Dashboard and trash maintenance
        .route("/stats", get(handlers::admin::get_dashboard_stats))
        .route(
            "/donations/increment",
            post(handlers::admin::increment_donations),
        )
        .route("/trash/cleanup", post(handlers::admin::cleanup_trash))
        .route("/trash/empty", post(handlers::admin::empty_trash))
        .route_layer(middleware::from_fn_with_state(state, admin_guard));

    Router::new()
        // Session endpoints; these authenticate themselves.
        .route("/login", post(handlers::admin::admin_login))
        .route("/verify", get(handlers::admin::verify_admin))
        .route("/logout", post(handlers::admin::admin_logout))
        .route("/change-password", post(handlers::admin::change_password))
        .merge(protected)
}
