use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any
/// client. These serve the rendered website: live pages, the blog, the
/// gallery, news banners, the settings and content singletons, search, and
/// the contact form.
///
/// Visibility mandate: every listing handler routed here must restrict
/// itself to `live` content at the repository level. Drafts and trashed rows
/// never leave the admin surface.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // API banner, mostly useful as a smoke check when pointing a browser
        // at the backend.
        .route("/", get(handlers::search::root))
        // GET /pages            — live pages sorted by order
        // GET /pages/{slug}     — one live page, 404 otherwise
        .route("/pages", get(handlers::pages::get_public_pages))
        .route("/pages/{slug}", get(handlers::pages::get_page_by_slug))
        // GET /blog?limit=      — newest live posts, default limit 10
        // GET /blog/{id}        — one live post
        .route("/blog", get(handlers::blog::get_public_blog))
        .route("/blog/{id}", get(handlers::blog::get_blog_post))
        // GET /gallery
        // The gallery has no draft state; everything is public.
        .route("/gallery", get(handlers::gallery::get_public_gallery))
        // GET /news
        // Live items inside their display window only.
        .route("/news", get(handlers::news::get_public_news))
        // POST /contact
        // Contact-form intake; the only public write besides /settings.
        .route("/contact", post(handlers::contacts::submit_contact_form))
        // GET+POST /settings
        // The display-settings singleton. The POST is intentionally open, it
        // only carries public display configuration.
        .route(
            "/settings",
            get(handlers::content::get_site_settings)
                .post(handlers::content::save_site_settings),
        )
        // GET /page-content/* — legal text singletons with compiled-in defaults
        .route(
            "/page-content/impressum",
            get(handlers::content::get_impressum),
        )
        .route(
            "/page-content/datenschutz",
            get(handlers::content::get_datenschutz),
        )
        .route("/page-content/cookies", get(handlers::content::get_cookies))
        // GET /landing-content
        .route(
            "/landing-content",
            get(handlers::content::get_landing_content),
        )
        // GET /static-pages/{page_id}
        .route(
            "/static-pages/{page_id}",
            get(handlers::content::get_static_page),
        )
        // GET /search?q=
        // Cross-collection substring search over live content.
        .route("/search", get(handlers::search::search_content))
        // POST /seed
        // Starter content for fresh deployments; refuses to touch collections
        // that already hold rows.
        .route("/seed", post(handlers::search::seed_data))
}
