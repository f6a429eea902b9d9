use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Content lifecycle ---

/// ContentStatus
///
/// The closed set of lifecycle states for soft-deletable content (pages and
/// blog posts). Stored as the `content_status` Postgres enum and serialized
/// lowercase on the wire. `deleted_at` is set iff the status is `Deleted`;
/// the transitions that uphold that live in the repository layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, sqlx::Type, Default,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "content_status", rename_all = "lowercase")]
#[ts(export)]
pub enum ContentStatus {
    /// Initial state on create; visible to admins only.
    #[default]
    Draft,
    /// Published; the only state public read paths return.
    Live,
    /// Soft-deleted; listed in the trash until restored or purged.
    Deleted,
}

/// AdminSession
///
/// One row per issued admin token. A session is valid iff `active` is true
/// AND it is younger than the configured timeout. Expiry is lazy: it is
/// detected (and written back) on the next verification, never swept.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminSession {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

// --- Pages ---

/// Page
///
/// A dynamic CMS page. Public listings only ever see `status = live`; the
/// admin default listing hides `deleted`, and the trash shows only `deleted`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: ContentStatus,
    #[serde(rename = "heroImage")]
    pub hero_image: Option<String>,
    #[serde(rename = "metaTitle")]
    pub meta_title: Option<String>,
    #[serde(rename = "metaDescription")]
    pub meta_description: Option<String>,
    /// Maps SQL column "page_order"; `order` alone is reserved in SQL.
    #[sqlx(rename = "page_order")]
    pub order: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// PageCreate
///
/// Input payload for creating or fully updating a page. Updates replace all
/// of these fields and refresh `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct PageCreate {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: ContentStatus,
    #[serde(rename = "heroImage")]
    pub hero_image: Option<String>,
    #[serde(rename = "metaTitle")]
    pub meta_title: Option<String>,
    #[serde(rename = "metaDescription")]
    pub meta_description: Option<String>,
}

impl Page {
    /// Builds a fresh page from the create payload. New pages keep whatever
    /// status the caller chose (defaulting to draft) and start outside the
    /// trash.
    pub fn new(req: PageCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: req.title,
            slug: req.slug,
            content: req.content,
            status: req.status,
            hero_image: req.hero_image,
            meta_title: req.meta_title,
            meta_description: req.meta_description,
            order: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

// --- Blog ---

/// BlogPost
///
/// A blog entry; shares the page soft-delete lifecycle. `publish_date` is the
/// admin-facing sort key and defaults to the creation time.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image_url: Option<String>,
    pub status: ContentStatus,
    #[ts(type = "string")]
    pub publish_date: DateTime<Utc>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// BlogPostCreate
///
/// Input payload for creating or updating a blog post. `publish_date` is an
/// optional RFC 3339 string; an unparseable value is a validation error, an
/// absent one means "now" on create and "keep" on update.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct BlogPostCreate {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image_url: Option<String>,
    pub status: ContentStatus,
    pub publish_date: Option<String>,
}

impl BlogPost {
    pub fn new(req: BlogPostCreate, publish_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: req.title,
            excerpt: req.excerpt,
            content: req.content,
            category: req.category,
            image_url: req.image_url,
            status: req.status,
            publish_date,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

// --- Gallery ---

/// GalleryImage
///
/// A gallery entry referencing an externally hosted image. No soft-delete
/// lifecycle: gallery deletes are immediate and permanent.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct GalleryImage {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub title: String,
    pub alt: String,
    pub caption: String,
    pub tags: Vec<String>,
    pub featured: bool,
    #[serde(rename = "externalLink")]
    pub external_link: Option<String>,
    #[sqlx(rename = "image_order")]
    pub order: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl GalleryImage {
    pub fn new(url: String, title: String, alt: String, tags: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            filename: String::new(),
            title,
            alt,
            caption: String::new(),
            tags,
            featured: false,
            external_link: None,
            order: 0,
            created_at: Utc::now(),
        }
    }
}

/// GalleryImageUpdate
///
/// Partial update for a gallery image; only `Some` fields are written.
/// `featured = true` additionally clears the flag on every other image, so at
/// most one image is featured at a time.
#[derive(Debug, Clone, Default)]
pub struct GalleryImageUpdate {
    pub title: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub external_link: Option<String>,
}

// --- News ---

/// NewsItem
///
/// A landing-page announcement. Public delivery is restricted to `live` items
/// inside their optional `start_date`/`end_date` window.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub link_type: String,
    pub status: ContentStatus,
    #[sqlx(rename = "news_order")]
    pub order: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// NewsItemCreate
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(default)]
#[ts(export)]
pub struct NewsItemCreate {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub link_type: String,
    pub status: ContentStatus,
    pub order: i32,
}

impl Default for NewsItemCreate {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: None,
            image_url: String::new(),
            link_url: None,
            link_type: "internal".to_string(),
            status: ContentStatus::Draft,
            order: 0,
        }
    }
}

impl NewsItem {
    pub fn new(req: NewsItemCreate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: req.title,
            subtitle: req.subtitle,
            image_url: req.image_url,
            link_url: req.link_url,
            link_type: req.link_type,
            status: req.status,
            order: req.order,
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
        }
    }
}

// --- Contacts ---

/// ContactSubmission
///
/// A stored contact-form message. `status` starts as "neu" and is advanced by
/// admins; the unread counter on the dashboard counts "neu" rows.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub thema: String,
    pub nachricht: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

/// ContactFormInput
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ContactFormInput {
    pub name: Option<String>,
    pub email: String,
    pub thema: String,
    pub nachricht: String,
}

impl ContactSubmission {
    pub fn new(form: ContactFormInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: form.name,
            email: form.email,
            thema: form.thema,
            nachricht: form.nachricht,
            timestamp: Utc::now(),
            status: "neu".to_string(),
        }
    }
}

// --- Admin auth payloads ---

/// AdminLogin
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminLogin {
    pub password: String,
}

/// LoginResponse
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

// --- Dashboard ---

/// DashboardStats
///
/// Aggregate counters for the admin dashboard (GET /api/admin/stats).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq, Eq)]
#[ts(export)]
pub struct DashboardStats {
    pub total_contacts: i64,
    pub unread_contacts: i64,
    pub total_pages: i64,
    pub total_gallery: i64,
    pub total_posts: i64,
    pub donations_count: i64,
}

/// TrashCounts
///
/// Per-collection counts returned by the batch trash operations (purge by
/// retention age, empty by scope).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, Default, PartialEq, Eq)]
#[ts(export)]
pub struct TrashCounts {
    pub deleted_pages: u64,
    pub deleted_posts: u64,
}

// --- Site settings ---

/// SiteSettings
///
/// The site-wide display settings singleton. Every field has a compiled-in
/// default so a fresh database serves a working site; saved documents replace
/// the defaults for whichever fields they carry.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct SiteSettings {
    pub site_title: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_description: String,
    pub font_family: String,
    pub primary_color: String,
    pub light_background: String,
    pub dark_background: String,
    pub logo_text: String,
    pub logo_image: Option<String>,
    pub default_theme: String,
    pub paypal_link: String,
    pub donation_text: String,
    pub donation_disclaimer: String,
    pub ga4_tag: Option<String>,
    pub meta_description: String,
    pub auto_reply_message: String,
    #[ts(type = "unknown[]")]
    #[schema(value_type = Vec<Object>)]
    pub nav_items: Vec<Value>,
    pub footer_text: String,
    #[ts(type = "unknown[]")]
    #[schema(value_type = Vec<Object>)]
    pub footer_links: Vec<Value>,
    pub footer_email: String,
    #[ts(type = "unknown[]")]
    #[schema(value_type = Vec<Object>)]
    pub social_links: Vec<Value>,
    pub social_facebook: String,
    pub social_email: String,
    #[ts(type = "unknown[]")]
    #[schema(value_type = Vec<Object>)]
    pub teaser_cards: Vec<Value>,
    pub cta_title: String,
    pub cta_description: String,
    pub cta_button_text: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_title: "gltz.de – Twins-Projekt".to_string(),
            hero_title: "gltz.de".to_string(),
            hero_subtitle: "Unsere Reise mit Zwillingen".to_string(),
            hero_description: "Anonyme Tipps für junge Familien vom Niederrhein.".to_string(),
            font_family: "Inter".to_string(),
            primary_color: "#1d1d1f".to_string(),
            light_background: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=1920"
                .to_string(),
            dark_background: "https://images.unsplash.com/photo-1516572704891-60b47497c7b5?w=1920"
                .to_string(),
            logo_text: "gltz.de".to_string(),
            logo_image: None,
            default_theme: "light".to_string(),
            paypal_link: "https://paypal.me/gltzfamily".to_string(),
            donation_text: "Projekt unterstützen".to_string(),
            donation_disclaimer: "Dies ist keine Spende im steuerlichen Sinne. Es erfolgt keine \
                                  Gegenleistung. 100% freiwillige Unterstützung für unser \
                                  Familienprojekt."
                .to_string(),
            ga4_tag: None,
            meta_description: "Zwillings-Tipps für junge Familien".to_string(),
            auto_reply_message: "Danke für deine Nachricht – wir melden uns in 24h!".to_string(),
            nav_items: vec![
                json!({"id": "1", "label": "Home", "path": "/", "enabled": true, "children": []}),
                json!({"id": "2", "label": "Über uns", "path": "/ueber-uns", "enabled": true, "children": []}),
                json!({"id": "3", "label": "Schwangerschaft", "path": "/schwangerschaft", "enabled": true, "children": []}),
                json!({"id": "4", "label": "Baby-Alltag", "path": "/baby-alltag", "enabled": true, "children": []}),
                json!({"id": "5", "label": "Tipps", "path": "/tipps", "enabled": true, "children": []}),
                json!({"id": "6", "label": "Reisen", "path": "/reisen", "enabled": true, "children": []}),
                json!({"id": "7", "label": "Blog", "path": "/blog", "enabled": true, "children": []}),
                json!({"id": "8", "label": "Suchen", "path": "/suchen", "enabled": true, "children": []}),
                json!({"id": "9", "label": "M&O Portfolio", "path": "/mo-portfolio", "enabled": true, "children": [
                    {"id": "9-1", "label": "Twins-Art", "path": "/twins-art", "enabled": true}
                ]}),
                json!({"id": "10", "label": "Spende", "path": "/spende", "enabled": true, "children": []}),
                json!({"id": "11", "label": "Kontakt", "path": "/kontakt", "enabled": true, "children": []}),
            ],
            footer_text: "Unsere Reise mit Zwillingen. Anonyme Tipps für junge Familien."
                .to_string(),
            footer_links: vec![],
            footer_email: "gltz.de@gmail.com".to_string(),
            social_links: vec![
                json!({"id": "1", "platform": "facebook", "url": "", "enabled": true}),
                json!({"id": "2", "platform": "instagram", "url": "", "enabled": false}),
                json!({"id": "3", "platform": "youtube", "url": "", "enabled": false}),
                json!({"id": "4", "platform": "tiktok", "url": "", "enabled": false}),
                json!({"id": "5", "platform": "twitter", "url": "", "enabled": false}),
            ],
            social_facebook: String::new(),
            social_email: "gltz.de@gmail.com".to_string(),
            teaser_cards: vec![],
            cta_title: "Projekt unterstützen".to_string(),
            cta_description: "Die Kunst bringt Freude, Einnahmen bleiben 100% in der Familie."
                .to_string(),
            cta_button_text: "Unterstützen".to_string(),
        }
    }
}

// --- Legal content singletons ---

/// ImpressumContent
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(default)]
#[ts(export)]
pub struct ImpressumContent {
    pub provider_name: String,
    pub provider_street: String,
    pub provider_city: String,
    pub provider_country: String,
    pub provider_phone: String,
    pub provider_email: String,
    pub responsible_name: String,
    pub responsible_address: String,
    pub liability_content: String,
    pub liability_links: String,
    pub copyright_text: String,
    pub dispute_text: String,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl Default for ImpressumContent {
    fn default() -> Self {
        Self {
            provider_name: "Familie Gltz".to_string(),
            provider_street: "Musterstraße 1".to_string(),
            provider_city: "47829 Krefeld".to_string(),
            provider_country: "Deutschland".to_string(),
            provider_phone: String::new(),
            provider_email: "gltz.de@gmail.com".to_string(),
            responsible_name: "Familie Gltz".to_string(),
            responsible_address: "Musterstraße 1, 47829 Krefeld".to_string(),
            liability_content: "Die Inhalte unserer Seiten wurden mit größter Sorgfalt erstellt. \
                                Für die Richtigkeit, Vollständigkeit und Aktualität der Inhalte \
                                können wir jedoch keine Gewähr übernehmen."
                .to_string(),
            liability_links: "Unser Angebot enthält Links zu externen Webseiten Dritter, auf \
                              deren Inhalte wir keinen Einfluss haben."
                .to_string(),
            copyright_text: "Die durch die Seitenbetreiber erstellten Inhalte und Werke auf \
                             diesen Seiten unterliegen dem deutschen Urheberrecht."
                .to_string(),
            dispute_text: "Wir sind nicht bereit oder verpflichtet, an \
                           Streitbeilegungsverfahren vor einer \
                           Verbraucherschlichtungsstelle teilzunehmen."
                .to_string(),
            updated_at: Utc::now(),
        }
    }
}

/// DatenschutzContent
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(default)]
#[ts(export)]
pub struct DatenschutzContent {
    pub responsible_name: String,
    pub responsible_address: String,
    pub responsible_email: String,
    pub intro_text: String,
    pub contact_form_text: String,
    pub contact_form_purpose: String,
    pub cookies_text: String,
    pub hosting_text: String,
    pub rights_text: String,
    pub paypal_text: String,
    pub last_updated: String,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl Default for DatenschutzContent {
    fn default() -> Self {
        Self {
            responsible_name: "Familie Gltz".to_string(),
            responsible_address: "Musterstraße 1, 47829 Krefeld".to_string(),
            responsible_email: "gltz.de@gmail.com".to_string(),
            intro_text: "Der Schutz deiner persönlichen Daten ist uns wichtig. Diese \
                         Datenschutzerklärung informiert dich darüber, welche Daten wir erheben \
                         und wie wir sie verwenden."
                .to_string(),
            contact_form_text: "Wenn du uns über das Kontaktformular kontaktierst, werden Name, \
                                E-Mail, Thema und Nachricht erhoben."
                .to_string(),
            contact_form_purpose: "Zweck: Bearbeitung deiner Anfrage. Rechtsgrundlage: Art. 6 \
                                   Abs. 1 lit. b DSGVO. Speicherdauer: bis zur Erledigung, \
                                   maximal 2 Jahre."
                .to_string(),
            cookies_text: "Wir verwenden nur technisch notwendige Cookies für den Betrieb \
                           dieser Website (z.B. für Dark/Light Mode Einstellungen)."
                .to_string(),
            hosting_text: "Diese Website wird bei einem externen Dienstleister gehostet. Die \
                           Verarbeitung erfolgt auf Grundlage unserer berechtigten Interessen."
                .to_string(),
            rights_text: "Du hast jederzeit das Recht auf Auskunft, Berichtigung, Löschung, \
                          Einschränkung, Datenübertragbarkeit und Widerspruch."
                .to_string(),
            paypal_text: "Wenn du unser Projekt über PayPal unterstützt, erfolgt die \
                          Datenverarbeitung durch PayPal gemäß deren Datenschutzbestimmungen."
                .to_string(),
            last_updated: "Dezember 2025".to_string(),
            updated_at: Utc::now(),
        }
    }
}

/// CookiesContent
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(default)]
#[ts(export)]
pub struct CookiesContent {
    pub intro_text: String,
    pub what_are_cookies: String,
    pub types_essential: String,
    pub types_functional: String,
    pub types_analytics: String,
    pub types_marketing: String,
    pub our_cookies: String,
    pub manage_cookies: String,
    pub browser_settings: String,
    pub contact_email: String,
    pub last_updated: String,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl Default for CookiesContent {
    fn default() -> Self {
        Self {
            intro_text: "Diese Website verwendet Cookies, um dir die bestmögliche \
                         Nutzererfahrung zu bieten."
                .to_string(),
            what_are_cookies: "Cookies sind kleine Textdateien, die auf deinem Gerät \
                               gespeichert werden, wenn du eine Website besuchst."
                .to_string(),
            types_essential: "Technisch notwendige Cookies sind für den Betrieb der Website \
                              erforderlich."
                .to_string(),
            types_functional: "Funktionale Cookies ermöglichen es der Website, sich an deine \
                               Einstellungen zu erinnern, z.B. die Theme-Einstellung."
                .to_string(),
            types_analytics: "Analyse-Cookies helfen uns zu verstehen, wie Besucher mit der \
                              Website interagieren. Wir verwenden derzeit KEINE Analyse-Cookies."
                .to_string(),
            types_marketing: "Wir verwenden KEINE Marketing- oder Werbe-Cookies.".to_string(),
            our_cookies: "Wir verwenden ausschließlich technisch notwendige und funktionale \
                          Cookies: cookie-consent und theme."
                .to_string(),
            manage_cookies: "Du kannst Cookies in deinem Browser jederzeit löschen oder \
                             blockieren."
                .to_string(),
            browser_settings: "In den Einstellungen deines Browsers kannst du Cookies \
                               verwalten: Chrome, Firefox, Safari und Edge bieten dazu eigene \
                               Datenschutz-Bereiche."
                .to_string(),
            contact_email: "gltz.de@gmail.com".to_string(),
            last_updated: "Januar 2025".to_string(),
            updated_at: Utc::now(),
        }
    }
}

// --- Landing page ---

/// LandingContent
///
/// The customizable landing page singleton; served with defaults until an
/// admin saves a document.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(default)]
#[ts(export)]
pub struct LandingContent {
    pub hero_enabled: bool,
    pub hero_label: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_description: String,
    pub hero_cta_text: String,
    pub hero_cta_link: String,
    pub hero_secondary_cta_text: String,
    pub hero_secondary_cta_link: String,
    pub hero_background_type: String,
    pub hero_background_url: String,
    pub hero_video_autoplay: bool,
    pub hero_video_loop: bool,
    pub hero_video_muted: bool,
    pub features_enabled: bool,
    pub features_title: String,
    #[ts(type = "unknown[]")]
    #[schema(value_type = Vec<Object>)]
    pub features_items: Vec<Value>,
    pub news_enabled: bool,
    pub news_title: String,
    pub news_autoplay_interval: i32,
    pub categories_enabled: bool,
    pub categories_title: String,
    pub blog_enabled: bool,
    pub blog_title: String,
    pub blog_subtitle: String,
    pub blog_max_posts: i32,
    pub cta_enabled: bool,
    pub cta_title: String,
    pub cta_description: String,
    pub cta_button_text: String,
    pub cta_button_link: String,
    #[ts(type = "unknown[]")]
    #[schema(value_type = Vec<Object>)]
    pub custom_sections: Vec<Value>,
}

impl Default for LandingContent {
    fn default() -> Self {
        Self {
            hero_enabled: true,
            hero_label: "Willkommen bei unserer Familie".to_string(),
            hero_title: "Das Zwillings-Abenteuer".to_string(),
            hero_subtitle: "Ehrliche Einblicke in unser Leben mit zwei Babys".to_string(),
            hero_description: "Wir teilen unsere Erfahrungen, Tipps und die kleinen Kunstwerke \
                               unserer Zwillinge M & O."
                .to_string(),
            hero_cta_text: "Unsere Geschichte".to_string(),
            hero_cta_link: "/ueber-uns".to_string(),
            hero_secondary_cta_text: String::new(),
            hero_secondary_cta_link: String::new(),
            hero_background_type: "none".to_string(),
            hero_background_url: String::new(),
            hero_video_autoplay: true,
            hero_video_loop: true,
            hero_video_muted: true,
            features_enabled: true,
            features_title: "Was dich hier erwartet".to_string(),
            features_items: vec![],
            news_enabled: true,
            news_title: "Aktuelles".to_string(),
            news_autoplay_interval: 10,
            categories_enabled: true,
            categories_title: "Entdecken".to_string(),
            blog_enabled: true,
            blog_title: "Aus dem Blog".to_string(),
            blog_subtitle: "Aktuelle Beiträge und Erfahrungen".to_string(),
            blog_max_posts: 4,
            cta_enabled: true,
            cta_title: "Möchtest du uns unterstützen?".to_string(),
            cta_description: "Mit deiner Hilfe können wir dieses Projekt weiterführen."
                .to_string(),
            cta_button_text: "Unterstützen".to_string(),
            cta_button_link: "/spende".to_string(),
            custom_sections: vec![],
        }
    }
}

// --- Static pages ---

/// StaticPageContent
///
/// Editable content for the fixed site sections (Schwangerschaft, Baby-Alltag,
/// Tipps, ...). Each known `page_id` has compiled-in defaults; a stored
/// document replaces its defaults wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(default)]
#[ts(export)]
pub struct StaticPageContent {
    pub page_id: String,
    pub title: String,
    pub path: String,
    pub hero_label: String,
    pub hero_title: String,
    pub hero_description: String,
    pub hero_image: String,
    #[ts(type = "unknown[]")]
    #[schema(value_type = Vec<Object>)]
    pub sections: Vec<Value>,
    pub cta_title: String,
    pub cta_description: String,
    pub cta_link: String,
    pub cta_link_text: String,
}

impl StaticPageContent {
    #[allow(clippy::too_many_arguments)]
    fn preset(
        page_id: &str,
        title: &str,
        hero_label: &str,
        hero_title: &str,
        hero_description: &str,
        sections: Vec<Value>,
        cta_link: &str,
        cta_link_text: &str,
    ) -> Self {
        Self {
            page_id: page_id.to_string(),
            title: title.to_string(),
            path: format!("/{page_id}"),
            hero_label: hero_label.to_string(),
            hero_title: hero_title.to_string(),
            hero_description: hero_description.to_string(),
            hero_image: String::new(),
            sections,
            cta_title: String::new(),
            cta_description: String::new(),
            cta_link: cta_link.to_string(),
            cta_link_text: cta_link_text.to_string(),
        }
    }

    /// The compiled-in content for every known static page, in display order.
    pub fn defaults() -> Vec<StaticPageContent> {
        vec![
            Self::preset(
                "schwangerschaft",
                "Schwangerschaft",
                "Schwangerschaft",
                "Zwillings-Schwangerschaft",
                "Eine Zwillingsschwangerschaft ist besonders, in jeder Hinsicht. Hier teilen \
                 wir unsere Erfahrungen und geben Tipps für jedes Trimester.",
                vec![
                    json!({"id": "1", "title": "1. Trimester (1-12 Woche)", "subtitle": "Der aufregende Anfang",
                           "items": ["Frühe Ultraschalle zur Bestätigung der Zwillinge", "Häufigere Arzttermine", "Wichtig: Folsäure und ausreichend Ruhe"]}),
                    json!({"id": "2", "title": "2. Trimester (13-26 Woche)", "subtitle": "Die goldene Phase",
                           "items": ["Mehr Energie, weniger Übelkeit", "Erste Kindsbewegungen spürbar"]}),
                    json!({"id": "3", "title": "3. Trimester (27-40 Woche)", "subtitle": "Der Endspurt",
                           "items": ["Wöchentliche CTG-Kontrollen", "Zwillinge kommen oft früher (ca. 37. Woche)"]}),
                ],
                "/baby-alltag",
                "Weiter zum Baby-Alltag",
            ),
            Self::preset(
                "baby-alltag",
                "Baby-Alltag",
                "Baby-Alltag",
                "Leben mit Zwillingen",
                "Der Alltag mit zwei Babys ist intensiv, aber auch wunderschön. Hier zeigen \
                 wir, wie wir unseren Tag strukturieren.",
                vec![
                    json!({"id": "1", "title": "06:00 - Aufwachen", "description": "Erste Flasche und Wickeln"}),
                    json!({"id": "2", "title": "08:00 - Frühstück", "description": "Frühstück und Spielzeit"}),
                    json!({"id": "3", "title": "10:00 - Schläfchen", "description": "Vormittags-Schläfchen"}),
                ],
                "/tipps",
                "Zu unseren Tipps",
            ),
            Self::preset(
                "tipps",
                "Tipps & Tricks",
                "Tipps & Tricks",
                "Praktische Tipps für Zwillingseltern",
                "Gesammelte Ratschläge aus unserem Alltag mit Zwillingen.",
                vec![],
                "/kontakt",
                "Fragen? Kontaktiere uns",
            ),
            Self::preset(
                "reisen",
                "Reisen",
                "Reisen",
                "Reisen mit Zwillingen",
                "Unterwegs mit zwei Babys: unsere Erfahrungen und Tipps für stressfreie \
                 Ausflüge und Reisen.",
                vec![],
                "/kontakt",
                "Eure Reise-Tipps teilen",
            ),
            Self::preset(
                "ueber-uns",
                "Über uns",
                "Über uns",
                "Unsere Geschichte",
                "Wir sind eine junge Familie vom Niederrhein mit Zwillingen. Hier teilen wir \
                 unsere Erfahrungen.",
                vec![],
                "/kontakt",
                "Schreib uns",
            ),
            Self::preset(
                "spende",
                "Spende",
                "Unterstützung",
                "Projekt unterstützen",
                "Mit deiner Unterstützung hilfst du uns, dieses Projekt weiterzuführen.",
                vec![],
                "https://paypal.me/gltzfamily",
                "Via PayPal unterstützen",
            ),
            Self::preset(
                "suchen",
                "Suche",
                "Suche",
                "Inhalte durchsuchen",
                "Finde schnell, was du suchst.",
                vec![],
                "",
                "",
            ),
        ]
    }
}

// --- Search ---

/// StaticPageHit
///
/// The reduced shape in which static pages appear in search results.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StaticPageHit {
    pub page_id: String,
    pub title: String,
    pub description: String,
    pub path: String,
}

/// SearchResults
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SearchResults {
    pub pages: Vec<Page>,
    pub posts: Vec<BlogPost>,
    pub gallery: Vec<GalleryImage>,
    pub static_pages: Vec<StaticPageHit>,
}
