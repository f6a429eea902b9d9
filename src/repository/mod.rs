use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{
    AdminSession, BlogPost, BlogPostCreate, ContactSubmission, DashboardStats, GalleryImage,
    GalleryImageUpdate, NewsItem, NewsItemCreate, Page, PageCreate, TrashCounts,
};

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;

/// Repository Trait
///
/// The abstract contract for all persistence operations, letting handlers work
/// against Postgres in production and `MemoryRepository` in tests without
/// change. Every method surfaces storage failures as `ApiError::Database`;
/// nothing here retries.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Admin sessions ---
    async fn insert_session(&self, session: AdminSession) -> ApiResult<()>;
    async fn find_session(&self, token: &str) -> ApiResult<Option<AdminSession>>;
    // Idempotent; unknown tokens are a no-op.
    async fn deactivate_session(&self, token: &str) -> ApiResult<()>;

    // --- Pages ---
    // Public listing: live only, sorted by display order.
    async fn live_pages(&self) -> ApiResult<Vec<Page>>;
    async fn find_live_page_by_slug(&self, slug: &str) -> ApiResult<Option<Page>>;
    // Any status; used for slug-existence checks when seeding defaults.
    async fn find_page_by_slug(&self, slug: &str) -> ApiResult<Option<Page>>;
    // Admin listing: hides trashed rows unless `include_deleted`.
    async fn admin_pages(&self, include_deleted: bool) -> ApiResult<Vec<Page>>;
    async fn find_page(&self, id: Uuid) -> ApiResult<Option<Page>>;
    async fn insert_page(&self, page: Page) -> ApiResult<()>;
    // Full replacement of the editable fields; refreshes `updated_at`.
    async fn update_page(&self, id: Uuid, req: PageCreate) -> ApiResult<Option<Page>>;
    // Trash transition: status = deleted, deleted_at = now. Repeat calls
    // refresh `deleted_at`.
    async fn soft_delete_page(&self, id: Uuid, now: DateTime<Utc>) -> ApiResult<bool>;
    // Forces status = draft and clears deleted_at, whatever the prior state.
    async fn restore_page(&self, id: Uuid) -> ApiResult<bool>;
    async fn delete_page(&self, id: Uuid) -> ApiResult<bool>;
    async fn trashed_pages(&self) -> ApiResult<Vec<Page>>;

    // --- Blog posts ---
    async fn live_posts(&self, limit: Option<i64>) -> ApiResult<Vec<BlogPost>>;
    async fn find_live_post(&self, id: Uuid) -> ApiResult<Option<BlogPost>>;
    // Sorted by publish_date, newest first.
    async fn admin_posts(&self, include_deleted: bool) -> ApiResult<Vec<BlogPost>>;
    async fn insert_post(&self, post: BlogPost) -> ApiResult<()>;
    // `publish_date` of None keeps the stored value.
    async fn update_post(
        &self,
        id: Uuid,
        req: BlogPostCreate,
        publish_date: Option<DateTime<Utc>>,
    ) -> ApiResult<Option<BlogPost>>;
    async fn soft_delete_post(&self, id: Uuid, now: DateTime<Utc>) -> ApiResult<bool>;
    async fn restore_post(&self, id: Uuid) -> ApiResult<bool>;
    async fn delete_post(&self, id: Uuid) -> ApiResult<bool>;
    async fn trashed_posts(&self) -> ApiResult<Vec<BlogPost>>;

    // --- Trash batch operations ---
    // Permanently removes trashed rows whose deleted_at is before the cutoff.
    async fn purge_trash(&self, cutoff: DateTime<Utc>) -> ApiResult<TrashCounts>;
    // Permanently removes every trashed row in the selected collections.
    async fn empty_trash(&self, pages: bool, posts: bool) -> ApiResult<TrashCounts>;

    // --- Gallery ---
    async fn gallery_images(&self) -> ApiResult<Vec<GalleryImage>>;
    async fn insert_gallery_image(&self, image: GalleryImage) -> ApiResult<()>;
    async fn update_gallery_image(&self, id: Uuid, update: GalleryImageUpdate)
    -> ApiResult<bool>;
    // Unsets `featured` everywhere; called before promoting a new image.
    async fn clear_featured_flags(&self) -> ApiResult<()>;
    async fn delete_gallery_image(&self, id: Uuid) -> ApiResult<bool>;

    // --- News ---
    // Live items whose start/end window contains `now` (missing bounds open).
    async fn live_news(&self, now: DateTime<Utc>) -> ApiResult<Vec<NewsItem>>;
    async fn all_news(&self) -> ApiResult<Vec<NewsItem>>;
    async fn insert_news(&self, item: NewsItem) -> ApiResult<()>;
    async fn update_news(&self, id: Uuid, req: NewsItemCreate) -> ApiResult<bool>;
    async fn delete_news(&self, id: Uuid) -> ApiResult<bool>;

    // --- Contacts ---
    async fn insert_contact(&self, submission: ContactSubmission) -> ApiResult<()>;
    // Newest first, optionally filtered by status.
    async fn contacts(&self, status: Option<String>) -> ApiResult<Vec<ContactSubmission>>;
    async fn set_contact_status(&self, id: Uuid, status: &str) -> ApiResult<bool>;

    // --- Singleton documents (settings, landing, legal, counters) ---
    async fn singleton(&self, kind: &str) -> ApiResult<Option<Value>>;
    async fn put_singleton(&self, kind: &str, data: Value) -> ApiResult<()>;
    async fn static_page(&self, page_id: &str) -> ApiResult<Option<Value>>;
    async fn put_static_page(&self, page_id: &str, data: Value) -> ApiResult<()>;
    async fn static_pages(&self) -> ApiResult<Vec<(String, Value)>>;

    // --- Search (case-insensitive substring, live content only) ---
    async fn search_live_pages(&self, query: &str) -> ApiResult<Vec<Page>>;
    async fn search_live_posts(&self, query: &str) -> ApiResult<Vec<BlogPost>>;
    async fn search_gallery(&self, query: &str) -> ApiResult<Vec<GalleryImage>>;

    // --- Dashboard ---
    async fn stats(&self) -> ApiResult<DashboardStats>;

    // --- Admin credential & donations counter, layered on the singletons ---

    async fn admin_password_hash(&self) -> ApiResult<Option<String>> {
        Ok(self.singleton("admin_settings").await?.and_then(|doc| {
            doc.get("password_hash")
                .and_then(Value::as_str)
                .map(String::from)
        }))
    }

    async fn set_admin_password_hash(&self, hash: &str) -> ApiResult<()> {
        self.put_singleton("admin_settings", json!({ "password_hash": hash }))
            .await
    }

    async fn donations_count(&self) -> ApiResult<i64> {
        Ok(self
            .singleton("donations")
            .await?
            .and_then(|doc| doc.get("count").and_then(Value::as_i64))
            .unwrap_or(0))
    }

    async fn increment_donations(&self) -> ApiResult<i64> {
        let count = self.donations_count().await? + 1;
        self.put_singleton("donations", json!({ "count": count }))
            .await?;
        Ok(count)
    }
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;
