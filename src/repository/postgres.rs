use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{
    AdminSession, BlogPost, BlogPostCreate, ContactSubmission, ContentStatus, DashboardStats,
    GalleryImage, GalleryImageUpdate, NewsItem, NewsItemCreate, Page, PageCreate, TrashCounts,
};
use crate::repository::Repository;

/// PostgresRepository
///
/// The production implementation of the `Repository` trait. All queries are
/// runtime-bound (`sqlx::query_as` with `.bind()`), so the crate builds
/// without a reachable database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    // --- Admin sessions ---

    async fn insert_session(&self, session: AdminSession) -> ApiResult<()> {
        sqlx::query("INSERT INTO admin_sessions (token, created_at, active) VALUES ($1, $2, $3)")
            .bind(&session.token)
            .bind(session.created_at)
            .bind(session.active)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_session(&self, token: &str) -> ApiResult<Option<AdminSession>> {
        let session = sqlx::query_as::<_, AdminSession>(
            "SELECT token, created_at, active FROM admin_sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn deactivate_session(&self, token: &str) -> ApiResult<()> {
        sqlx::query("UPDATE admin_sessions SET active = FALSE WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // --- Pages ---

    async fn live_pages(&self) -> ApiResult<Vec<Page>> {
        let pages = sqlx::query_as::<_, Page>(
            "SELECT * FROM pages WHERE status = $1 ORDER BY page_order ASC",
        )
        .bind(ContentStatus::Live)
        .fetch_all(&self.pool)
        .await?;
        Ok(pages)
    }

    async fn find_live_page_by_slug(&self, slug: &str) -> ApiResult<Option<Page>> {
        let page =
            sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE slug = $1 AND status = $2")
                .bind(slug)
                .bind(ContentStatus::Live)
                .fetch_optional(&self.pool)
                .await?;
        Ok(page)
    }

    async fn find_page_by_slug(&self, slug: &str) -> ApiResult<Option<Page>> {
        let page = sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE slug = $1 LIMIT 1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(page)
    }

    async fn admin_pages(&self, include_deleted: bool) -> ApiResult<Vec<Page>> {
        let pages = if include_deleted {
            sqlx::query_as::<_, Page>("SELECT * FROM pages ORDER BY page_order ASC")
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, Page>(
                "SELECT * FROM pages WHERE status <> $1 ORDER BY page_order ASC",
            )
            .bind(ContentStatus::Deleted)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(pages)
    }

    async fn find_page(&self, id: Uuid) -> ApiResult<Option<Page>> {
        let page = sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(page)
    }

    async fn insert_page(&self, page: Page) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pages
                (id, title, slug, content, status, hero_image, meta_title,
                 meta_description, page_order, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(page.id)
        .bind(&page.title)
        .bind(&page.slug)
        .bind(&page.content)
        .bind(page.status)
        .bind(&page.hero_image)
        .bind(&page.meta_title)
        .bind(&page.meta_description)
        .bind(page.order)
        .bind(page.created_at)
        .bind(page.updated_at)
        .bind(page.deleted_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_page(&self, id: Uuid, req: PageCreate) -> ApiResult<Option<Page>> {
        let page = sqlx::query_as::<_, Page>(
            r#"
            UPDATE pages
            SET title = $2, slug = $3, content = $4, status = $5,
                hero_image = $6, meta_title = $7, meta_description = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.slug)
        .bind(&req.content)
        .bind(req.status)
        .bind(&req.hero_image)
        .bind(&req.meta_title)
        .bind(&req.meta_description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(page)
    }

    async fn soft_delete_page(&self, id: Uuid, now: DateTime<Utc>) -> ApiResult<bool> {
        let result = sqlx::query(
            "UPDATE pages SET status = $2, deleted_at = $3, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(ContentStatus::Deleted)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn restore_page(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query(
            "UPDATE pages SET status = $2, deleted_at = NULL, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(ContentStatus::Draft)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_page(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn trashed_pages(&self) -> ApiResult<Vec<Page>> {
        let pages = sqlx::query_as::<_, Page>(
            "SELECT * FROM pages WHERE status = $1 ORDER BY deleted_at DESC",
        )
        .bind(ContentStatus::Deleted)
        .fetch_all(&self.pool)
        .await?;
        Ok(pages)
    }

    // --- Blog posts ---

    async fn live_posts(&self, limit: Option<i64>) -> ApiResult<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE status = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(ContentStatus::Live)
        // NULL limit means no limit in Postgres.
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn find_live_post(&self, id: Uuid) -> ApiResult<Option<BlogPost>> {
        let post = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(ContentStatus::Live)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    async fn admin_posts(&self, include_deleted: bool) -> ApiResult<Vec<BlogPost>> {
        let posts = if include_deleted {
            sqlx::query_as::<_, BlogPost>(
                "SELECT * FROM blog_posts ORDER BY publish_date DESC",
            )
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, BlogPost>(
                "SELECT * FROM blog_posts WHERE status <> $1 ORDER BY publish_date DESC",
            )
            .bind(ContentStatus::Deleted)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(posts)
    }

    async fn insert_post(&self, post: BlogPost) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO blog_posts
                (id, title, excerpt, content, category, image_url, status,
                 publish_date, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.category)
        .bind(&post.image_url)
        .bind(post.status)
        .bind(post.publish_date)
        .bind(post.created_at)
        .bind(post.updated_at)
        .bind(post.deleted_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_post(
        &self,
        id: Uuid,
        req: BlogPostCreate,
        publish_date: Option<DateTime<Utc>>,
    ) -> ApiResult<Option<BlogPost>> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts
            SET title = $2, excerpt = $3, content = $4, category = $5,
                image_url = $6, status = $7,
                publish_date = COALESCE($8, publish_date),
                updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.excerpt)
        .bind(&req.content)
        .bind(&req.category)
        .bind(&req.image_url)
        .bind(req.status)
        .bind(publish_date)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    async fn soft_delete_post(&self, id: Uuid, now: DateTime<Utc>) -> ApiResult<bool> {
        let result = sqlx::query(
            "UPDATE blog_posts SET status = $2, deleted_at = $3, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(ContentStatus::Deleted)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn restore_post(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query(
            "UPDATE blog_posts SET status = $2, deleted_at = NULL, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(ContentStatus::Draft)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn trashed_posts(&self) -> ApiResult<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE status = $1 ORDER BY deleted_at DESC",
        )
        .bind(ContentStatus::Deleted)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    // --- Trash batch operations ---

    async fn purge_trash(&self, cutoff: DateTime<Utc>) -> ApiResult<TrashCounts> {
        let pages = sqlx::query("DELETE FROM pages WHERE status = $1 AND deleted_at < $2")
            .bind(ContentStatus::Deleted)
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        let posts = sqlx::query("DELETE FROM blog_posts WHERE status = $1 AND deleted_at < $2")
            .bind(ContentStatus::Deleted)
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(TrashCounts {
            deleted_pages: pages.rows_affected(),
            deleted_posts: posts.rows_affected(),
        })
    }

    async fn empty_trash(&self, pages: bool, posts: bool) -> ApiResult<TrashCounts> {
        let mut counts = TrashCounts::default();
        if pages {
            let result = sqlx::query("DELETE FROM pages WHERE status = $1")
                .bind(ContentStatus::Deleted)
                .execute(&self.pool)
                .await?;
            counts.deleted_pages = result.rows_affected();
        }
        if posts {
            let result = sqlx::query("DELETE FROM blog_posts WHERE status = $1")
                .bind(ContentStatus::Deleted)
                .execute(&self.pool)
                .await?;
            counts.deleted_posts = result.rows_affected();
        }
        Ok(counts)
    }

    // --- Gallery ---

    async fn gallery_images(&self) -> ApiResult<Vec<GalleryImage>> {
        let images = sqlx::query_as::<_, GalleryImage>(
            "SELECT * FROM gallery_images ORDER BY image_order ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(images)
    }

    async fn insert_gallery_image(&self, image: GalleryImage) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO gallery_images
                (id, url, filename, title, alt, caption, tags, featured,
                 external_link, image_order, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(image.id)
        .bind(&image.url)
        .bind(&image.filename)
        .bind(&image.title)
        .bind(&image.alt)
        .bind(&image.caption)
        .bind(&image.tags)
        .bind(image.featured)
        .bind(&image.external_link)
        .bind(image.order)
        .bind(image.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_gallery_image(
        &self,
        id: Uuid,
        update: GalleryImageUpdate,
    ) -> ApiResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE gallery_images
            SET title = COALESCE($2, title),
                alt = COALESCE($3, alt),
                caption = COALESCE($4, caption),
                tags = COALESCE($5, tags),
                featured = COALESCE($6, featured),
                external_link = COALESCE($7, external_link)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.alt)
        .bind(&update.caption)
        .bind(&update.tags)
        .bind(update.featured)
        .bind(&update.external_link)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear_featured_flags(&self) -> ApiResult<()> {
        sqlx::query("UPDATE gallery_images SET featured = FALSE WHERE featured = TRUE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_gallery_image(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- News ---

    async fn live_news(&self, now: DateTime<Utc>) -> ApiResult<Vec<NewsItem>> {
        let items = sqlx::query_as::<_, NewsItem>(
            r#"
            SELECT * FROM news_items
            WHERE status = $1
              AND (start_date IS NULL OR start_date <= $2)
              AND (end_date IS NULL OR end_date >= $2)
            ORDER BY news_order ASC
            "#,
        )
        .bind(ContentStatus::Live)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn all_news(&self) -> ApiResult<Vec<NewsItem>> {
        let items =
            sqlx::query_as::<_, NewsItem>("SELECT * FROM news_items ORDER BY news_order ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    async fn insert_news(&self, item: NewsItem) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO news_items
                (id, title, subtitle, image_url, link_url, link_type, status,
                 news_order, start_date, end_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.subtitle)
        .bind(&item.image_url)
        .bind(&item.link_url)
        .bind(&item.link_type)
        .bind(item.status)
        .bind(item.order)
        .bind(item.start_date)
        .bind(item.end_date)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_news(&self, id: Uuid, req: NewsItemCreate) -> ApiResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE news_items
            SET title = $2, subtitle = $3, image_url = $4, link_url = $5,
                link_type = $6, status = $7, news_order = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.subtitle)
        .bind(&req.image_url)
        .bind(&req.link_url)
        .bind(&req.link_type)
        .bind(req.status)
        .bind(req.order)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_news(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM news_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Contacts ---

    async fn insert_contact(&self, submission: ContactSubmission) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_submissions
                (id, name, email, thema, nachricht, timestamp, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(submission.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.thema)
        .bind(&submission.nachricht)
        .bind(submission.timestamp)
        .bind(&submission.status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn contacts(&self, status: Option<String>) -> ApiResult<Vec<ContactSubmission>> {
        let submissions = match status {
            Some(status) => {
                sqlx::query_as::<_, ContactSubmission>(
                    "SELECT * FROM contact_submissions WHERE status = $1 ORDER BY timestamp DESC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ContactSubmission>(
                    "SELECT * FROM contact_submissions ORDER BY timestamp DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(submissions)
    }

    async fn set_contact_status(&self, id: Uuid, status: &str) -> ApiResult<bool> {
        let result = sqlx::query("UPDATE contact_submissions SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Singleton documents ---

    async fn singleton(&self, kind: &str) -> ApiResult<Option<Value>> {
        let data = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM singleton_documents WHERE kind = $1",
        )
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;
        Ok(data)
    }

    async fn put_singleton(&self, kind: &str, data: Value) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO singleton_documents (kind, data) VALUES ($1, $2)
            ON CONFLICT (kind) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(kind)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn static_page(&self, page_id: &str) -> ApiResult<Option<Value>> {
        let data =
            sqlx::query_scalar::<_, Value>("SELECT data FROM static_pages WHERE page_id = $1")
                .bind(page_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(data)
    }

    async fn put_static_page(&self, page_id: &str, data: Value) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO static_pages (page_id, data) VALUES ($1, $2)
            ON CONFLICT (page_id) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(page_id)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn static_pages(&self) -> ApiResult<Vec<(String, Value)>> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            "SELECT page_id, data FROM static_pages",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // --- Search ---

    async fn search_live_pages(&self, query: &str) -> ApiResult<Vec<Page>> {
        let pattern = format!("%{query}%");
        let pages = sqlx::query_as::<_, Page>(
            r#"
            SELECT * FROM pages
            WHERE status = $1
              AND (title ILIKE $2 OR content ILIKE $2 OR slug ILIKE $2)
            ORDER BY page_order ASC
            "#,
        )
        .bind(ContentStatus::Live)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(pages)
    }

    async fn search_live_posts(&self, query: &str) -> ApiResult<Vec<BlogPost>> {
        let pattern = format!("%{query}%");
        let posts = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT * FROM blog_posts
            WHERE status = $1
              AND (title ILIKE $2 OR excerpt ILIKE $2 OR category ILIKE $2
                   OR content ILIKE $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(ContentStatus::Live)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn search_gallery(&self, query: &str) -> ApiResult<Vec<GalleryImage>> {
        let pattern = format!("%{query}%");
        let images = sqlx::query_as::<_, GalleryImage>(
            r#"
            SELECT * FROM gallery_images
            WHERE title ILIKE $1
               OR EXISTS (SELECT 1 FROM unnest(tags) tag WHERE tag ILIKE $1)
            ORDER BY image_order ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(images)
    }

    // --- Dashboard ---

    async fn stats(&self) -> ApiResult<DashboardStats> {
        let total_contacts =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_submissions")
                .fetch_one(&self.pool)
                .await?;
        let unread_contacts = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_submissions WHERE status = 'neu'",
        )
        .fetch_one(&self.pool)
        .await?;
        let total_pages = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pages")
            .fetch_one(&self.pool)
            .await?;
        let total_gallery = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gallery_images")
            .fetch_one(&self.pool)
            .await?;
        let total_posts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(&self.pool)
            .await?;
        let donations_count = self.donations_count().await?;

        Ok(DashboardStats {
            total_contacts,
            unread_contacts,
            total_pages,
            total_gallery,
            total_posts,
            donations_count,
        })
    }
}
