use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    AdminSession, BlogPost, BlogPostCreate, ContactSubmission, ContentStatus, DashboardStats,
    GalleryImage, GalleryImageUpdate, NewsItem, NewsItemCreate, Page, PageCreate, TrashCounts,
};
use crate::repository::Repository;

/// MemoryRepository
///
/// An in-process implementation of `Repository` used by the integration
/// tests, so the full router can be exercised without a running Postgres.
/// Semantics mirror the Postgres implementation: same filters, same sort
/// orders, same return values.
#[derive(Default)]
pub struct MemoryRepository {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<String, AdminSession>,
    pages: Vec<Page>,
    posts: Vec<BlogPost>,
    gallery: Vec<GalleryImage>,
    news: Vec<NewsItem>,
    contacts: Vec<ContactSubmission>,
    singletons: HashMap<String, Value>,
    statics: HashMap<String, Value>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| ApiError::Internal("repository mutex poisoned".to_string()))
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl Repository for MemoryRepository {
    // --- Admin sessions ---

    async fn insert_session(&self, session: AdminSession) -> ApiResult<()> {
        self.lock()?.sessions.insert(session.token.clone(), session);
        Ok(())
    }

    async fn find_session(&self, token: &str) -> ApiResult<Option<AdminSession>> {
        Ok(self.lock()?.sessions.get(token).cloned())
    }

    async fn deactivate_session(&self, token: &str) -> ApiResult<()> {
        if let Some(session) = self.lock()?.sessions.get_mut(token) {
            session.active = false;
        }
        Ok(())
    }

    // --- Pages ---

    async fn live_pages(&self) -> ApiResult<Vec<Page>> {
        let mut pages: Vec<Page> = self
            .lock()?
            .pages
            .iter()
            .filter(|p| p.status == ContentStatus::Live)
            .cloned()
            .collect();
        pages.sort_by_key(|p| p.order);
        Ok(pages)
    }

    async fn find_live_page_by_slug(&self, slug: &str) -> ApiResult<Option<Page>> {
        Ok(self
            .lock()?
            .pages
            .iter()
            .find(|p| p.slug == slug && p.status == ContentStatus::Live)
            .cloned())
    }

    async fn find_page_by_slug(&self, slug: &str) -> ApiResult<Option<Page>> {
        Ok(self.lock()?.pages.iter().find(|p| p.slug == slug).cloned())
    }

    async fn admin_pages(&self, include_deleted: bool) -> ApiResult<Vec<Page>> {
        let mut pages: Vec<Page> = self
            .lock()?
            .pages
            .iter()
            .filter(|p| include_deleted || p.status != ContentStatus::Deleted)
            .cloned()
            .collect();
        pages.sort_by_key(|p| p.order);
        Ok(pages)
    }

    async fn find_page(&self, id: Uuid) -> ApiResult<Option<Page>> {
        Ok(self.lock()?.pages.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_page(&self, page: Page) -> ApiResult<()> {
        self.lock()?.pages.push(page);
        Ok(())
    }

    async fn update_page(&self, id: Uuid, req: PageCreate) -> ApiResult<Option<Page>> {
        let mut inner = self.lock()?;
        let Some(page) = inner.pages.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        page.title = req.title;
        page.slug = req.slug;
        page.content = req.content;
        page.status = req.status;
        page.hero_image = req.hero_image;
        page.meta_title = req.meta_title;
        page.meta_description = req.meta_description;
        page.updated_at = Utc::now();
        Ok(Some(page.clone()))
    }

    async fn soft_delete_page(&self, id: Uuid, now: DateTime<Utc>) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let Some(page) = inner.pages.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        page.status = ContentStatus::Deleted;
        page.deleted_at = Some(now);
        page.updated_at = now;
        Ok(true)
    }

    async fn restore_page(&self, id: Uuid) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let Some(page) = inner.pages.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        page.status = ContentStatus::Draft;
        page.deleted_at = None;
        page.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_page(&self, id: Uuid) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let before = inner.pages.len();
        inner.pages.retain(|p| p.id != id);
        Ok(inner.pages.len() < before)
    }

    async fn trashed_pages(&self) -> ApiResult<Vec<Page>> {
        let mut pages: Vec<Page> = self
            .lock()?
            .pages
            .iter()
            .filter(|p| p.status == ContentStatus::Deleted)
            .cloned()
            .collect();
        pages.sort_by_key(|p| std::cmp::Reverse(p.deleted_at));
        Ok(pages)
    }

    // --- Blog posts ---

    async fn live_posts(&self, limit: Option<i64>) -> ApiResult<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self
            .lock()?
            .posts
            .iter()
            .filter(|p| p.status == ContentStatus::Live)
            .cloned()
            .collect();
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at));
        if let Some(limit) = limit {
            posts.truncate(limit.max(0) as usize);
        }
        Ok(posts)
    }

    async fn find_live_post(&self, id: Uuid) -> ApiResult<Option<BlogPost>> {
        Ok(self
            .lock()?
            .posts
            .iter()
            .find(|p| p.id == id && p.status == ContentStatus::Live)
            .cloned())
    }

    async fn admin_posts(&self, include_deleted: bool) -> ApiResult<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self
            .lock()?
            .posts
            .iter()
            .filter(|p| include_deleted || p.status != ContentStatus::Deleted)
            .cloned()
            .collect();
        posts.sort_by_key(|p| std::cmp::Reverse(p.publish_date));
        Ok(posts)
    }

    async fn insert_post(&self, post: BlogPost) -> ApiResult<()> {
        self.lock()?.posts.push(post);
        Ok(())
    }

    async fn update_post(
        &self,
        id: Uuid,
        req: BlogPostCreate,
        publish_date: Option<DateTime<Utc>>,
    ) -> ApiResult<Option<BlogPost>> {
        let mut inner = self.lock()?;
        let Some(post) = inner.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.title = req.title;
        post.excerpt = req.excerpt;
        post.content = req.content;
        post.category = req.category;
        post.image_url = req.image_url;
        post.status = req.status;
        if let Some(publish_date) = publish_date {
            post.publish_date = publish_date;
        }
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn soft_delete_post(&self, id: Uuid, now: DateTime<Utc>) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let Some(post) = inner.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        post.status = ContentStatus::Deleted;
        post.deleted_at = Some(now);
        post.updated_at = now;
        Ok(true)
    }

    async fn restore_post(&self, id: Uuid) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let Some(post) = inner.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        post.status = ContentStatus::Draft;
        post.deleted_at = None;
        post.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_post(&self, id: Uuid) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let before = inner.posts.len();
        inner.posts.retain(|p| p.id != id);
        Ok(inner.posts.len() < before)
    }

    async fn trashed_posts(&self) -> ApiResult<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self
            .lock()?
            .posts
            .iter()
            .filter(|p| p.status == ContentStatus::Deleted)
            .cloned()
            .collect();
        posts.sort_by_key(|p| std::cmp::Reverse(p.deleted_at));
        Ok(posts)
    }

    // --- Trash batch operations ---

    async fn purge_trash(&self, cutoff: DateTime<Utc>) -> ApiResult<TrashCounts> {
        let mut inner = self.lock()?;
        let expired =
            |status: ContentStatus, deleted_at: Option<DateTime<Utc>>| {
                status == ContentStatus::Deleted && deleted_at.is_some_and(|at| at < cutoff)
            };

        let pages_before = inner.pages.len();
        inner.pages.retain(|p| !expired(p.status, p.deleted_at));
        let posts_before = inner.posts.len();
        inner.posts.retain(|p| !expired(p.status, p.deleted_at));

        Ok(TrashCounts {
            deleted_pages: (pages_before - inner.pages.len()) as u64,
            deleted_posts: (posts_before - inner.posts.len()) as u64,
        })
    }

    async fn empty_trash(&self, pages: bool, posts: bool) -> ApiResult<TrashCounts> {
        let mut inner = self.lock()?;
        let mut counts = TrashCounts::default();
        if pages {
            let before = inner.pages.len();
            inner.pages.retain(|p| p.status != ContentStatus::Deleted);
            counts.deleted_pages = (before - inner.pages.len()) as u64;
        }
        if posts {
            let before = inner.posts.len();
            inner.posts.retain(|p| p.status != ContentStatus::Deleted);
            counts.deleted_posts = (before - inner.posts.len()) as u64;
        }
        Ok(counts)
    }

    // --- Gallery ---

    async fn gallery_images(&self) -> ApiResult<Vec<GalleryImage>> {
        let mut images = self.lock()?.gallery.clone();
        images.sort_by_key(|i| i.order);
        Ok(images)
    }

    async fn insert_gallery_image(&self, image: GalleryImage) -> ApiResult<()> {
        self.lock()?.gallery.push(image);
        Ok(())
    }

    async fn update_gallery_image(
        &self,
        id: Uuid,
        update: GalleryImageUpdate,
    ) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let Some(image) = inner.gallery.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };
        if let Some(title) = update.title {
            image.title = title;
        }
        if let Some(alt) = update.alt {
            image.alt = alt;
        }
        if let Some(caption) = update.caption {
            image.caption = caption;
        }
        if let Some(tags) = update.tags {
            image.tags = tags;
        }
        if let Some(featured) = update.featured {
            image.featured = featured;
        }
        if let Some(external_link) = update.external_link {
            image.external_link = Some(external_link);
        }
        Ok(true)
    }

    async fn clear_featured_flags(&self) -> ApiResult<()> {
        for image in self.lock()?.gallery.iter_mut() {
            image.featured = false;
        }
        Ok(())
    }

    async fn delete_gallery_image(&self, id: Uuid) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let before = inner.gallery.len();
        inner.gallery.retain(|i| i.id != id);
        Ok(inner.gallery.len() < before)
    }

    // --- News ---

    async fn live_news(&self, now: DateTime<Utc>) -> ApiResult<Vec<NewsItem>> {
        let mut items: Vec<NewsItem> = self
            .lock()?
            .news
            .iter()
            .filter(|n| {
                n.status == ContentStatus::Live
                    && n.start_date.is_none_or(|start| start <= now)
                    && n.end_date.is_none_or(|end| end >= now)
            })
            .cloned()
            .collect();
        items.sort_by_key(|n| n.order);
        Ok(items)
    }

    async fn all_news(&self) -> ApiResult<Vec<NewsItem>> {
        let mut items = self.lock()?.news.clone();
        items.sort_by_key(|n| n.order);
        Ok(items)
    }

    async fn insert_news(&self, item: NewsItem) -> ApiResult<()> {
        self.lock()?.news.push(item);
        Ok(())
    }

    async fn update_news(&self, id: Uuid, req: NewsItemCreate) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let Some(item) = inner.news.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        item.title = req.title;
        item.subtitle = req.subtitle;
        item.image_url = req.image_url;
        item.link_url = req.link_url;
        item.link_type = req.link_type;
        item.status = req.status;
        item.order = req.order;
        Ok(true)
    }

    async fn delete_news(&self, id: Uuid) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let before = inner.news.len();
        inner.news.retain(|n| n.id != id);
        Ok(inner.news.len() < before)
    }

    // --- Contacts ---

    async fn insert_contact(&self, submission: ContactSubmission) -> ApiResult<()> {
        self.lock()?.contacts.push(submission);
        Ok(())
    }

    async fn contacts(&self, status: Option<String>) -> ApiResult<Vec<ContactSubmission>> {
        let mut submissions: Vec<ContactSubmission> = self
            .lock()?
            .contacts
            .iter()
            .filter(|c| status.as_ref().is_none_or(|s| &c.status == s))
            .cloned()
            .collect();
        submissions.sort_by_key(|c| std::cmp::Reverse(c.timestamp));
        Ok(submissions)
    }

    async fn set_contact_status(&self, id: Uuid, status: &str) -> ApiResult<bool> {
        let mut inner = self.lock()?;
        let Some(submission) = inner.contacts.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        submission.status = status.to_string();
        Ok(true)
    }

    // --- Singleton documents ---

    async fn singleton(&self, kind: &str) -> ApiResult<Option<Value>> {
        Ok(self.lock()?.singletons.get(kind).cloned())
    }

    async fn put_singleton(&self, kind: &str, data: Value) -> ApiResult<()> {
        self.lock()?.singletons.insert(kind.to_string(), data);
        Ok(())
    }

    async fn static_page(&self, page_id: &str) -> ApiResult<Option<Value>> {
        Ok(self.lock()?.statics.get(page_id).cloned())
    }

    async fn put_static_page(&self, page_id: &str, data: Value) -> ApiResult<()> {
        self.lock()?.statics.insert(page_id.to_string(), data);
        Ok(())
    }

    async fn static_pages(&self) -> ApiResult<Vec<(String, Value)>> {
        Ok(self
            .lock()?
            .statics
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    // --- Search ---

    async fn search_live_pages(&self, query: &str) -> ApiResult<Vec<Page>> {
        let mut pages: Vec<Page> = self
            .lock()?
            .pages
            .iter()
            .filter(|p| {
                p.status == ContentStatus::Live
                    && (contains_ci(&p.title, query)
                        || contains_ci(&p.content, query)
                        || contains_ci(&p.slug, query))
            })
            .cloned()
            .collect();
        pages.sort_by_key(|p| p.order);
        Ok(pages)
    }

    async fn search_live_posts(&self, query: &str) -> ApiResult<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self
            .lock()?
            .posts
            .iter()
            .filter(|p| {
                p.status == ContentStatus::Live
                    && (contains_ci(&p.title, query)
                        || contains_ci(&p.excerpt, query)
                        || contains_ci(&p.category, query)
                        || contains_ci(&p.content, query))
            })
            .cloned()
            .collect();
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at));
        Ok(posts)
    }

    async fn search_gallery(&self, query: &str) -> ApiResult<Vec<GalleryImage>> {
        let mut images: Vec<GalleryImage> = self
            .lock()?
            .gallery
            .iter()
            .filter(|i| {
                contains_ci(&i.title, query)
                    || i.tags.iter().any(|tag| contains_ci(tag, query))
            })
            .cloned()
            .collect();
        images.sort_by_key(|i| i.order);
        Ok(images)
    }

    // --- Dashboard ---

    async fn stats(&self) -> ApiResult<DashboardStats> {
        let donations_count = self.donations_count().await?;
        let inner = self.lock()?;
        Ok(DashboardStats {
            total_contacts: inner.contacts.len() as i64,
            unread_contacts: inner.contacts.iter().filter(|c| c.status == "neu").count() as i64,
            total_pages: inner.pages.len() as i64,
            total_gallery: inner.gallery.len() as i64,
            total_posts: inner.posts.len() as i64,
            donations_count,
        })
    }
}
