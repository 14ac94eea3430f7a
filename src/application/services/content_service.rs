//! Content service: articles and testimonials

use crate::domain::content::{Article, Testimonial};
use crate::infrastructure::adapters::ContentRepository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::validation::{is_valid_slug, slugify};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Create/update request for an article
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ArticleUpsertRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    pub slug: Option<String>,

    #[validate(length(min = 1, max = 100000))]
    pub body: String,

    #[validate(length(min = 1, max = 120))]
    pub author: String,

    #[serde(default)]
    pub published: bool,
}

/// Public testimonial submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TestimonialSubmitRequest {
    #[validate(length(min = 1, max = 120))]
    pub author_name: String,

    #[validate(length(max = 160))]
    pub author_title: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    pub quote: String,
}

pub struct ContentService {
    content: Arc<ContentRepository>,
}

impl ContentService {
    pub fn new(content: Arc<ContentRepository>) -> Self {
        Self { content }
    }

    fn resolve_slug(request: &ArticleUpsertRequest) -> AppResult<String> {
        let slug = match &request.slug {
            Some(slug) => slug.clone(),
            None => slugify(&request.title),
        };
        if !is_valid_slug(&slug) {
            return Err(AppError::Validation(format!("invalid slug: {}", slug)));
        }
        Ok(slug)
    }

    pub async fn create_article(&self, request: ArticleUpsertRequest) -> AppResult<Article> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let slug = Self::resolve_slug(&request)?;

        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4().to_string(),
            slug,
            title: request.title,
            body: request.body,
            author: request.author,
            published: request.published,
            created_at: now,
            updated_at: now,
        };
        self.content.insert_article(&article).await?;
        Ok(article)
    }

    pub async fn update_article(
        &self,
        id: &str,
        request: ArticleUpsertRequest,
    ) -> AppResult<Article> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let slug = Self::resolve_slug(&request)?;

        let mut article = self
            .content
            .find_article_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("article {}", id)))?;

        article.slug = slug;
        article.title = request.title;
        article.body = request.body;
        article.author = request.author;
        article.published = request.published;
        article.updated_at = Utc::now();

        self.content.update_article(&article).await?;
        Ok(article)
    }

    pub async fn delete_article(&self, id: &str) -> AppResult<()> {
        self.content.delete_article(id).await
    }

    /// Public fetch; drafts are invisible
    pub async fn get_public_article(&self, slug: &str) -> AppResult<Article> {
        match self.content.find_article_by_slug(slug).await? {
            Some(article) if article.published => Ok(article),
            _ => Err(AppError::NotFound(format!("article {}", slug))),
        }
    }

    pub async fn list_articles(
        &self,
        published_only: bool,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Article>> {
        self.content.list_articles(published_only, limit, offset).await
    }

    /// Public submission; testimonials start unapproved
    pub async fn submit_testimonial(
        &self,
        request: TestimonialSubmitRequest,
    ) -> AppResult<Testimonial> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let testimonial = Testimonial {
            id: Uuid::new_v4().to_string(),
            author_name: request.author_name,
            author_title: request.author_title,
            quote: request.quote,
            approved: false,
            created_at: Utc::now(),
        };
        self.content.insert_testimonial(&testimonial).await?;
        Ok(testimonial)
    }

    pub async fn list_testimonials(
        &self,
        approved_only: bool,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Testimonial>> {
        self.content
            .list_testimonials(approved_only, limit, offset)
            .await
    }

    pub async fn approve_testimonial(&self, id: &str) -> AppResult<()> {
        self.content.set_testimonial_approved(id, true).await
    }

    pub async fn delete_testimonial(&self, id: &str) -> AppResult<()> {
        self.content.delete_testimonial(id).await
    }
}
