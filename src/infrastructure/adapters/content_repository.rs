//! SQLite-backed articles and testimonials

use crate::domain::content::{Article, Testimonial};
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: String,
    slug: String,
    title: String,
    body: String,
    author: String,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_domain(self) -> Article {
        Article {
            id: self.id,
            slug: self.slug,
            title: self.title,
            body: self.body,
            author: self.author,
            published: self.published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TestimonialRow {
    id: String,
    author_name: String,
    author_title: Option<String>,
    quote: String,
    approved: bool,
    created_at: DateTime<Utc>,
}

impl TestimonialRow {
    fn into_domain(self) -> Testimonial {
        Testimonial {
            id: self.id,
            author_name: self.author_name,
            author_title: self.author_title,
            quote: self.quote,
            approved: self.approved,
            created_at: self.created_at,
        }
    }
}

/// Repository for articles and testimonials
#[derive(Clone)]
pub struct ContentRepository {
    pool: SqlitePool,
}

impl ContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert_article(&self, article: &Article) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO articles (id, slug, title, body, author, published, created_at, \
             updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&article.id)
        .bind(&article.slug)
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.author)
        .bind(article.published)
        .bind(article.created_at)
        .bind(article.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("article slug already exists: {}", article.slug),
            )),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn update_article(&self, article: &Article) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE articles SET slug = ?, title = ?, body = ?, author = ?, published = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&article.slug)
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.author)
        .bind(article.published)
        .bind(Utc::now())
        .bind(&article.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("article {}", article.id)));
        }
        Ok(())
    }

    pub async fn delete_article(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("article {}", id)));
        }
        Ok(())
    }

    pub async fn find_article_by_id(&self, id: &str) -> AppResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, slug, title, body, author, published, created_at, updated_at \
             FROM articles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ArticleRow::into_domain))
    }

    pub async fn find_article_by_slug(&self, slug: &str) -> AppResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, slug, title, body, author, published, created_at, updated_at \
             FROM articles WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ArticleRow::into_domain))
    }

    pub async fn list_articles(
        &self,
        published_only: bool,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Article>> {
        let rows = if published_only {
            sqlx::query_as::<_, ArticleRow>(
                "SELECT id, slug, title, body, author, published, created_at, updated_at \
                 FROM articles WHERE published = 1 ORDER BY created_at DESC LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, ArticleRow>(
                "SELECT id, slug, title, body, author, published, created_at, updated_at \
                 FROM articles ORDER BY created_at DESC LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows.into_iter().map(ArticleRow::into_domain).collect())
    }

    pub async fn insert_testimonial(&self, testimonial: &Testimonial) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO testimonials (id, author_name, author_title, quote, approved, \
             created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&testimonial.id)
        .bind(&testimonial.author_name)
        .bind(&testimonial.author_title)
        .bind(&testimonial.quote)
        .bind(testimonial.approved)
        .bind(testimonial.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_testimonials(
        &self,
        approved_only: bool,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Testimonial>> {
        let rows = if approved_only {
            sqlx::query_as::<_, TestimonialRow>(
                "SELECT id, author_name, author_title, quote, approved, created_at \
                 FROM testimonials WHERE approved = 1 ORDER BY created_at DESC LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, TestimonialRow>(
                "SELECT id, author_name, author_title, quote, approved, created_at \
                 FROM testimonials ORDER BY created_at DESC LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows.into_iter().map(TestimonialRow::into_domain).collect())
    }

    pub async fn set_testimonial_approved(&self, id: &str, approved: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE testimonials SET approved = ? WHERE id = ?")
            .bind(approved)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("testimonial {}", id)));
        }
        Ok(())
    }

    pub async fn delete_testimonial(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("testimonial {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::database::connect_in_memory;
    use uuid::Uuid;

    fn sample_article(slug: &str, published: bool) -> Article {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4().to_string(),
            slug: slug.to_string(),
            title: "Launch notes".into(),
            body: "Body".into(),
            author: "Staff".into(),
            published,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_article_listing_respects_published_flag() {
        let pool = connect_in_memory().await.unwrap();
        let repo = ContentRepository::new(pool);

        repo.insert_article(&sample_article("live", true)).await.unwrap();
        repo.insert_article(&sample_article("draft", false)).await.unwrap();

        let public = repo.list_articles(true, 10, 0).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].slug, "live");

        let all = repo.list_articles(false, 10, 0).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_testimonial_moderation() {
        let pool = connect_in_memory().await.unwrap();
        let repo = ContentRepository::new(pool);

        let t = Testimonial {
            id: Uuid::new_v4().to_string(),
            author_name: "Ana".into(),
            author_title: Some("Organizer".into()),
            quote: "Great platform".into(),
            approved: false,
            created_at: Utc::now(),
        };
        repo.insert_testimonial(&t).await.unwrap();
        assert!(repo.list_testimonials(true, 10, 0).await.unwrap().is_empty());

        repo.set_testimonial_approved(&t.id, true).await.unwrap();
        let approved = repo.list_testimonials(true, 10, 0).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].author_name, "Ana");
    }
}
