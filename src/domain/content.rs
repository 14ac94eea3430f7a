//! Article and testimonial domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published (or draft) article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub author: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A testimonial; shown publicly once approved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub author_name: String,
    pub author_title: Option<String>,
    pub quote: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}
