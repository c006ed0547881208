use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::slug::generate_slug;

/// Domain representation of a catalog category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Human-readable title of the category.
    pub title: String,
    /// URL-safe identifier derived from the title.
    pub slug: String,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Human-readable title of the category.
    pub title: String,
    /// Slug generated from the title when the payload is built.
    pub slug: String,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload, deriving the slug from `title`.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = generate_slug(&title);
        Self {
            title,
            slug,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}
