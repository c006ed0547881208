use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::slug::generate_slug;

/// Badge shown next to an item in listings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemLabel {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl From<&str> for ItemLabel {
    fn from(value: &str) -> Self {
        match value {
            "secondary" => Self::Secondary,
            "danger" => Self::Danger,
            _ => Self::Primary,
        }
    }
}

impl From<ItemLabel> for &'static str {
    fn from(value: ItemLabel) -> Self {
        match value {
            ItemLabel::Primary => "primary",
            ItemLabel::Secondary => "secondary",
            ItemLabel::Danger => "danger",
        }
    }
}

/// Domain representation of a catalog item.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Item {
    /// Unique identifier of the item.
    pub id: i32,
    /// Category the item belongs to.
    pub category_id: i32,
    /// Human-readable title of the item.
    pub title: String,
    /// Regular price in minor currency units.
    pub price_cents: i64,
    /// Optional discounted price in minor currency units.
    pub discount_price_cents: Option<i64>,
    /// Badge style used by the templates.
    pub label: ItemLabel,
    /// URL-safe identifier generated once from the title.
    pub slug: String,
    /// Long description shown on the item page.
    pub description: String,
    /// Image path relative to the media root.
    pub image: Option<String>,
    /// Timestamp for when the item record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the item record.
    pub updated_at: NaiveDateTime,
}

impl Item {
    /// Discounted price that actually applies; a zero discount counts as none.
    pub fn active_discount_cents(&self) -> Option<i64> {
        self.discount_price_cents.filter(|price| *price != 0)
    }
}

/// Payload required to insert a new item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub price_cents: i64,
    pub discount_price_cents: Option<i64>,
    pub label: ItemLabel,
    pub description: String,
    pub image: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewItem {
    /// Build a new item payload, deriving the slug from `title`.
    pub fn new(category_id: i32, title: impl Into<String>, price_cents: i64) -> Self {
        let title = title.into();
        let slug = generate_slug(&title);
        Self {
            category_id,
            title,
            slug,
            price_cents,
            discount_price_cents: None,
            label: ItemLabel::default(),
            description: String::new(),
            image: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn with_discount_price(mut self, discount_price_cents: i64) -> Self {
        self.discount_price_cents = Some(discount_price_cents);
        self
    }

    pub fn with_label(mut self, label: ItemLabel) -> Self {
        self.label = label;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Patch data applied when updating an existing item.
///
/// The slug is not part of the patch; it is fixed when the item is created.
#[derive(Debug, Clone)]
pub struct UpdateItem {
    pub category_id: i32,
    pub title: String,
    pub price_cents: i64,
    pub discount_price_cents: Option<i64>,
    pub label: ItemLabel,
    pub description: String,
    /// New image path; `None` keeps the current image.
    pub image: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateItem {
    /// Build an update payload replacing every editable field.
    pub fn new(
        category_id: i32,
        title: impl Into<String>,
        price_cents: i64,
        discount_price_cents: Option<i64>,
        label: ItemLabel,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category_id,
            title: title.into(),
            price_cents,
            discount_price_cents,
            label,
            description: description.into(),
            image: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    /// Replace the stored image path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Query definition used to list catalog items.
#[derive(Debug, Clone, Default)]
pub struct ItemListQuery {
    /// Optional case-insensitive substring matched against title and description.
    pub search: Option<String>,
    /// Optional category filter.
    pub category_id: Option<i32>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ItemListQuery {
    /// Construct a query over the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to the title or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict the results to a single category.
    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
