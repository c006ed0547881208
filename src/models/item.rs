use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::item::{
    Item as DomainItem, NewItem as DomainNewItem, UpdateItem as DomainUpdateItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::items)]
pub struct Item {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub price_cents: i64,
    pub discount_price_cents: Option<i64>,
    pub label: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::items)]
pub struct NewItem<'a> {
    pub category_id: i32,
    pub title: &'a str,
    pub price_cents: i64,
    pub discount_price_cents: Option<i64>,
    pub label: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Changeset for an item; `image: None` leaves the stored image untouched
/// while `discount_price_cents: None` clears the discount.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::items)]
pub struct UpdateItem<'a> {
    pub category_id: i32,
    pub title: &'a str,
    pub price_cents: i64,
    pub discount_price_cents: Option<Option<i64>>,
    pub label: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Item> for DomainItem {
    fn from(value: Item) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            title: value.title,
            price_cents: value.price_cents,
            discount_price_cents: value.discount_price_cents,
            label: value.label.as_str().into(),
            slug: value.slug,
            description: value.description,
            image: value.image,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewItem> for NewItem<'a> {
    fn from(value: &'a DomainNewItem) -> Self {
        Self {
            category_id: value.category_id,
            title: value.title.as_str(),
            price_cents: value.price_cents,
            discount_price_cents: value.discount_price_cents,
            label: value.label.into(),
            slug: value.slug.as_str(),
            description: value.description.as_str(),
            image: value.image.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateItem> for UpdateItem<'a> {
    fn from(value: &'a DomainUpdateItem) -> Self {
        Self {
            category_id: value.category_id,
            title: value.title.as_str(),
            price_cents: value.price_cents,
            discount_price_cents: Some(value.discount_price_cents),
            label: value.label.into(),
            description: value.description.as_str(),
            image: value.image.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
