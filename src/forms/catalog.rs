use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::item::{ItemLabel, NewItem, UpdateItem};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};
use crate::money::parse_cents;

/// Maximum length allowed for category and item titles.
const TITLE_MAX_LEN: usize = 100;
const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

/// Maximum length allowed for an item description.
const DESCRIPTION_MAX_LEN: usize = 4096;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the catalog form helpers.
pub type CatalogFormResult<T> = Result<T, CatalogFormError>;

/// Errors that can occur while processing catalog management forms.
#[derive(Debug, Error)]
pub enum CatalogFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The title is empty after sanitization.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// The title yields no usable slug characters.
    #[error("title `{0}` does not produce a URL slug")]
    EmptySlug(String),
    /// A price could not be parsed as a non-negative decimal amount.
    #[error("invalid {field} `{value}`")]
    InvalidPrice { field: &'static str, value: String },
    /// Unknown label value.
    #[error("invalid label `{0}`")]
    InvalidLabel(String),
    /// Category identifier must be positive.
    #[error("invalid category `{0}`")]
    InvalidCategory(i32),
}

/// Form payload emitted when submitting the "Add category" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: String,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CatalogFormResult<NewCategory> {
        self.validate()?;

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(CatalogFormError::EmptyTitle);
        }

        let new_category = NewCategory::new(title);
        if new_category.slug.is_empty() {
            return Err(CatalogFormError::EmptySlug(new_category.title));
        }

        Ok(new_category)
    }
}

/// Text fields shared by the add and edit item forms.
#[derive(Debug, Validate)]
pub struct ItemFields {
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: String,
    pub price: String,
    pub discount_price: Option<String>,
    pub category_id: i32,
    pub label: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: String,
}

/// Sanitized values of [`ItemFields`].
struct CleanItemFields {
    title: String,
    price_cents: i64,
    discount_price_cents: Option<i64>,
    category_id: i32,
    label: ItemLabel,
    description: String,
}

impl ItemFields {
    fn clean(self) -> CatalogFormResult<CleanItemFields> {
        self.validate()?;

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(CatalogFormError::EmptyTitle);
        }

        if self.category_id <= 0 {
            return Err(CatalogFormError::InvalidCategory(self.category_id));
        }

        let price_cents = parse_price(&self.price, "price")?;

        let discount_price_cents = match self.discount_price.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_price(raw, "discount price")?),
        };

        let label = match self.label.as_deref().map(str::trim) {
            None | Some("") => ItemLabel::default(),
            Some(raw) => parse_label(raw)?,
        };

        Ok(CleanItemFields {
            title,
            price_cents,
            discount_price_cents,
            category_id: self.category_id,
            label,
            description: sanitize_multiline_text(&self.description),
        })
    }

    /// Validates and sanitizes the fields into a domain `NewItem`.
    pub fn into_new_item(self) -> CatalogFormResult<NewItem> {
        let clean = self.clean()?;

        let mut new_item = NewItem::new(clean.category_id, clean.title, clean.price_cents)
            .with_label(clean.label)
            .with_description(clean.description);
        if let Some(discount) = clean.discount_price_cents {
            new_item = new_item.with_discount_price(discount);
        }

        if new_item.slug.is_empty() {
            return Err(CatalogFormError::EmptySlug(new_item.title));
        }

        Ok(new_item)
    }

    /// Validates and sanitizes the fields into a domain `UpdateItem`.
    pub fn into_update_item(self) -> CatalogFormResult<UpdateItem> {
        let clean = self.clean()?;

        Ok(UpdateItem::new(
            clean.category_id,
            clean.title,
            clean.price_cents,
            clean.discount_price_cents,
            clean.label,
            clean.description,
        ))
    }
}

/// Multipart form submitted when adding an item.
#[derive(MultipartForm)]
pub struct AddItemForm {
    pub title: Text<String>,
    pub price: Text<String>,
    pub discount_price: Option<Text<String>>,
    pub category_id: Text<i32>,
    pub label: Option<Text<String>>,
    pub description: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

impl AddItemForm {
    /// Split the multipart payload into its text fields and the uploaded image.
    pub fn into_parts(self) -> (ItemFields, Option<TempFile>) {
        let fields = ItemFields {
            title: self.title.0,
            price: self.price.0,
            discount_price: self.discount_price.map(|value| value.0),
            category_id: self.category_id.0,
            label: self.label.map(|value| value.0),
            description: self.description.map(|value| value.0).unwrap_or_default(),
        };
        (fields, self.image)
    }
}

/// Multipart form submitted when editing an item.
#[derive(MultipartForm)]
pub struct EditItemForm {
    pub item_id: Text<i32>,
    pub title: Text<String>,
    pub price: Text<String>,
    pub discount_price: Option<Text<String>>,
    pub category_id: Text<i32>,
    pub label: Option<Text<String>>,
    pub description: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

impl EditItemForm {
    /// Split the multipart payload into the item id, its text fields and the uploaded image.
    pub fn into_parts(self) -> (i32, ItemFields, Option<TempFile>) {
        let fields = ItemFields {
            title: self.title.0,
            price: self.price.0,
            discount_price: self.discount_price.map(|value| value.0),
            category_id: self.category_id.0,
            label: self.label.map(|value| value.0),
            description: self.description.map(|value| value.0).unwrap_or_default(),
        };
        (self.item_id.0, fields, self.image)
    }
}

fn parse_price(raw: &str, field: &'static str) -> CatalogFormResult<i64> {
    parse_cents(raw).ok_or_else(|| CatalogFormError::InvalidPrice {
        field,
        value: raw.trim().to_string(),
    })
}

fn parse_label(raw: &str) -> CatalogFormResult<ItemLabel> {
    match raw.to_ascii_lowercase().as_str() {
        "p" | "primary" => Ok(ItemLabel::Primary),
        "s" | "secondary" => Ok(ItemLabel::Secondary),
        "d" | "danger" => Ok(ItemLabel::Danger),
        _ => Err(CatalogFormError::InvalidLabel(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ItemFields {
        ItemFields {
            title: "  Зелёный   чай ".to_string(),
            price: "199,90".to_string(),
            discount_price: Some("149.5".to_string()),
            category_id: 2,
            label: Some("D".to_string()),
            description: "  Листовой\n\n\n  чай ".to_string(),
        }
    }

    #[test]
    fn add_category_form_generates_slug() {
        let form = AddCategoryForm {
            title: "  Напитки  ".to_string(),
        };

        let category = form.into_new_category().expect("valid form");

        assert_eq!(category.title, "Напитки");
        assert_eq!(category.slug, "napitki");
    }

    #[test]
    fn add_category_form_rejects_unsluggable_title() {
        let form = AddCategoryForm {
            title: "!!!".to_string(),
        };

        assert!(matches!(
            form.into_new_category(),
            Err(CatalogFormError::EmptySlug(_))
        ));
    }

    #[test]
    fn item_fields_convert_to_new_item() {
        let item = fields().into_new_item().expect("valid form");

        assert_eq!(item.title, "Зелёный чай");
        assert_eq!(item.slug, "zelenyj-chaj");
        assert_eq!(item.price_cents, 19990);
        assert_eq!(item.discount_price_cents, Some(14950));
        assert_eq!(item.category_id, 2);
        assert_eq!(item.label, ItemLabel::Danger);
        assert_eq!(item.description, "Листовой\n\nчай");
        assert!(item.image.is_none());
    }

    #[test]
    fn item_fields_treat_blank_discount_as_none() {
        let mut form = fields();
        form.discount_price = Some("  ".to_string());
        form.label = None;

        let update = form.into_update_item().expect("valid form");

        assert_eq!(update.discount_price_cents, None);
        assert_eq!(update.label, ItemLabel::Primary);
        assert!(update.image.is_none());
    }

    #[test]
    fn item_fields_reject_invalid_price() {
        let mut form = fields();
        form.price = "-5".to_string();

        assert!(matches!(
            form.into_new_item(),
            Err(CatalogFormError::InvalidPrice { field, value }) if field == "price" && value == "-5"
        ));
    }

    #[test]
    fn item_fields_reject_unknown_label_and_category() {
        let mut form = fields();
        form.label = Some("warning".to_string());
        assert!(matches!(
            form.into_new_item(),
            Err(CatalogFormError::InvalidLabel(_))
        ));

        let mut form = fields();
        form.category_id = 0;
        assert!(matches!(
            form.into_new_item(),
            Err(CatalogFormError::InvalidCategory(0))
        ));
    }

    #[test]
    fn item_fields_reject_empty_title() {
        let mut form = fields();
        form.title = "   ".to_string();

        assert!(matches!(
            form.into_new_item(),
            Err(CatalogFormError::EmptyTitle)
        ));
    }
}
