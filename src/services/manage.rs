use std::path::Path;

use actix_multipart::form::tempfile::TempFile;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::category::Category;
use crate::domain::item::{Item, ItemListQuery};
use crate::forms::catalog::{AddCategoryForm, AddItemForm, EditItemForm};
use crate::media::store_item_image;
use crate::repository::{CategoryReader, CategoryWriter, ItemReader, ItemWriter};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the catalog management page.
pub struct ManagePageData {
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
}

/// Loads every category and item for the management page.
pub fn load_manage_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ManagePageData>
where
    R: CategoryReader + ItemReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let categories = repo.list_categories().map_err(ServiceError::from)?;
    let (_, items) = repo
        .list_items(ItemListQuery::new())
        .map_err(ServiceError::from)?;

    Ok(ManagePageData { categories, items })
}

/// Creates a category. Titles that produce an existing slug are rejected.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_category_by_slug(&new_category.slug)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    let category = repo
        .create_category(&new_category)
        .map_err(ServiceError::from)?;
    log::info!("Created category `{}`", category.slug);

    Ok(category)
}

/// Creates an item and stores its image under `media_root`.
pub fn create_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddItemForm,
    media_root: &Path,
) -> ServiceResult<Item>
where
    R: CategoryReader + ItemReader + ItemWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (fields, image) = form.into_parts();
    let mut new_item = fields
        .into_new_item()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_category_exists(repo, new_item.category_id)?;

    if repo
        .get_item_by_slug(&new_item.slug)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    if let Some(path) = store_image(media_root, &new_item.slug, image.as_ref())? {
        new_item = new_item.with_image(path);
    }

    let item = repo.create_item(&new_item).map_err(ServiceError::from)?;
    log::info!("Created item `{}`", item.slug);

    Ok(item)
}

/// Updates an item. The slug is kept; a new image replaces the old path.
pub fn modify_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditItemForm,
    media_root: &Path,
) -> ServiceResult<Item>
where
    R: CategoryReader + ItemReader + ItemWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (item_id, fields, image) = form.into_parts();

    let existing = repo
        .get_item_by_id(item_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let mut update = fields
        .into_update_item()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_category_exists(repo, update.category_id)?;

    if let Some(path) = store_image(media_root, &existing.slug, image.as_ref())? {
        update = update.with_image(path);
    }

    let item = repo
        .update_item(existing.id, &update)
        .map_err(ServiceError::from)?;
    log::info!("Updated item `{}`", item.slug);

    Ok(item)
}

/// Deletes an item together with the cart lines referencing it.
pub fn remove_item<R>(repo: &R, user: &AuthenticatedUser, item_id: i32) -> ServiceResult<()>
where
    R: ItemWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_item(item_id).map_err(ServiceError::from)?;
    log::info!("Deleted item {item_id}");

    Ok(())
}

fn ensure_category_exists<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryReader + ?Sized,
{
    match repo
        .get_category_by_id(category_id)
        .map_err(ServiceError::from)?
    {
        Some(_) => Ok(()),
        None => Err(ServiceError::Form(format!(
            "category {category_id} does not exist"
        ))),
    }
}

fn store_image(
    media_root: &Path,
    slug: &str,
    upload: Option<&TempFile>,
) -> ServiceResult<Option<String>> {
    let Some(upload) = upload else {
        return Ok(None);
    };

    store_item_image(media_root, slug, upload).map_err(|err| {
        log::error!("Failed to store image for item `{slug}`: {err}");
        ServiceError::Form("failed to store the uploaded image".to_string())
    })
}
