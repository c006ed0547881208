use pushkind_common::pagination::Paginated;
use serde::Deserialize;

use crate::domain::category::Category;
use crate::domain::item::{Item, ItemListQuery};
use crate::repository::{CategoryReader, ItemReader};
use crate::services::{ServiceError, ServiceResult};

/// Number of items shown on one page of the home listing.
pub const HOME_ITEMS_PER_PAGE: usize = 4;

/// Query parameters accepted by the home page and the JSON catalog.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Search string typed into the navbar search box.
    pub s_field: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}

/// Data required to render the home template.
pub struct HomePageData {
    /// Paginated list of catalog items.
    pub items: Paginated<Item>,
    /// Search query echoed back to the template when present.
    pub search: Option<String>,
    /// Every category, for the navigation bar.
    pub categories: Vec<Category>,
}

/// Data required to render an item page.
pub struct ItemPageData {
    pub item: Item,
    pub categories: Vec<Category>,
}

/// Data required to render a category page.
pub struct CategoryPageData {
    pub category: Category,
    pub items: Vec<Item>,
    pub categories: Vec<Category>,
}

/// Lists catalog items matching the optional search, one page at a time.
///
/// Pages past the last one are `NotFound`; the first page is always valid.
pub fn load_items<R>(repo: &R, query: &HomeQuery) -> ServiceResult<Paginated<Item>>
where
    R: ItemReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = ItemListQuery::new().paginate(page, HOME_ITEMS_PER_PAGE);

    if let Some(term) = search_term(query) {
        list_query = list_query.search(term);
    }

    let (total, items) = repo.list_items(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(HOME_ITEMS_PER_PAGE);
    if page > 1 && page > total_pages {
        return Err(ServiceError::NotFound);
    }

    Ok(Paginated::new(items, page, total_pages))
}

/// Loads the home page: the item listing plus navigation categories.
pub fn load_home_page<R>(repo: &R, query: HomeQuery) -> ServiceResult<HomePageData>
where
    R: ItemReader + CategoryReader + ?Sized,
{
    let items = load_items(repo, &query)?;
    let categories = repo.list_categories().map_err(ServiceError::from)?;

    Ok(HomePageData {
        items,
        search: search_term(&query).map(str::to_string),
        categories,
    })
}

/// Loads a single item by its slug.
pub fn load_item_page<R>(repo: &R, slug: &str) -> ServiceResult<ItemPageData>
where
    R: ItemReader + CategoryReader + ?Sized,
{
    let item = repo
        .get_item_by_slug(slug)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;
    let categories = repo.list_categories().map_err(ServiceError::from)?;

    Ok(ItemPageData { item, categories })
}

/// Loads a category by its slug together with all of its items.
pub fn load_category_page<R>(repo: &R, slug: &str) -> ServiceResult<CategoryPageData>
where
    R: ItemReader + CategoryReader + ?Sized,
{
    let category = repo
        .get_category_by_slug(slug)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let (_, items) = repo
        .list_items(ItemListQuery::new().category_id(category.id))
        .map_err(ServiceError::from)?;
    let categories = repo.list_categories().map_err(ServiceError::from)?;

    Ok(CategoryPageData {
        category,
        items,
        categories,
    })
}

fn search_term(query: &HomeQuery) -> Option<&str> {
    query
        .s_field
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
}
