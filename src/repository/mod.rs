use diesel::connection::SimpleConnection;
use diesel::sql_types::Text;
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::billing_address::NewBillingAddress;
use crate::domain::category::{Category, NewCategory};
use crate::domain::item::{Item, ItemListQuery, NewItem, UpdateItem};
use crate::domain::order::{CartUpdate, Order};
use crate::domain::user::{NewUser, User};

pub mod category;
pub mod item;
pub mod order;
pub mod user;

#[cfg(test)]
pub mod mock;

/// Milliseconds a connection waits for a competing writer before failing.
const BUSY_TIMEOUT_MS: u32 = 5000;

diesel::define_sql_function! {
    /// Unicode-aware lowercase; SQLite's builtin `lower` folds ASCII only.
    fn unicode_lower(text: Text) -> Text;
}

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        let mut conn = self.pool.get()?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))?;
        unicode_lower_utils::register_impl(&mut conn, |text: String| text.to_lowercase())?;
        Ok(conn)
    }
}

/// Read-only operations over catalog categories.
pub trait CategoryReader {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations over catalog categories.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
}

/// Read-only operations over catalog items.
pub trait ItemReader {
    fn get_item_by_id(&self, id: i32) -> RepositoryResult<Option<Item>>;
    fn get_item_by_slug(&self, slug: &str) -> RepositoryResult<Option<Item>>;
    fn list_items(&self, query: ItemListQuery) -> RepositoryResult<(usize, Vec<Item>)>;
}

/// Write operations over catalog items.
pub trait ItemWriter {
    fn create_item(&self, new_item: &NewItem) -> RepositoryResult<Item>;
    fn update_item(&self, item_id: i32, updates: &UpdateItem) -> RepositoryResult<Item>;
    fn delete_item(&self, item_id: i32) -> RepositoryResult<()>;
}

/// Lookups of local shopper records.
pub trait UserReader {
    fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
}

/// Keeps local shopper records in sync with the auth service identity.
pub trait UserWriter {
    /// Insert the user or refresh the name of the existing `(hub_id, email)` record.
    fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only access to carts.
pub trait OrderReader {
    /// The user's open order with its lines and billing address.
    fn get_open_order(&self, user_id: i32) -> RepositoryResult<Option<Order>>;
}

/// Cart mutations. Each call runs in a single `BEGIN IMMEDIATE` transaction.
pub trait OrderWriter {
    /// Add one unit of `item_id`, opening an order when the user has none.
    fn add_item_to_cart(&self, user_id: i32, item_id: i32) -> RepositoryResult<CartUpdate>;
    /// Drop the whole line for `item_id` from the open order.
    fn remove_item_from_cart(&self, user_id: i32, item_id: i32) -> RepositoryResult<CartUpdate>;
    /// Remove one unit of `item_id`, dropping the line at the last unit.
    fn remove_single_item_from_cart(
        &self,
        user_id: i32,
        item_id: i32,
    ) -> RepositoryResult<CartUpdate>;
    /// Store a new billing address and point the order at it.
    fn attach_billing_address(
        &self,
        order_id: i32,
        address: &NewBillingAddress,
    ) -> RepositoryResult<Order>;
}
