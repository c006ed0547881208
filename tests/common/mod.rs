//! Helpers for integration tests.
#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};

use dshop::domain::category::{Category, NewCategory};
use dshop::domain::item::{Item, NewItem};
use dshop::domain::user::{NewUser, User};
use dshop::repository::{CategoryWriter, DieselRepository, ItemWriter, UserWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn seed_category(repo: &DieselRepository, title: &str) -> Category {
    repo.create_category(&NewCategory::new(title))
        .expect("create category")
}

pub fn seed_item(
    repo: &DieselRepository,
    category: &Category,
    title: &str,
    price_cents: i64,
    discount_price_cents: Option<i64>,
) -> Item {
    let mut new_item = NewItem::new(category.id, title, price_cents)
        .with_description(format!("Описание: {title}"));
    if let Some(discount) = discount_price_cents {
        new_item = new_item.with_discount_price(discount);
    }
    repo.create_item(&new_item).expect("create item")
}

pub fn seed_user(repo: &DieselRepository, email: &str) -> User {
    repo.upsert_user(&NewUser::new(1, "Покупатель".to_string(), email.to_string()))
        .expect("upsert user")
}
