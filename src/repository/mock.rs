use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, ItemReader, ItemWriter, OrderReader, OrderWriter, UserReader,
    UserWriter,
};
use crate::domain::{
    billing_address::NewBillingAddress,
    category::{Category, NewCategory},
    item::{Item, ItemListQuery, NewItem, UpdateItem},
    order::{CartUpdate, Order},
    user::{NewUser, User},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    }
}

mock! {
    pub ItemReader {}

    impl ItemReader for ItemReader {
        fn get_item_by_id(&self, id: i32) -> RepositoryResult<Option<Item>>;
        fn get_item_by_slug(&self, slug: &str) -> RepositoryResult<Option<Item>>;
        fn list_items(&self, query: ItemListQuery) -> RepositoryResult<(usize, Vec<Item>)>;
    }
}

mock! {
    pub ItemWriter {}

    impl ItemWriter for ItemWriter {
        fn create_item(&self, new_item: &NewItem) -> RepositoryResult<Item>;
        fn update_item(&self, item_id: i32, updates: &UpdateItem) -> RepositoryResult<Item>;
        fn delete_item(&self, item_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_open_order(&self, user_id: i32) -> RepositoryResult<Option<Order>>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn add_item_to_cart(&self, user_id: i32, item_id: i32) -> RepositoryResult<CartUpdate>;
        fn remove_item_from_cart(&self, user_id: i32, item_id: i32) -> RepositoryResult<CartUpdate>;
        fn remove_single_item_from_cart(&self, user_id: i32, item_id: i32) -> RepositoryResult<CartUpdate>;
        fn attach_billing_address(&self, order_id: i32, address: &NewBillingAddress) -> RepositoryResult<Order>;
    }
}
