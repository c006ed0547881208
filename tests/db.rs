use diesel::prelude::*;

use dshop::models::order::NewOrder;
use dshop::schema::orders;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let base = "test_creates_and_removes_db_files.db";

    {
        let test_db = common::TestDb::new(base);
        assert!(test_db.pool().get().is_ok());
    }

    assert!(!std::path::Path::new(base).exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}

#[test]
fn test_single_open_order_per_user() {
    let test_db = common::TestDb::new("test_single_open_order_per_user.db");
    let repo = test_db.repo();
    let user = common::seed_user(&repo, "buyer@example.com");

    let mut conn = test_db.pool().get().unwrap();

    let first = diesel::insert_into(orders::table)
        .values(&NewOrder::open_for(user.id))
        .returning(orders::id)
        .get_result::<i32>(&mut conn)
        .unwrap();

    let duplicate = diesel::insert_into(orders::table)
        .values(&NewOrder::open_for(user.id))
        .execute(&mut conn);
    assert!(duplicate.is_err());

    diesel::update(orders::table.filter(orders::id.eq(first)))
        .set(orders::ordered.eq(true))
        .execute(&mut conn)
        .unwrap();

    let reopened = diesel::insert_into(orders::table)
        .values(&NewOrder::open_for(user.id))
        .execute(&mut conn);
    assert!(reopened.is_ok());
}
