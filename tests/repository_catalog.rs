use pushkind_common::repository::errors::RepositoryError;

use dshop::domain::item::{ItemLabel, ItemListQuery, UpdateItem};
use dshop::repository::{CategoryReader, ItemReader, ItemWriter, OrderWriter};

mod common;

#[test]
fn test_category_slug_is_transliterated() {
    let test_db = common::TestDb::new("test_category_slug_is_transliterated.db");
    let repo = test_db.repo();

    let category = common::seed_category(&repo, "Молочные продукты");
    assert_eq!(category.slug, "molochnye-produkty");

    let found = repo
        .get_category_by_slug("molochnye-produkty")
        .unwrap()
        .expect("category by slug");
    assert_eq!(found.id, category.id);
    assert_eq!(repo.get_category_by_id(category.id).unwrap(), Some(found));
    assert!(repo.get_category_by_slug("missing").unwrap().is_none());
}

#[test]
fn test_item_listing_search_and_pagination() {
    let test_db = common::TestDb::new("test_item_listing_search_and_pagination.db");
    let repo = test_db.repo();

    let drinks = common::seed_category(&repo, "Drinks");
    let food = common::seed_category(&repo, "Food");
    common::seed_item(&repo, &food, "Bread", 120, None);
    for title in ["Green Tea", "Black Tea", "Coffee", "Juice", "White Tea"] {
        common::seed_item(&repo, &drinks, title, 300, None);
    }

    let (total, page) = repo
        .list_items(ItemListQuery::new().paginate(1, 4))
        .unwrap();
    assert_eq!(total, 6);
    assert_eq!(page.len(), 4);
    assert!(page.iter().all(|item| item.category_id == drinks.id));

    let (_, last_page) = repo
        .list_items(ItemListQuery::new().paginate(2, 4))
        .unwrap();
    assert_eq!(last_page.len(), 2);
    assert_eq!(last_page[1].title, "Bread");

    let (total, found) = repo
        .list_items(ItemListQuery::new().search("tea"))
        .unwrap();
    assert_eq!(total, 3);
    assert!(found.iter().all(|item| item.title.ends_with("Tea")));

    let (total, found) = repo
        .list_items(ItemListQuery::new().search("Описание: Bread"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].title, "Bread");

    let (total, _) = repo
        .list_items(ItemListQuery::new().category_id(food.id))
        .unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_item_slug_is_stable_across_updates() {
    let test_db = common::TestDb::new("test_item_slug_is_stable_across_updates.db");
    let repo = test_db.repo();

    let category = common::seed_category(&repo, "Чай");
    let item = common::seed_item(&repo, &category, "Зелёный чай", 19990, Some(14990));
    assert_eq!(item.slug, "zelenyj-chaj");
    assert_eq!(item.label, ItemLabel::Primary);

    let updated = repo
        .update_item(
            item.id,
            &UpdateItem::new(
                category.id,
                "Улун",
                25000,
                None,
                ItemLabel::Danger,
                "Полуферментированный",
            )
            .with_image("zelenyj-chaj/zelenyj-chaj.png"),
        )
        .unwrap();

    assert_eq!(updated.slug, "zelenyj-chaj");
    assert_eq!(updated.title, "Улун");
    assert_eq!(updated.discount_price_cents, None);
    assert_eq!(updated.label, ItemLabel::Danger);
    assert_eq!(updated.image.as_deref(), Some("zelenyj-chaj/zelenyj-chaj.png"));

    let again = repo
        .update_item(
            item.id,
            &UpdateItem::new(category.id, "Улун", 26000, None, ItemLabel::Danger, ""),
        )
        .unwrap();
    assert_eq!(again.image.as_deref(), Some("zelenyj-chaj/zelenyj-chaj.png"));
    assert_eq!(again.slug, "zelenyj-chaj");
}

#[test]
fn test_item_delete_drops_cart_lines() {
    let test_db = common::TestDb::new("test_item_delete_drops_cart_lines.db");
    let repo = test_db.repo();

    let category = common::seed_category(&repo, "Drinks");
    let item = common::seed_item(&repo, &category, "Coffee", 300, None);
    let user = common::seed_user(&repo, "buyer@example.com");
    repo.add_item_to_cart(user.id, item.id).unwrap();

    repo.delete_item(item.id).unwrap();
    assert!(repo.get_item_by_id(item.id).unwrap().is_none());

    let err = repo
        .delete_item(item.id)
        .expect_err("expected missing item delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_item_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_item_search_treats_wildcards_literally.db");
    let repo = test_db.repo();

    let drinks = common::seed_category(&repo, "Drinks");
    common::seed_item(&repo, &drinks, "Green tea", 300, None);
    common::seed_item(&repo, &drinks, "Coffee 100%", 500, None);

    let (total, _) = repo
        .list_items(ItemListQuery::new().search("n_t"))
        .unwrap();
    assert_eq!(total, 0);

    let (total, found) = repo.list_items(ItemListQuery::new().search("%")).unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].title, "Coffee 100%");

    let (total, _) = repo
        .list_items(ItemListQuery::new().search("xyz%"))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_item_search_folds_cyrillic_case() {
    let test_db = common::TestDb::new("test_item_search_folds_cyrillic_case.db");
    let repo = test_db.repo();

    let category = common::seed_category(&repo, "Чай");
    common::seed_item(&repo, &category, "Зелёный Чай", 300, None);
    common::seed_item(&repo, &category, "Кофе", 500, None);

    let (total, found) = repo
        .list_items(ItemListQuery::new().search("ЗЕЛЁНЫЙ чай"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].title, "Зелёный Чай");

    let (total, _) = repo.list_items(ItemListQuery::new().search("кофе")).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_item_listing_with_huge_page_is_empty() {
    let test_db = common::TestDb::new("test_item_listing_with_huge_page_is_empty.db");
    let repo = test_db.repo();

    let category = common::seed_category(&repo, "Drinks");
    common::seed_item(&repo, &category, "Tea", 300, None);

    let (total, items) = repo
        .list_items(ItemListQuery::new().paginate(usize::MAX, 4))
        .unwrap();
    assert_eq!(total, 1);
    assert!(items.is_empty());
}
