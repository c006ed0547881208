use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::item::{
        Item as DomainItem, ItemListQuery, NewItem as DomainNewItem,
        UpdateItem as DomainUpdateItem,
    },
    models::item::{Item as DbItem, NewItem as DbNewItem, UpdateItem as DbUpdateItem},
    repository::{DieselRepository, ItemReader, ItemWriter, unicode_lower},
};

impl ItemReader for DieselRepository {
    fn get_item_by_id(&self, id: i32) -> RepositoryResult<Option<DomainItem>> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let item = items::table
            .filter(items::id.eq(id))
            .first::<DbItem>(&mut conn)
            .optional()?;

        Ok(item.map(Into::into))
    }

    fn get_item_by_slug(&self, slug: &str) -> RepositoryResult<Option<DomainItem>> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let item = items::table
            .filter(items::slug.eq(slug))
            .first::<DbItem>(&mut conn)
            .optional()?;

        Ok(item.map(Into::into))
    }

    fn list_items(&self, query: ItemListQuery) -> RepositoryResult<(usize, Vec<DomainItem>)> {
        use crate::schema::items;

        let mut conn = self.conn()?;

        let search_pattern = query
            .search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(&term.to_lowercase())));

        let mut count_query = items::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            count_query = count_query.filter(items::category_id.eq(category_id));
        }

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                unicode_lower(items::title)
                    .like(pattern.clone())
                    .escape('\\')
                    .or(unicode_lower(items::description)
                        .like(pattern.clone())
                        .escape('\\')),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut rows = items::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            rows = rows.filter(items::category_id.eq(category_id));
        }

        if let Some(ref pattern) = search_pattern {
            rows = rows.filter(
                unicode_lower(items::title)
                    .like(pattern.clone())
                    .escape('\\')
                    .or(unicode_lower(items::description)
                        .like(pattern.clone())
                        .escape('\\')),
            );
        }

        rows = rows.order((items::category_id.asc(), items::id.asc()));

        if let Some(pagination) = &query.pagination {
            let offset = (pagination.page.max(1) - 1)
                .checked_mul(pagination.per_page)
                .and_then(|offset| i64::try_from(offset).ok());
            let Some(offset) = offset else {
                return Ok((total, Vec::new()));
            };
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            rows = rows.offset(offset).limit(limit);
        }

        let db_items = rows.load::<DbItem>(&mut conn)?;

        Ok((total, db_items.into_iter().map(Into::into).collect()))
    }
}

impl ItemWriter for DieselRepository {
    fn create_item(&self, new_item: &DomainNewItem) -> RepositoryResult<DomainItem> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let db_new = DbNewItem::from(new_item);

        let created = diesel::insert_into(items::table)
            .values(&db_new)
            .get_result::<DbItem>(&mut conn)?;

        Ok(created.into())
    }

    fn update_item(&self, item_id: i32, updates: &DomainUpdateItem) -> RepositoryResult<DomainItem> {
        use crate::schema::items;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateItem::from(updates);

        let updated = diesel::update(items::table.filter(items::id.eq(item_id)))
            .set(&db_updates)
            .get_result::<DbItem>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_item(&self, item_id: i32) -> RepositoryResult<()> {
        use crate::schema::{items, order_items};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(order_items::table.filter(order_items::item_id.eq(item_id)))
                .execute(conn)?;

            let deleted =
                diesel::delete(items::table.filter(items::id.eq(item_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

/// Escape LIKE wildcards so the term matches literally with `ESCAPE '\\'`.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
