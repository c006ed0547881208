use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::{
        billing_address::NewBillingAddress as DomainNewBillingAddress,
        order::{CartUpdate, Order as DomainOrder},
    },
    models::{
        billing_address::{
            BillingAddress as DbBillingAddress, NewBillingAddress as DbNewBillingAddress,
        },
        item::Item as DbItem,
        order::{NewOrder, NewOrderItem, Order as DbOrder, OrderItem as DbOrderItem},
    },
    repository::{DieselRepository, OrderReader, OrderWriter},
};

impl OrderReader for DieselRepository {
    fn get_open_order(&self, user_id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let order = orders::table
            .filter(orders::user_id.eq(user_id))
            .filter(orders::ordered.eq(false))
            .order(orders::id.asc())
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        Ok(Some(load_order_details(&mut conn, order)?))
    }
}

impl OrderWriter for DieselRepository {
    fn add_item_to_cart(&self, user_id: i32, item_id: i32) -> RepositoryResult<CartUpdate> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<CartUpdate, RepositoryError, _>(|conn| {
            let order_id = match open_order_id(conn, user_id)? {
                Some(order_id) => order_id,
                None => diesel::insert_into(orders::table)
                    .values(&NewOrder::open_for(user_id))
                    .returning(orders::id)
                    .get_result::<i32>(conn)?,
            };

            let line = order_items::table
                .filter(order_items::user_id.eq(user_id))
                .filter(order_items::item_id.eq(item_id))
                .filter(order_items::ordered.eq(false))
                .first::<DbOrderItem>(conn)
                .optional()?;

            match line {
                Some(line) if line.order_id == order_id => {
                    diesel::update(order_items::table.filter(order_items::id.eq(line.id)))
                        .set(order_items::quantity.eq(order_items::quantity + 1))
                        .execute(conn)?;
                    Ok(CartUpdate::QuantityIncreased)
                }
                Some(line) => {
                    // Open line left over from an order that is no longer open.
                    diesel::update(order_items::table.filter(order_items::id.eq(line.id)))
                        .set(order_items::order_id.eq(order_id))
                        .execute(conn)?;
                    Ok(CartUpdate::Added)
                }
                None => {
                    diesel::insert_into(order_items::table)
                        .values(&NewOrderItem {
                            order_id,
                            user_id,
                            item_id,
                            quantity: 1,
                        })
                        .execute(conn)?;
                    Ok(CartUpdate::Added)
                }
            }
        })
    }

    fn remove_item_from_cart(&self, user_id: i32, item_id: i32) -> RepositoryResult<CartUpdate> {
        use crate::schema::order_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<CartUpdate, RepositoryError, _>(|conn| {
            let Some(order_id) = open_order_id(conn, user_id)? else {
                return Ok(CartUpdate::NoActiveOrder);
            };

            let Some(line) = find_open_line(conn, order_id, item_id)? else {
                return Ok(CartUpdate::ItemNotInCart);
            };

            diesel::delete(order_items::table.filter(order_items::id.eq(line.id)))
                .execute(conn)?;

            Ok(CartUpdate::Removed)
        })
    }

    fn remove_single_item_from_cart(
        &self,
        user_id: i32,
        item_id: i32,
    ) -> RepositoryResult<CartUpdate> {
        use crate::schema::order_items;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<CartUpdate, RepositoryError, _>(|conn| {
            let Some(order_id) = open_order_id(conn, user_id)? else {
                return Ok(CartUpdate::NoActiveOrder);
            };

            let Some(line) = find_open_line(conn, order_id, item_id)? else {
                return Ok(CartUpdate::ItemNotInCart);
            };

            if line.quantity > 1 {
                diesel::update(order_items::table.filter(order_items::id.eq(line.id)))
                    .set(order_items::quantity.eq(order_items::quantity - 1))
                    .execute(conn)?;
                Ok(CartUpdate::QuantityDecreased)
            } else {
                diesel::delete(order_items::table.filter(order_items::id.eq(line.id)))
                    .execute(conn)?;
                Ok(CartUpdate::Removed)
            }
        })
    }

    fn attach_billing_address(
        &self,
        order_id: i32,
        address: &DomainNewBillingAddress,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::{billing_addresses, orders};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(billing_addresses::table)
                .values(&DbNewBillingAddress::from(address))
                .get_result::<DbBillingAddress>(conn)?;

            let target = orders::table
                .filter(orders::id.eq(order_id))
                .filter(orders::user_id.eq(address.user_id));

            let updated = diesel::update(target)
                .set(orders::billing_address_id.eq(Some(created.id)))
                .get_result::<DbOrder>(conn)?;

            load_order_details(conn, updated)
        })
    }
}

fn open_order_id(conn: &mut SqliteConnection, user_id: i32) -> RepositoryResult<Option<i32>> {
    use crate::schema::orders;

    let order_id = orders::table
        .filter(orders::user_id.eq(user_id))
        .filter(orders::ordered.eq(false))
        .order(orders::id.asc())
        .select(orders::id)
        .first::<i32>(conn)
        .optional()?;

    Ok(order_id)
}

fn find_open_line(
    conn: &mut SqliteConnection,
    order_id: i32,
    item_id: i32,
) -> RepositoryResult<Option<DbOrderItem>> {
    use crate::schema::order_items;

    let line = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .filter(order_items::item_id.eq(item_id))
        .filter(order_items::ordered.eq(false))
        .first::<DbOrderItem>(conn)
        .optional()?;

    Ok(line)
}

fn load_order_details(
    conn: &mut SqliteConnection,
    order: DbOrder,
) -> RepositoryResult<DomainOrder> {
    use crate::schema::{billing_addresses, items, order_items};

    let lines = order_items::table
        .inner_join(items::table)
        .filter(order_items::order_id.eq(order.id))
        .order(order_items::id.asc())
        .load::<(DbOrderItem, DbItem)>(conn)?;

    let billing_address = match order.billing_address_id {
        Some(address_id) => billing_addresses::table
            .filter(billing_addresses::id.eq(address_id))
            .first::<DbBillingAddress>(conn)
            .optional()?,
        None => None,
    };

    Ok(order.into_domain(lines, billing_address))
}
