use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{Order as DomainOrder, OrderItem as DomainOrderItem};
use crate::models::billing_address::BillingAddress;
use crate::models::item::Item;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub start_date: NaiveDateTime,
    pub ordered_date: NaiveDateTime,
    pub ordered: bool,
    pub billing_address_id: Option<i32>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub user_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub ordered: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder {
    pub user_id: i32,
    pub start_date: NaiveDateTime,
    pub ordered_date: NaiveDateTime,
}

impl NewOrder {
    pub fn open_for(user_id: i32) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            user_id,
            start_date: now,
            ordered_date: now,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub user_id: i32,
    pub item_id: i32,
    pub quantity: i32,
}

impl Order {
    pub fn into_domain(
        self,
        lines: Vec<(OrderItem, Item)>,
        billing_address: Option<BillingAddress>,
    ) -> DomainOrder {
        DomainOrder {
            id: self.id,
            user_id: self.user_id,
            start_date: self.start_date,
            ordered_date: self.ordered_date,
            ordered: self.ordered,
            billing_address: billing_address.map(Into::into),
            items: lines
                .into_iter()
                .map(|(line, item)| line.into_domain(item))
                .collect(),
        }
    }
}

impl OrderItem {
    pub fn into_domain(self, item: Item) -> DomainOrderItem {
        DomainOrderItem {
            id: self.id,
            order_id: self.order_id,
            user_id: self.user_id,
            item: item.into(),
            quantity: self.quantity,
            ordered: self.ordered,
        }
    }
}
