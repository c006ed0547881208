use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::billing_address::BillingAddress;
use crate::domain::item::Item;

/// Line of a cart: a quantity of one catalog item owned by a user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderItem {
    /// Unique identifier of the line.
    pub id: i32,
    /// Order the line is attached to.
    pub order_id: i32,
    /// Owner of the line.
    pub user_id: i32,
    /// Catalog item referenced by the line.
    pub item: Item,
    /// Number of units, never below one.
    pub quantity: i32,
    /// Whether the line belongs to a finalized order.
    pub ordered: bool,
}

/// Line totals saturate at the `i64` bounds instead of overflowing.
impl OrderItem {
    /// Quantity multiplied by the regular price.
    pub fn total_item_price(&self) -> i64 {
        self.times_quantity(self.item.price_cents)
    }

    /// Quantity multiplied by the discount price, when the item has one.
    pub fn total_discount_item_price(&self) -> Option<i64> {
        self.item
            .discount_price_cents
            .map(|price| self.times_quantity(price))
    }

    /// Difference between the regular and the discounted total.
    pub fn amount_saved(&self) -> i64 {
        match self.item.active_discount_cents() {
            Some(price) => self
                .total_item_price()
                .saturating_sub(self.times_quantity(price)),
            None => 0,
        }
    }

    /// Amount charged for the line: the discounted total when a discount applies.
    pub fn final_price(&self) -> i64 {
        match self.item.active_discount_cents() {
            Some(price) => self.times_quantity(price),
            None => self.total_item_price(),
        }
    }

    fn times_quantity(&self, price_cents: i64) -> i64 {
        i64::from(self.quantity).saturating_mul(price_cents)
    }
}

/// Domain representation of an order; an open order is the user's cart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Owner of the order.
    pub user_id: i32,
    /// Timestamp for when the order was opened.
    pub start_date: NaiveDateTime,
    /// Timestamp recorded as the order date.
    pub ordered_date: NaiveDateTime,
    /// `false` while the order is still an open cart.
    pub ordered: bool,
    /// Billing address attached during checkout.
    pub billing_address: Option<BillingAddress>,
    /// Lines of the order.
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of the final prices of all lines.
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(OrderItem::final_price)
            .fold(0, i64::saturating_add)
    }

    /// Line referencing the catalog item with `item_id`, if present.
    pub fn find_item(&self, item_id: i32) -> Option<&OrderItem> {
        self.items.iter().find(|line| line.item.id == item_id)
    }
}

/// Outcome of a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    /// A new line was attached to the open order.
    Added,
    /// An existing line gained one unit.
    QuantityIncreased,
    /// An existing line lost one unit.
    QuantityDecreased,
    /// The line was removed from the open order.
    Removed,
    /// The open order does not contain the item.
    ItemNotInCart,
    /// The user has no open order.
    NoActiveOrder,
}
