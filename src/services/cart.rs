use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Serialize;

use crate::domain::billing_address::BillingAddress;
use crate::domain::item::Item;
use crate::domain::order::{CartUpdate, Order, OrderItem};
use crate::domain::user::NewUser;
use crate::repository::{ItemReader, OrderReader, OrderWriter, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Location of the cart summary page.
pub const ORDER_SUMMARY_URL: &str = "/order-summary";

const ITEM_ADDED: &str = "Этот товар был добавлен в вашу корзину.";
const QUANTITY_UPDATED: &str = "Количество товара было обновлено.";
const ITEM_REMOVED: &str = "Этот товар был удален из вашей корзины.";
const ITEM_NOT_IN_CART: &str = "Корзина товаров пуста.";
const NO_ACTIVE_ORDER: &str = "У вас нет активных заказов.";

/// Message and redirect target produced by a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOutcome {
    /// Flash message shown after the redirect.
    pub message: &'static str,
    /// Whether the mutation changed the cart.
    pub changed: bool,
    /// Location to redirect to.
    pub redirect_to: String,
}

impl CartOutcome {
    fn changed(message: &'static str) -> Self {
        Self {
            message,
            changed: true,
            redirect_to: ORDER_SUMMARY_URL.to_string(),
        }
    }

    fn unchanged(message: &'static str, item: &Item) -> Self {
        Self {
            message,
            changed: false,
            redirect_to: item_url(&item.slug),
        }
    }
}

/// Public URL of an item page.
pub fn item_url(slug: &str) -> String {
    format!("/product/{slug}")
}

/// Cart line prepared for the templates.
#[derive(Debug, Serialize)]
pub struct OrderItemView {
    pub id: i32,
    pub item: Item,
    pub quantity: i32,
    pub total_item_price: i64,
    pub total_discount_item_price: Option<i64>,
    pub amount_saved: i64,
    pub final_price: i64,
}

impl From<OrderItem> for OrderItemView {
    fn from(line: OrderItem) -> Self {
        Self {
            id: line.id,
            total_item_price: line.total_item_price(),
            total_discount_item_price: line
                .item
                .active_discount_cents()
                .and(line.total_discount_item_price()),
            amount_saved: line.amount_saved(),
            final_price: line.final_price(),
            quantity: line.quantity,
            item: line.item,
        }
    }
}

/// Open order prepared for the templates.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: i32,
    pub start_date: NaiveDateTime,
    pub billing_address: Option<BillingAddress>,
    pub items: Vec<OrderItemView>,
    pub total: i64,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let total = order.total();
        Self {
            id: order.id,
            start_date: order.start_date,
            billing_address: order.billing_address,
            items: order.items.into_iter().map(OrderItemView::from).collect(),
            total,
        }
    }
}

fn find_item<R>(repo: &R, slug: &str) -> ServiceResult<Item>
where
    R: ItemReader + ?Sized,
{
    repo.get_item_by_slug(slug)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Adds one unit of the item to the user's cart, opening an order when needed.
pub fn add_to_cart<R>(repo: &R, user: &AuthenticatedUser, slug: &str) -> ServiceResult<CartOutcome>
where
    R: ItemReader + UserWriter + OrderWriter + ?Sized,
{
    let item = find_item(repo, slug)?;
    let shopper = repo
        .upsert_user(&NewUser::from(user))
        .map_err(ServiceError::from)?;

    let update = repo
        .add_item_to_cart(shopper.id, item.id)
        .map_err(ServiceError::from)?;

    let message = match update {
        CartUpdate::QuantityIncreased => QUANTITY_UPDATED,
        _ => ITEM_ADDED,
    };

    Ok(CartOutcome::changed(message))
}

/// Drops the whole line of the item from the user's open order.
pub fn remove_from_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    slug: &str,
) -> ServiceResult<CartOutcome>
where
    R: ItemReader + UserReader + OrderWriter + ?Sized,
{
    let item = find_item(repo, slug)?;
    let Some(shopper) = repo
        .get_user_by_email(&user.email, user.hub_id)
        .map_err(ServiceError::from)?
    else {
        return Ok(CartOutcome::unchanged(NO_ACTIVE_ORDER, &item));
    };

    let update = repo
        .remove_item_from_cart(shopper.id, item.id)
        .map_err(ServiceError::from)?;

    Ok(match update {
        CartUpdate::NoActiveOrder => CartOutcome::unchanged(NO_ACTIVE_ORDER, &item),
        CartUpdate::ItemNotInCart => CartOutcome::unchanged(ITEM_NOT_IN_CART, &item),
        _ => CartOutcome::changed(ITEM_REMOVED),
    })
}

/// Removes one unit of the item; the line disappears with its last unit.
pub fn remove_single_item_from_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    slug: &str,
) -> ServiceResult<CartOutcome>
where
    R: ItemReader + UserReader + OrderWriter + ?Sized,
{
    let item = find_item(repo, slug)?;
    let Some(shopper) = repo
        .get_user_by_email(&user.email, user.hub_id)
        .map_err(ServiceError::from)?
    else {
        return Ok(CartOutcome::unchanged(NO_ACTIVE_ORDER, &item));
    };

    let update = repo
        .remove_single_item_from_cart(shopper.id, item.id)
        .map_err(ServiceError::from)?;

    Ok(match update {
        CartUpdate::NoActiveOrder => CartOutcome::unchanged(NO_ACTIVE_ORDER, &item),
        CartUpdate::ItemNotInCart => CartOutcome::unchanged(ITEM_NOT_IN_CART, &item),
        _ => CartOutcome::changed(QUANTITY_UPDATED),
    })
}

/// Loads the user's open order, if any.
pub fn load_open_order<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Option<Order>>
where
    R: UserReader + OrderReader + ?Sized,
{
    let Some(shopper) = repo
        .get_user_by_email(&user.email, user.hub_id)
        .map_err(ServiceError::from)?
    else {
        return Ok(None);
    };

    repo.get_open_order(shopper.id).map_err(ServiceError::from)
}

/// Loads the cart summary. `None` when the user has no open order.
pub fn load_order_summary<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Option<OrderView>>
where
    R: UserReader + OrderReader + ?Sized,
{
    Ok(load_open_order(repo, user)?.map(OrderView::from))
}
