use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::order::Order;
use crate::forms::checkout::CheckoutForm;
use crate::repository::{OrderReader, OrderWriter, UserReader};
use crate::services::cart::{OrderView, load_open_order};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the checkout template.
pub struct CheckoutPageData {
    /// The open order shown next to the form, if the user has one.
    pub order: Option<OrderView>,
}

/// Loads the checkout page.
pub fn load_checkout_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CheckoutPageData>
where
    R: UserReader + OrderReader + ?Sized,
{
    let order = load_open_order(repo, user)?.map(OrderView::from);
    Ok(CheckoutPageData { order })
}

/// Handles a checkout submission.
///
/// The open order is looked up before the form is decoded: without one the
/// call fails with `NotFound`. An invalid form yields `Form`. A valid form
/// stores a new billing address and attaches it to the open order, which
/// stays open.
pub fn submit_checkout<R>(repo: &R, user: &AuthenticatedUser, body: &[u8]) -> ServiceResult<Order>
where
    R: UserReader + OrderReader + OrderWriter + ?Sized,
{
    let order = load_open_order(repo, user)?.ok_or(ServiceError::NotFound)?;

    let payload = CheckoutForm::from_body(body)
        .and_then(|form| form.into_payload(order.user_id))
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    log::debug!(
        "Checkout for order {} with payment option {:?}",
        order.id,
        payload.payment_option
    );

    repo.attach_billing_address(order.id, &payload.address)
        .map_err(ServiceError::from)
}
