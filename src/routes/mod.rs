use actix_web_flash_messages::{IncomingFlashMessages, Level};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::{base_context, check_role};
use serde::Serialize;
use tera::Context;

use crate::SERVICE_ACCESS_ROLE;

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod manage;

/// Flash message prepared for the base template.
#[derive(Serialize)]
struct Alert<'a> {
    message: &'a str,
    level: &'static str,
}

/// Signed-in shopper as seen by the templates.
#[derive(Serialize)]
struct CurrentUser<'a> {
    name: &'a str,
    email: &'a str,
    can_manage: bool,
}

fn alert_level(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<Alert<'_>> {
    flash_messages
        .iter()
        .map(|message| Alert {
            message: message.content(),
            level: alert_level(message.level()),
        })
        .collect()
}

/// Writes the keys `base.html` reads, replacing any of the same name.
fn insert_shop_keys(
    context: &mut Context,
    alerts: &[Alert],
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    auth_service_url: &str,
) {
    let current_user = user.map(|user| CurrentUser {
        name: &user.name,
        email: &user.email,
        can_manage: check_role(SERVICE_ACCESS_ROLE, &user.roles),
    });

    context.insert("alerts", alerts);
    context.insert("current_user", &current_user);
    context.insert("current_page", current_page);
    context.insert("auth_service_url", auth_service_url);
}

/// Context for public catalog pages, where `user` may be absent.
pub fn shop_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    auth_service_url: &str,
) -> Context {
    let alerts = collect_alerts(flash_messages);
    let mut context = Context::new();
    insert_shop_keys(&mut context, &alerts, user, current_page, auth_service_url);
    context
}

/// Context for pages behind authentication: the common hub context plus the
/// shop navigation keys.
pub fn user_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    auth_service_url: &str,
) -> Context {
    let mut context = base_context(flash_messages, user, current_page, auth_service_url);
    let alerts = collect_alerts(flash_messages);
    insert_shop_keys(&mut context, &alerts, Some(user), current_page, auth_service_url);
    context
}
