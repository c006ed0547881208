use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{redirect, render_template};
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::user_context;
use crate::services::cart::{self as cart_service, CartOutcome};
use crate::services::{ServiceError, ServiceResult};

fn cart_response(result: ServiceResult<CartOutcome>, slug: &str, action: &str) -> HttpResponse {
    match result {
        Ok(outcome) => {
            if outcome.changed {
                FlashMessage::info(outcome.message).send();
            } else {
                FlashMessage::warning(outcome.message).send();
            }
            redirect(&outcome.redirect_to)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to {action} `{slug}`: {err}");
            FlashMessage::error("Ошибка при обновлении корзины.").send();
            redirect(&cart_service::item_url(slug))
        }
    }
}

#[post("/add-to-cart/{slug}")]
pub async fn add_to_cart(
    slug: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = cart_service::add_to_cart(repo.get_ref(), &user, &slug);
    cart_response(result, &slug, "add to cart")
}

#[post("/remove-from-cart/{slug}")]
pub async fn remove_from_cart(
    slug: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = cart_service::remove_from_cart(repo.get_ref(), &user, &slug);
    cart_response(result, &slug, "remove from cart")
}

#[post("/remove-item-from-cart/{slug}")]
pub async fn remove_single_item_from_cart(
    slug: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = cart_service::remove_single_item_from_cart(repo.get_ref(), &user, &slug);
    cart_response(result, &slug, "decrement in cart")
}

#[get("/order-summary")]
pub async fn show_order_summary(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match cart_service::load_order_summary(repo.get_ref(), &user) {
        Ok(Some(order)) => {
            let mut context = user_context(
                &flash_messages,
                &user,
                "order-summary",
                &server_config.auth_service_url,
            );
            context.insert("order", &order);
            render_template(&tera, "cart/summary.html", &context)
        }
        Ok(None) => {
            FlashMessage::error("Нет активных товаров").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load order summary: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
