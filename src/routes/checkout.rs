use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{redirect, render_template};
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::user_context;
use crate::services::cart::ORDER_SUMMARY_URL;
use crate::services::{ServiceError, checkout as checkout_service};

#[get("/checkout")]
pub async fn show_checkout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match checkout_service::load_checkout_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = user_context(
                &flash_messages,
                &user,
                "checkout",
                &server_config.auth_service_url,
            );
            context.insert("order", &data.order);
            render_template(&tera, "checkout/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load checkout page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/checkout")]
pub async fn submit_checkout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    match checkout_service::submit_checkout(repo.get_ref(), &user, &body) {
        Ok(order) => {
            log::info!("Billing address attached to order {}", order.id);
            FlashMessage::success("Адрес доставки сохранён.").send();
            redirect("/checkout")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Нет активных товаров").send();
            redirect(ORDER_SUMMARY_URL)
        }
        Err(ServiceError::Form(message)) => {
            log::debug!("Rejected checkout form: {message}");
            FlashMessage::warning("Отмена заказа").send();
            redirect("/checkout")
        }
        Err(err) => {
            log::error!("Failed to submit checkout: {err}");
            FlashMessage::error("Ошибка при оформлении заказа.").send();
            redirect("/checkout")
        }
    }
}
