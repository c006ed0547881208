use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::render_template;
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::shop_context;
use crate::services::catalog::HomeQuery;
use crate::services::{ServiceError, catalog as catalog_service};

#[get("/")]
pub async fn show_index(
    params: web::Query<HomeQuery>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_home_page(repo.get_ref(), params.into_inner()) {
        Ok(data) => {
            let mut context = shop_context(
                &flash_messages,
                user.as_ref(),
                "index",
                &server_config.auth_service_url,
            );
            context.insert("items", &data.items);
            context.insert("search", &data.search);
            context.insert("categories", &data.categories);
            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to list items: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/product/{slug}")]
pub async fn show_item(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_item_page(repo.get_ref(), &slug) {
        Ok(data) => {
            let mut context = shop_context(
                &flash_messages,
                user.as_ref(),
                "item",
                &server_config.auth_service_url,
            );
            context.insert("item", &data.item);
            context.insert("categories", &data.categories);
            render_template(&tera, "items/detail.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load item `{slug}`: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/category/{slug}")]
pub async fn show_category(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_category_page(repo.get_ref(), &slug) {
        Ok(data) => {
            let mut context = shop_context(
                &flash_messages,
                user.as_ref(),
                "category",
                &server_config.auth_service_url,
            );
            context.insert("category", &data.category);
            context.insert("items", &data.items);
            context.insert("categories", &data.categories);
            render_template(&tera, "categories/show.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load category `{slug}`: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
