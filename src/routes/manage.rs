use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{redirect, render_template};
use tera::Tera;

use crate::ShopConfig;
use crate::forms::catalog::{AddCategoryForm, AddItemForm, EditItemForm};
use crate::repository::DieselRepository;
use crate::routes::user_context;
use crate::services::{ServiceError, manage as manage_service};

#[get("/manage")]
pub async fn show_manage(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match manage_service::load_manage_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = user_context(
                &flash_messages,
                &user,
                "manage",
                &server_config.auth_service_url,
            );
            context.insert("categories", &data.categories);
            context.insert("items", &data.items);
            render_template(&tera, "manage/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load catalog management page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/manage/categories/add")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    match manage_service::create_category(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Категория добавлена.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Категория с таким названием уже существует.").send();
        }
        Err(err) => {
            log::error!("Failed to add a category: {err}");
            FlashMessage::error("Ошибка при добавлении категории.").send();
        }
    }
    redirect("/manage")
}

#[post("/manage/items/add")]
pub async fn add_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    shop_config: web::Data<ShopConfig>,
    MultipartForm(form): MultipartForm<AddItemForm>,
) -> impl Responder {
    match manage_service::create_item(repo.get_ref(), &user, form, &shop_config.media_root) {
        Ok(_) => {
            FlashMessage::success("Товар добавлен.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Товар с таким названием уже существует.").send();
        }
        Err(err) => {
            log::error!("Failed to add an item: {err}");
            FlashMessage::error("Ошибка при добавлении товара.").send();
        }
    }
    redirect("/manage")
}

#[post("/manage/items/edit")]
pub async fn edit_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    shop_config: web::Data<ShopConfig>,
    MultipartForm(form): MultipartForm<EditItemForm>,
) -> impl Responder {
    match manage_service::modify_item(repo.get_ref(), &user, form, &shop_config.media_root) {
        Ok(_) => {
            FlashMessage::success("Товар обновлён.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update an item: {err}");
            FlashMessage::error("Ошибка при обновлении товара.").send();
        }
    }
    redirect("/manage")
}

#[post("/manage/items/{item_id}/delete")]
pub async fn delete_item(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match manage_service::remove_item(repo.get_ref(), &user, item_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Товар удалён.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
        }
        Err(err) => {
            log::error!("Failed to delete an item: {err}");
            FlashMessage::error("Ошибка при удалении товара.").send();
        }
    }
    redirect("/manage")
}
