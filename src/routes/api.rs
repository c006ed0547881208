use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::catalog::{self as catalog_service, HomeQuery};

#[get("/v1/items")]
/// Return a JSON page of catalog items with optional search and pagination.
///
/// Accepts the same `s_field` and `page` parameters as the home page; pages
/// past the last one yield `404 Not Found`.
pub async fn api_v1_items(
    params: web::Query<HomeQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match catalog_service::load_items(repo.get_ref(), &params) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to list items: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
