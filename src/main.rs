use std::env;
use std::path::PathBuf;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};
use tera::Tera;

use dshop::ShopConfig;
use dshop::money::money_filter;
use dshop::repository::DieselRepository;
use dshop::routes::api::api_v1_items;
use dshop::routes::cart::{
    add_to_cart, remove_from_cart, remove_single_item_from_cart, show_order_summary,
};
use dshop::routes::catalog::{show_category, show_index, show_item};
use dshop::routes::checkout::{show_checkout, submit_checkout};
use dshop::routes::manage::{add_category, add_item, delete_item, edit_item, show_manage};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let auth_service_url = env::var("AUTH_SERVICE_URL");
    let auth_service_url = match auth_service_url {
        Ok(auth_service_url) => auth_service_url,
        Err(_) => {
            log::error!("AUTH_SERVICE_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let common_config = CommonServerConfig {
        secret: secret.unwrap_or_default(),
        auth_service_url,
    };

    let shop_config = ShopConfig {
        media_root: PathBuf::from(env::var("MEDIA_ROOT").unwrap_or("./media".to_string())),
    };
    if let Err(e) = std::fs::create_dir_all(&shop_config.media_root) {
        log::error!(
            "Failed to create media root {}: {e}",
            shop_config.media_root.display()
        );
        std::process::exit(1);
    }

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let mut tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };
    tera.register_filter("money", money_filter);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(Files::new("/media", shop_config.media_root.clone()))
            .service(not_assigned)
            .service(web::scope("/api").service(api_v1_items))
            .service(show_index)
            .service(show_item)
            .service(show_category)
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(add_to_cart)
                    .service(remove_from_cart)
                    .service(remove_single_item_from_cart)
                    .service(show_order_summary)
                    .service(show_checkout)
                    .service(submit_checkout)
                    .service(show_manage)
                    .service(add_category)
                    .service(add_item)
                    .service(edit_item)
                    .service(delete_item)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
            .app_data(web::Data::new(shop_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
