use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use storefront::models::config::ServerConfig;
use storefront::repository::DieselRepository;
use storefront::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let secret_key = if config.secret.is_empty() {
        log::warn!("SECRET_KEY is not set, sessions will not survive a restart");
        Key::generate()
    } else {
        match Key::try_from(config.secret.as_bytes()) {
            Ok(key) => key,
            Err(e) => {
                log::error!("SECRET_KEY must be at least 64 bytes: {e}");
                std::process::exit(1);
            }
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);
    let seller_access = config.seller_access();

    let address = config.address.clone();
    let port = config.port;
    log::info!("Listening on {address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(config.cookie_secure)
                    .cookie_domain(config.domain.clone())
                    .build(),
            )
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(seller_access.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
