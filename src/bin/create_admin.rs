//! Bootstrap a superuser from `ADMIN_USERNAME`, `ADMIN_EMAIL` and
//! `ADMIN_PASSWORD`. Does nothing when the username is already taken.

use std::env;

use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use storefront::models::config::ServerConfig;
use storefront::repository::DieselRepository;
use storefront::services::auth::create_admin;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let config = ServerConfig::from_env();
    let username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let email = env::var("ADMIN_EMAIL").unwrap_or_default();
    let Ok(password) = env::var("ADMIN_PASSWORD") else {
        log::error!("ADMIN_PASSWORD environment variable not set");
        std::process::exit(1);
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    match create_admin(&repo, &username, &email, &password) {
        Ok(Some(user)) => log::info!("Created superuser {} (id {})", user.username, user.id),
        Ok(None) => log::info!("User {username} already exists, nothing to do"),
        Err(e) => {
            log::error!("Failed to create superuser: {e}");
            std::process::exit(1);
        }
    }
}
