use std::env;

use crate::domain::auth::SellerAccess;

/// Runtime settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Session signing key; a random key is generated when empty.
    pub secret: String,
    /// Usernames granted seller-admin access.
    pub seller_usernames: String,
    pub cookie_secure: bool,
    /// Cookie domain; host-only cookies when unset.
    pub domain: Option<String>,
}

impl ServerConfig {
    /// Read `DATABASE_URL`, `ADDRESS`, `PORT`, `SECRET_KEY`,
    /// `SELLER_USERNAMES`, `COOKIE_SECURE` and `DOMAIN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let cookie_secure = lookup("COOKIE_SECURE")
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "app.db".to_string()),
            address: lookup("ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            secret: lookup("SECRET_KEY").unwrap_or_default(),
            seller_usernames: lookup("SELLER_USERNAMES").unwrap_or_else(|| "seller".to_string()),
            cookie_secure,
            domain: lookup("DOMAIN").filter(|value| !value.trim().is_empty()),
        }
    }

    pub fn seller_access(&self) -> SellerAccess {
        SellerAccess::from_list(&self.seller_usernames)
    }
}
