use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl NewUser {
    /// Customer account keyed by its normalised email address.
    #[must_use]
    pub fn customer(email: &str, name: String, password_hash: String) -> Self {
        let email = normalize_email(email);
        Self {
            username: email.clone(),
            email,
            name,
            password_hash,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Staff account with full access, used when bootstrapping a deployment.
    #[must_use]
    pub fn superuser(username: String, email: &str, password_hash: String) -> Self {
        Self {
            name: username.clone(),
            username,
            email: normalize_email(email),
            password_hash,
            is_staff: true,
            is_superuser: true,
        }
    }
}

/// Customers log in with their email; it is stored trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
