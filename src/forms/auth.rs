use serde::Deserialize;
use validator::Validate;

use crate::domain::user::normalize_email;
use crate::forms::{FormError, FormResult, sanitize_inline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = 150;
const EMAIL_MAX_LEN_VALIDATOR: u64 = 254;
const PASSWORD_MAX_LEN_VALIDATOR: u64 = 128;

/// Username and password pair after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Seller login payload.
#[derive(Debug, Default, Deserialize)]
pub struct SellerLoginForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl SellerLoginForm {
    pub fn into_credentials(self) -> FormResult<Credentials> {
        let username = self.username.map(|value| value.trim().to_string());
        match (username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok(Credentials { username, password })
            }
            _ => Err(FormError::invalid("Username and password required")),
        }
    }
}

/// Customer login payload; the email doubles as the username.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerLoginForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CustomerLoginForm {
    pub fn into_credentials(self) -> FormResult<Credentials> {
        let email = self.email.as_deref().map(normalize_email);
        match (email, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok(Credentials { username, password })
            }
            _ => Err(FormError::invalid("Email and password required")),
        }
    }
}

/// Registration data ready for hashing and storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Customer registration payload.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(email, length(max = EMAIL_MAX_LEN_VALIDATOR))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = PASSWORD_MAX_LEN_VALIDATOR))]
    pub password: Option<String>,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl RegisterForm {
    pub fn into_registration(self) -> FormResult<Registration> {
        let name = self
            .name
            .as_deref()
            .map(sanitize_inline_text)
            .unwrap_or_default();
        let email = self.email.as_deref().map(normalize_email).unwrap_or_default();
        let password = self.password.clone().unwrap_or_default();
        let confirm = self.confirm_password.clone().unwrap_or_default();

        if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(FormError::invalid("All fields required"));
        }
        if password != confirm {
            return Err(FormError::invalid("Passwords do not match"));
        }

        let normalized = RegisterForm {
            email: Some(email.clone()),
            ..self
        };
        normalized.validate()?;

        Ok(Registration {
            name,
            email,
            password,
        })
    }
}
