//! Login, registration and identity lookups.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::Serialize;

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::domain::user::{NewUser, User};
use crate::forms::auth::{CustomerLoginForm, RegisterForm, SellerLoginForm};
use crate::repository::{ProfileReader, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_seller};

/// Body of the seller `me` endpoint.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SellerMe {
    pub authenticated: bool,
    pub username: String,
}

/// Body of the customer `me` endpoint.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CustomerMe {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_complete: Option<bool>,
}

/// Hash `password` into an argon2 PHC string.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Internal(format!("failed to hash password: {err}")))
}

/// Check `password` against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password_hash: &str, password: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            log::warn!("Stored password hash could not be parsed: {err}");
            false
        }
    }
}

fn authenticate<R>(repo: &R, username: &str, password: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let user = repo
        .get_user_by_username(username)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::InvalidCredentials)?;

    if !verify_password(&user.password_hash, password) {
        return Err(ServiceError::InvalidCredentials);
    }

    Ok(user)
}

/// Seller login. Only staff, superusers and allow-listed usernames may
/// open a seller session.
pub fn seller_login<R>(
    repo: &R,
    access: &SellerAccess,
    form: SellerLoginForm,
) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + ?Sized,
{
    let credentials = form.into_credentials()?;
    let user = authenticate(repo, &credentials.username, &credentials.password)?;

    if !access.is_seller_account(user.is_staff, user.is_superuser, &user.username) {
        return Err(ServiceError::seller_required());
    }

    log::info!("Seller {} logged in", user.username);
    Ok(AuthenticatedUser::from_user(&user, true))
}

/// Customer login with email and password.
pub fn customer_login<R>(repo: &R, form: CustomerLoginForm) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + ?Sized,
{
    let credentials = form.into_credentials()?;
    let user = authenticate(repo, &credentials.username, &credentials.password)?;

    Ok(AuthenticatedUser::from_user(&user, false))
}

/// Register a customer together with an empty profile.
pub fn register_customer<R>(repo: &R, form: RegisterForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let registration = form.into_registration()?;

    if repo
        .get_user_by_username(&registration.email)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::form("User already exists"));
    }

    let password_hash = hash_password(&registration.password)?;
    let new_user = NewUser::customer(&registration.email, registration.name, password_hash);

    // The lookup above can race another registration; the unique username
    // settles it.
    let user = repo
        .create_customer(&new_user)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::form("User already exists"))?;
    log::info!("Registered customer {}", user.username);
    Ok(user)
}

pub fn seller_me(access: &SellerAccess, user: &AuthenticatedUser) -> ServiceResult<SellerMe> {
    ensure_seller(access, user)?;
    Ok(SellerMe {
        authenticated: true,
        username: user.username.clone(),
    })
}

/// Identity summary for the storefront; anonymous callers get
/// `authenticated: false` instead of an error.
pub fn customer_me<R>(repo: &R, user: Option<&AuthenticatedUser>) -> ServiceResult<CustomerMe>
where
    R: ProfileReader + ?Sized,
{
    let Some(user) = user else {
        return Ok(CustomerMe {
            authenticated: false,
            email: None,
            name: None,
            profile_complete: None,
        });
    };

    let profile_complete = repo
        .get_profile(user.id)
        .map_err(ServiceError::from)?
        .is_some_and(|profile| profile.is_complete());

    Ok(CustomerMe {
        authenticated: true,
        email: Some(user.email.clone()),
        name: Some(user.name.clone()),
        profile_complete: Some(profile_complete),
    })
}

/// Create a superuser unless the username is taken. Returns `None` when the
/// account already exists.
pub fn create_admin<R>(
    repo: &R,
    username: &str,
    email: &str,
    password: &str,
) -> ServiceResult<Option<User>>
where
    R: UserReader + UserWriter + ?Sized,
{
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ServiceError::form("Username and password required"));
    }

    if repo
        .get_user_by_username(username)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Ok(None);
    }

    let password_hash = hash_password(password)?;
    let new_user = NewUser::superuser(username.to_string(), email, password_hash);
    repo.create_user(&new_user)
        .map(Some)
        .map_err(ServiceError::from)
}
