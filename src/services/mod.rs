//! Business operations shared by the HTTP handlers.

use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::domain::customer::CustomerProfile;
use crate::domain::order::StatusError;
use crate::domain::pricing::OfferPriceError;
use crate::forms::FormError;
use crate::repository::ProfileReader;

pub mod auth;
pub mod cart;
pub mod categories;
pub mod enquiries;
pub mod offers;
pub mod orders;
pub mod products;
pub mod profile;
pub mod seller_orders;
pub mod wishlist;

/// Result type returned by service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures a service can report to its caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Forbidden(String),
    #[error("Profile incomplete")]
    ProfileIncomplete,
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid input")]
    Validation(ValidationErrors),
    #[error("{0}")]
    Form(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn seller_required() -> Self {
        ServiceError::Forbidden("Seller access required".to_string())
    }

    pub fn form(message: impl Into<String>) -> Self {
        ServiceError::Form(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::not_found("Not found"),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(errors) => ServiceError::Validation(errors),
            FormError::Invalid(message) => ServiceError::Form(message),
        }
    }
}

impl From<StatusError> for ServiceError {
    fn from(err: StatusError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<OfferPriceError> for ServiceError {
    fn from(err: OfferPriceError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Map a repository `NotFound` to a message of the caller's choice.
pub(crate) fn not_found_as(message: &'static str) -> impl Fn(RepositoryError) -> ServiceError {
    move |err| match err {
        RepositoryError::NotFound => ServiceError::not_found(message),
        other => ServiceError::from(other),
    }
}

/// Reject callers that are not sellers.
pub fn ensure_seller(access: &SellerAccess, user: &AuthenticatedUser) -> ServiceResult<()> {
    if access.is_seller(user) {
        Ok(())
    } else {
        Err(ServiceError::seller_required())
    }
}

/// Profile of `user`, failing unless every shipping field is filled in.
pub fn require_complete_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CustomerProfile>
where
    R: ProfileReader + ?Sized,
{
    match repo.get_profile(user.id).map_err(ServiceError::from)? {
        Some(profile) if profile.is_complete() => Ok(profile),
        _ => Err(ServiceError::ProfileIncomplete),
    }
}
