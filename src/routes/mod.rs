//! HTTP handlers. Every endpoint lives under `/api` and speaks JSON.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, web};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;

use crate::domain::auth::AuthenticatedUser;
use crate::services::{ServiceError, ServiceResult};

pub mod auth;
pub mod cart;
pub mod categories;
pub mod customer;
pub mod enquiries;
pub mod offers;
pub mod orders;
pub mod products;
pub mod seller_orders;
pub mod wishlist;

/// Register every endpoint under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(query_config())
            .configure(products::configure)
            .configure(categories::configure)
            .configure(offers::configure)
            .configure(cart::configure)
            .configure(wishlist::configure)
            .configure(orders::configure)
            .configure(seller_orders::configure)
            .configure(enquiries::configure)
            .configure(auth::configure)
            .configure(customer::configure),
    );
}

/// Malformed JSON bodies answer 400 with a `detail` message.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(detail(&err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(detail(&err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// `{"detail": message}` body used by every error and notice.
pub fn detail(message: &str) -> serde_json::Value {
    json!({ "detail": message })
}

/// `{"message": message}` body used by success notices.
pub fn message(message: &str) -> serde_json::Value {
    json!({ "message": message })
}

/// Translate a service failure into its HTTP response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized | ServiceError::InvalidCredentials => {
            HttpResponse::Unauthorized().json(detail(&err.to_string()))
        }
        ServiceError::Forbidden(_) | ServiceError::ProfileIncomplete => {
            HttpResponse::Forbidden().json(detail(&err.to_string()))
        }
        ServiceError::NotFound(message) => HttpResponse::NotFound().json(detail(&message)),
        ServiceError::Validation(errors) => HttpResponse::BadRequest().json(json!({
            "detail": "Invalid input",
            "errors": errors.field_errors(),
        })),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(detail(&message)),
        ServiceError::Internal(message) => {
            log::error!("Request failed: {message}");
            HttpResponse::InternalServerError().json(detail("Internal server error"))
        }
    }
}

/// `200 OK` with the serialized value, or the mapped error.
pub fn respond<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(err),
    }
}

/// `201 Created` with the serialized value, or the mapped error.
pub fn respond_created<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Created().json(value),
        Err(err) => error_response(err),
    }
}

/// Current date in UTC, the clock order timestamps are stored in.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Attach `user` to the session cookie.
pub fn login_user(req: &HttpRequest, user: &AuthenticatedUser) -> ServiceResult<()> {
    let payload = serde_json::to_string(user)
        .map_err(|err| ServiceError::Internal(format!("failed to encode identity: {err}")))?;
    Identity::login(&req.extensions(), payload)
        .map(|_| ())
        .map_err(|err| ServiceError::Internal(format!("failed to log in: {err}")))
}

/// Drop the identity from the session, if there is one.
pub fn logout_user(identity: Option<Identity>) {
    if let Some(identity) = identity {
        identity.logout();
    }
}

fn unauthorized() -> actix_web::Error {
    InternalError::from_response(
        "Authentication required",
        HttpResponse::Unauthorized().json(detail("Authentication required")),
    )
    .into()
}

/// Handlers taking `AuthenticatedUser` answer 401 for anonymous callers;
/// `Option<AuthenticatedUser>` accepts both.
impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
            .and_then(|id| match serde_json::from_str::<AuthenticatedUser>(&id) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::warn!("Discarding unreadable session identity: {err}");
                    None
                }
            });

        ready(user.ok_or_else(unauthorized))
    }
}
