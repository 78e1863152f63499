//! Customer accounts and profile.

use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, put, web};
use serde_json::json;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::{CustomerLoginForm, RegisterForm};
use crate::forms::profile::ProfileForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, login_user, logout_user, message, respond};
use crate::services::{auth, profile};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(customer_login)
        .service(customer_logout)
        .service(customer_me)
        .service(get_profile)
        .service(update_profile);
}

#[post("/customer/register/")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    form: web::Json<RegisterForm>,
) -> impl Responder {
    match auth::register_customer(repo.get_ref(), form.into_inner()) {
        Ok(_) => HttpResponse::Created().json(message("Registration successful")),
        Err(err) => error_response(err),
    }
}

#[post("/customer/login/")]
pub async fn customer_login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    form: web::Json<CustomerLoginForm>,
) -> impl Responder {
    let result = auth::customer_login(repo.get_ref(), form.into_inner())
        .and_then(|user| login_user(&req, &user).map(|()| user));

    match result {
        Ok(user) => HttpResponse::Ok().json(json!({
            "message": "Login successful",
            "user": { "email": user.email, "name": user.name },
        })),
        Err(err) => error_response(err),
    }
}

#[post("/customer/logout/")]
pub async fn customer_logout(identity: Option<Identity>) -> impl Responder {
    logout_user(identity);
    HttpResponse::Ok().json(message("Logout successful"))
}

#[get("/customer/me/")]
pub async fn customer_me(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(auth::customer_me(repo.get_ref(), user.as_ref()))
}

#[get("/customer/profile/")]
pub async fn get_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(profile::load_profile(repo.get_ref(), &user))
}

#[put("/customer/profile/")]
pub async fn update_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ProfileForm>,
) -> impl Responder {
    respond(profile::update_profile(repo.get_ref(), &user, form.into_inner()))
}
