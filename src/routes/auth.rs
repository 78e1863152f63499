//! Seller login, logout and identity.

use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::forms::auth::SellerLoginForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, login_user, logout_user, message, respond};
use crate::services::auth;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(seller_login).service(seller_logout).service(seller_me);
}

#[post("/auth/login/")]
pub async fn seller_login(
    req: HttpRequest,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
    form: web::Json<SellerLoginForm>,
) -> impl Responder {
    let result = auth::seller_login(repo.get_ref(), &access, form.into_inner())
        .and_then(|user| login_user(&req, &user));

    match result {
        Ok(()) => HttpResponse::Ok().json(message("Login successful")),
        Err(err) => error_response(err),
    }
}

#[post("/auth/logout/")]
pub async fn seller_logout(identity: Option<Identity>) -> impl Responder {
    logout_user(identity);
    HttpResponse::Ok().json(message("Logout successful"))
}

#[get("/auth/me/")]
pub async fn seller_me(
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
) -> impl Responder {
    respond(auth::seller_me(&access, &user))
}
