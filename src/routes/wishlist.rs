use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::cart::AddToCartForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, respond};
use crate::services::wishlist;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_wishlist)
        .service(add_to_wishlist)
        .service(remove_from_wishlist);
}

#[get("/wishlist/")]
pub async fn list_wishlist(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(wishlist::list_wishlist(repo.get_ref(), &user))
}

#[post("/wishlist/add/")]
pub async fn add_to_wishlist(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddToCartForm>,
) -> impl Responder {
    respond(wishlist::add_to_wishlist(repo.get_ref(), &user, form.into_inner()))
}

#[delete("/wishlist/remove/{product_id}/")]
pub async fn remove_from_wishlist(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match wishlist::remove_from_wishlist(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
