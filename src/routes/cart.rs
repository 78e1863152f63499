use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::cart::{AddToCartForm, RemoveCartQuery, UpdateCartForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, respond};
use crate::services::cart;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_cart)
        .service(add_to_cart)
        .service(update_cart)
        .service(remove_from_cart);
}

#[get("/cart/")]
pub async fn list_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(cart::list_cart(repo.get_ref(), &user))
}

#[post("/cart/add/")]
pub async fn add_to_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddToCartForm>,
) -> impl Responder {
    respond(cart::add_to_cart(repo.get_ref(), &user, form.into_inner()))
}

#[put("/cart/update/")]
pub async fn update_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateCartForm>,
) -> impl Responder {
    match cart::update_cart_item(repo.get_ref(), &user, form.into_inner()) {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[delete("/cart/remove/{product_id}/")]
pub async fn remove_from_cart(
    product_id: web::Path<i32>,
    query: web::Query<RemoveCartQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match cart::remove_from_cart(
        repo.get_ref(),
        &user,
        product_id.into_inner(),
        query.into_inner(),
    ) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
