use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::forms::offers::OfferForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, message, respond, respond_created};
use crate::services::offers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_visible_offers)
        .service(list_all_offers)
        .service(create_offer)
        .service(get_offer)
        .service(update_offer)
        .service(delete_offer);
}

#[get("/offers/")]
pub async fn list_visible_offers(repo: web::Data<DieselRepository>) -> impl Responder {
    respond(offers::list_visible_offers(repo.get_ref()))
}

#[get("/seller/offers/")]
pub async fn list_all_offers(
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(offers::list_all_offers(repo.get_ref(), &access, &user))
}

#[post("/seller/offers/")]
pub async fn create_offer(
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
    form: web::Json<OfferForm>,
) -> impl Responder {
    respond_created(offers::create_offer(
        repo.get_ref(),
        &access,
        &user,
        form.into_inner(),
    ))
}

#[get("/seller/offers/{offer_id}/")]
pub async fn get_offer(
    offer_id: web::Path<i32>,
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(offers::get_offer(
        repo.get_ref(),
        &access,
        &user,
        offer_id.into_inner(),
    ))
}

#[put("/seller/offers/{offer_id}/")]
pub async fn update_offer(
    offer_id: web::Path<i32>,
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
    form: web::Json<OfferForm>,
) -> impl Responder {
    respond(offers::update_offer(
        repo.get_ref(),
        &access,
        &user,
        offer_id.into_inner(),
        form.into_inner(),
    ))
}

#[delete("/seller/offers/{offer_id}/")]
pub async fn delete_offer(
    offer_id: web::Path<i32>,
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match offers::delete_offer(repo.get_ref(), &access, &user, offer_id.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(message("Offer deleted")),
        Err(err) => error_response(err),
    }
}
