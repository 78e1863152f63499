use actix_web::{Responder, get, patch, web};

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::forms::orders::{SellerOrdersQuery, StatusForm};
use crate::repository::DieselRepository;
use crate::routes::{respond, today};
use crate::services::seller_orders;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_seller_orders).service(update_order_status);
}

#[get("/seller/orders/")]
pub async fn list_seller_orders(
    params: web::Query<SellerOrdersQuery>,
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(seller_orders::list_seller_orders(
        repo.get_ref(),
        &access,
        &user,
        &params,
        today(),
    ))
}

#[patch("/seller/orders/{order_id}/status/")]
pub async fn update_order_status(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
    form: web::Json<StatusForm>,
) -> impl Responder {
    respond(seller_orders::update_order_status(
        repo.get_ref(),
        &access,
        &user,
        order_id.into_inner(),
        form.into_inner(),
    ))
}
