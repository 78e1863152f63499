use actix_web::{HttpResponse, Responder, get, patch, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{Order, OrderView};
use crate::forms::orders::{BuyNowForm, ShippingForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, today};
use crate::services::orders;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_orders)
        .service(buy_now)
        .service(checkout_cart)
        .service(get_order)
        .service(cancel_order);
}

fn views(orders: &[Order]) -> Vec<OrderView<'_>> {
    let date = today();
    orders.iter().map(|order| order.view(date)).collect()
}

fn view(order: &Order) -> OrderView<'_> {
    order.view(today())
}

#[get("/orders/")]
pub async fn list_orders(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::list_orders(repo.get_ref(), &user) {
        Ok(orders) => HttpResponse::Ok().json(views(&orders)),
        Err(err) => error_response(err),
    }
}

#[post("/orders/buy-now/")]
pub async fn buy_now(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<BuyNowForm>,
) -> impl Responder {
    match orders::buy_now(repo.get_ref(), &user, form.into_inner()) {
        Ok(order) => HttpResponse::Created().json(view(&order)),
        Err(err) => error_response(err),
    }
}

#[post("/orders/from-cart/")]
pub async fn checkout_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ShippingForm>,
) -> impl Responder {
    match orders::checkout_cart(repo.get_ref(), &user, form.into_inner()) {
        Ok(order) => HttpResponse::Created().json(view(&order)),
        Err(err) => error_response(err),
    }
}

#[get("/orders/{order_id}/")]
pub async fn get_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::get_order(repo.get_ref(), &user, order_id.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(view(&order)),
        Err(err) => error_response(err),
    }
}

#[patch("/orders/{order_id}/cancel/")]
pub async fn cancel_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders::cancel_order(repo.get_ref(), &user, order_id.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(view(&order)),
        Err(err) => error_response(err),
    }
}
