use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, message, respond};
use crate::services::products;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments must be registered before `{product_id}`.
    cfg.service(list_inactive_products)
        .service(related_products)
        .service(list_products)
        .service(create_product)
        .service(get_product)
        .service(update_product)
        .service(delete_product);
}

#[get("/products/")]
pub async fn list_products(
    params: web::Query<products::ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(products::list_products(repo.get_ref(), params.into_inner()))
}

#[post("/products/")]
pub async fn create_product(
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), &access, &user, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(json!({
            "message": "Product created",
            "data": product,
        })),
        Err(err) => error_response(err),
    }
}

#[get("/products/inactive/")]
pub async fn list_inactive_products(
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(products::list_inactive_products(repo.get_ref(), &access, &user))
}

#[get("/products/related/{category}/{product_id}/")]
pub async fn related_products(
    path: web::Path<(String, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (category, product_id) = path.into_inner();
    respond(products::related_products(repo.get_ref(), &category, product_id))
}

#[get("/products/{product_id}/")]
pub async fn get_product(
    product_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(products::get_product(
        repo.get_ref(),
        &access,
        user.as_ref(),
        product_id.into_inner(),
    ))
}

#[put("/products/{product_id}/")]
pub async fn update_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    match products::update_product(
        repo.get_ref(),
        &access,
        &user,
        product_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(json!({
            "message": "Product updated",
            "data": product,
        })),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{product_id}/")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::delete_product(repo.get_ref(), &access, &user, product_id.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(message("Product deleted")),
        Err(err) => error_response(err),
    }
}
