use actix_web::{Responder, get, post, web};

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::forms::categories::AddCategoryForm;
use crate::repository::DieselRepository;
use crate::routes::{respond, respond_created};
use crate::services::categories;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_categories).service(create_category);
}

#[get("/categories/")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    respond(categories::list_categories(repo.get_ref()))
}

#[post("/categories/")]
pub async fn create_category(
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    respond_created(categories::create_category(
        repo.get_ref(),
        &access,
        &user,
        form.into_inner(),
    ))
}
