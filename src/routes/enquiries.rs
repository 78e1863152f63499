use actix_web::{Responder, get, post, web};

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::forms::enquiries::EnquiryForm;
use crate::repository::DieselRepository;
use crate::routes::{respond, respond_created};
use crate::services::enquiries;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_enquiry)
        .service(list_customer_enquiries)
        .service(list_all_enquiries);
}

#[post("/enquiry/")]
pub async fn submit_enquiry(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EnquiryForm>,
) -> impl Responder {
    respond_created(enquiries::submit_enquiry(
        repo.get_ref(),
        user.as_ref(),
        form.into_inner(),
    ))
}

#[get("/customer/enquiries/")]
pub async fn list_customer_enquiries(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(enquiries::list_customer_enquiries(repo.get_ref(), &user))
}

#[get("/seller/enquiries/")]
pub async fn list_all_enquiries(
    user: AuthenticatedUser,
    access: web::Data<SellerAccess>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(enquiries::list_all_enquiries(repo.get_ref(), &access, &user))
}
