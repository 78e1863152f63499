use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::domain::enquiry::Enquiry;
use crate::forms::enquiries::EnquiryForm;
use crate::repository::{EnquiryReader, EnquiryWriter};
use crate::services::{ServiceError, ServiceResult, ensure_seller};

/// Store a contact-form message. Signed-in senders are linked to it.
pub fn submit_enquiry<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
    form: EnquiryForm,
) -> ServiceResult<Enquiry>
where
    R: EnquiryWriter + ?Sized,
{
    let new_enquiry = form.into_new_enquiry(user.map(|user| user.id))?;

    let enquiry = repo
        .create_enquiry(&new_enquiry)
        .map_err(ServiceError::from)?;
    log::info!("Enquiry {} received ({})", enquiry.id, enquiry.subject.as_str());
    Ok(enquiry)
}

pub fn list_customer_enquiries<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Enquiry>>
where
    R: EnquiryReader + ?Sized,
{
    repo.list_enquiries(Some(user.id))
        .map_err(ServiceError::from)
}

pub fn list_all_enquiries<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<Enquiry>>
where
    R: EnquiryReader + ?Sized,
{
    ensure_seller(access, user)?;
    repo.list_enquiries(None).map_err(ServiceError::from)
}
