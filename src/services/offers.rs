use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::domain::offer::{Offer, OfferListQuery};
use crate::domain::pricing::{Money, check_offer_price};
use crate::forms::offers::OfferForm;
use crate::repository::{OfferReader, OfferWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult, ensure_seller, not_found_as};

/// Offers shown on the storefront: active offers on active products.
pub fn list_visible_offers<R>(repo: &R) -> ServiceResult<Vec<Offer>>
where
    R: OfferReader + ?Sized,
{
    repo.list_offers(OfferListQuery::Visible)
        .map_err(ServiceError::from)
}

pub fn list_all_offers<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<Offer>>
where
    R: OfferReader + ?Sized,
{
    ensure_seller(access, user)?;
    repo.list_offers(OfferListQuery::All)
        .map_err(ServiceError::from)
}

pub fn get_offer<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    offer_id: i32,
) -> ServiceResult<Offer>
where
    R: OfferReader + ?Sized,
{
    ensure_seller(access, user)?;
    fetch_offer(repo, offer_id)
}

/// Create an offer. A submitted offer price is validated against the
/// product before anything is written.
pub fn create_offer<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    form: OfferForm,
) -> ServiceResult<Offer>
where
    R: OfferWriter + ProductReader + ?Sized,
{
    ensure_seller(access, user)?;

    let new_offer = form.into_new_offer()?;
    let original_price = product_original_price(repo, new_offer.product_id)?;
    if let Some(offer_price) = new_offer.offer_price {
        check_offer_price(original_price, offer_price)?;
    }

    let offer = repo.create_offer(&new_offer).map_err(ServiceError::from)?;
    log::info!("Offer {} created for product {}", offer.id, offer.product_id);
    Ok(offer)
}

pub fn update_offer<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    offer_id: i32,
    form: OfferForm,
) -> ServiceResult<Offer>
where
    R: OfferReader + OfferWriter + ProductReader + ?Sized,
{
    ensure_seller(access, user)?;

    let updates = form.into_update_offer()?;
    let current = fetch_offer(repo, offer_id)?;

    let product_id = updates.product_id.unwrap_or(current.product_id);
    let original_price = product_original_price(repo, product_id)?;
    if let Some(offer_price) = updates.offer_price {
        check_offer_price(original_price, offer_price)?;
    }

    repo.update_offer(offer_id, &updates)
        .map_err(not_found_as("Offer not found"))
}

pub fn delete_offer<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    offer_id: i32,
) -> ServiceResult<()>
where
    R: OfferWriter + ?Sized,
{
    ensure_seller(access, user)?;
    repo.delete_offer(offer_id)
        .map_err(not_found_as("Offer not found"))
}

fn fetch_offer<R>(repo: &R, offer_id: i32) -> ServiceResult<Offer>
where
    R: OfferReader + ?Sized,
{
    repo.get_offer_by_id(offer_id)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::not_found("Offer not found"))
}

fn product_original_price<R>(repo: &R, product_id: i32) -> ServiceResult<Money>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .map(|product| product.original_price)
        .ok_or_else(|| ServiceError::form("Invalid product"))
}
