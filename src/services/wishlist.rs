use crate::domain::auth::AuthenticatedUser;
use crate::domain::wishlist::WishlistItem;
use crate::forms::cart::AddToCartForm;
use crate::repository::{ProductReader, ProfileReader, WishlistReader, WishlistWriter};
use crate::services::cart::active_product;
use crate::services::{ServiceError, ServiceResult, require_complete_profile};

pub fn list_wishlist<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<WishlistItem>>
where
    R: WishlistReader + ProfileReader + ?Sized,
{
    require_complete_profile(repo, user)?;
    repo.list_wishlist_items(user.id)
        .map_err(ServiceError::from)
}

/// Save a product. Saving it twice returns the existing item.
pub fn add_to_wishlist<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddToCartForm,
) -> ServiceResult<WishlistItem>
where
    R: WishlistWriter + ProductReader + ProfileReader + ?Sized,
{
    require_complete_profile(repo, user)?;

    let selection = form.into_selection()?;
    let product = active_product(repo, selection.product_id)?;

    repo.add_wishlist_item(user.id, product.id)
        .map_err(ServiceError::from)
}

pub fn remove_from_wishlist<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<()>
where
    R: WishlistWriter + ProfileReader + ?Sized,
{
    require_complete_profile(repo, user)?;
    repo.remove_wishlist_items(user.id, product_id)
        .map_err(ServiceError::from)?;
    Ok(())
}
