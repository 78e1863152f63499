use crate::domain::auth::AuthenticatedUser;
use crate::domain::cart::{CartItem, CartLineKey, NewCartItem};
use crate::domain::product::Product;
use crate::forms::cart::{AddToCartForm, RemoveCartQuery, UpdateCartForm};
use crate::repository::{CartReader, CartWriter, ProductReader, ProfileReader};
use crate::services::{ServiceError, ServiceResult, not_found_as, require_complete_profile};

pub fn list_cart<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<CartItem>>
where
    R: CartReader + ProfileReader + ?Sized,
{
    require_complete_profile(repo, user)?;
    repo.list_cart_items(user.id).map_err(ServiceError::from)
}

/// Add a product to the cart, increasing the quantity of a matching line.
pub fn add_to_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddToCartForm,
) -> ServiceResult<CartItem>
where
    R: CartWriter + ProductReader + ProfileReader + ?Sized,
{
    require_complete_profile(repo, user)?;

    let selection = form.into_selection()?;
    let product = active_product(repo, selection.product_id)?;
    let variant_ok = selection
        .size_variant_id
        .is_none_or(|variant_id| product.active_variant(variant_id).is_some());
    if !variant_ok {
        return Err(ServiceError::form("Invalid size variant"));
    }

    repo.add_cart_item(&NewCartItem {
        user_id: user.id,
        product_id: product.id,
        size_variant_id: selection.size_variant_id,
        quantity: selection.quantity,
    })
    .map_err(ServiceError::from)
}

/// Set the quantity of a cart line. Returns `None` when a non-positive
/// quantity removed the line.
pub fn update_cart_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: UpdateCartForm,
) -> ServiceResult<Option<CartItem>>
where
    R: CartWriter + ProductReader + ProfileReader + ?Sized,
{
    require_complete_profile(repo, user)?;

    let selection = form.into_selection()?;
    if repo
        .get_product_by_id(selection.product_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::form("Invalid product"));
    }

    let key = CartLineKey {
        user_id: user.id,
        product_id: selection.product_id,
        size_variant_id: selection.size_variant_id,
    };

    if selection.quantity <= 0 {
        repo.delete_cart_line(&key)
            .map_err(not_found_as("Item not found"))?;
        return Ok(None);
    }

    repo.update_cart_item_quantity(&key, selection.quantity)
        .map(Some)
        .map_err(not_found_as("Item not found"))
}

/// Remove the lines of a product, or of one of its sizes.
pub fn remove_from_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    query: RemoveCartQuery,
) -> ServiceResult<()>
where
    R: CartWriter + ProfileReader + ?Sized,
{
    require_complete_profile(repo, user)?;

    let removed = repo
        .remove_cart_items(user.id, product_id, query.size_variant_id)
        .map_err(ServiceError::from)?;
    log::debug!("Removed {removed} cart lines of product {product_id} for user {}", user.id);
    Ok(())
}

/// Existing, active product or a 400 "Invalid product".
pub(crate) fn active_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .filter(|product| product.is_active)
        .ok_or_else(|| ServiceError::form("Invalid product"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::tests::cart_item;
    use crate::domain::product::tests::{sample_product, sample_variant};
    use crate::repository::mock::MockRepo;
    use crate::services::tests::{customer, repo_with_profile};
    use pushkind_common::repository::errors::RepositoryError;

    fn product_with_variant() -> Product {
        let mut product = sample_product(1, 1000, None);
        product.size_variants = vec![sample_variant(5, 1, "L", 1200, Some(900))];
        product
    }

    #[test]
    fn incomplete_profile_blocks_cart() {
        let mut repo = MockRepo::new();
        repo.profiles.expect_get_profile().returning(|_| Ok(None));
        repo.cart.expect_list_cart_items().never();

        assert!(matches!(
            list_cart(&repo, &customer(1)),
            Err(ServiceError::ProfileIncomplete)
        ));
    }

    #[test]
    fn add_clamps_quantity_and_keeps_variant() {
        let mut repo = repo_with_profile(1);
        repo.products
            .expect_get_product_by_id()
            .returning(|_| Ok(Some(product_with_variant())));
        repo.cart_writer
            .expect_add_cart_item()
            .times(1)
            .withf(|item| item.quantity == 1 && item.size_variant_id == Some(5) && item.user_id == 1)
            .returning(|_| {
                let product = product_with_variant();
                let variant = product.size_variants[0].clone();
                Ok(cart_item(1, product, Some(variant), 1))
            });

        let form: AddToCartForm =
            serde_json::from_str(r#"{"product": "1", "size_variant_id": 5, "quantity": -3}"#)
                .unwrap();
        let item = add_to_cart(&repo, &customer(1), form).unwrap();

        assert_eq!(item.size_label(), "L");
    }

    #[test]
    fn add_rejects_foreign_variant() {
        let mut repo = repo_with_profile(1);
        repo.products
            .expect_get_product_by_id()
            .returning(|_| Ok(Some(product_with_variant())));
        repo.cart_writer.expect_add_cart_item().never();

        let form: AddToCartForm =
            serde_json::from_str(r#"{"product_id": 1, "size_variant_id": 77}"#).unwrap();

        assert!(matches!(
            add_to_cart(&repo, &customer(1), form),
            Err(ServiceError::Form(msg)) if msg == "Invalid size variant"
        ));
    }

    #[test]
    fn add_rejects_inactive_product() {
        let mut repo = repo_with_profile(1);
        repo.products.expect_get_product_by_id().returning(|id| {
            let mut product = sample_product(id, 100, None);
            product.is_active = false;
            Ok(Some(product))
        });

        let form: AddToCartForm = serde_json::from_str(r#"{"product_id": 1}"#).unwrap();

        assert!(matches!(
            add_to_cart(&repo, &customer(1), form),
            Err(ServiceError::Form(msg)) if msg == "Invalid product"
        ));
    }

    #[test]
    fn zero_quantity_deletes_line() {
        let mut repo = repo_with_profile(1);
        repo.products
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, 100, None))));
        repo.cart_writer
            .expect_delete_cart_line()
            .times(1)
            .withf(|key| key.product_id == 1 && key.size_variant_id.is_none())
            .returning(|_| Ok(()));
        repo.cart_writer.expect_update_cart_item_quantity().never();

        let form: UpdateCartForm =
            serde_json::from_str(r#"{"product_id": 1, "quantity": 0}"#).unwrap();

        assert_eq!(update_cart_item(&repo, &customer(1), form).unwrap(), None);
    }

    #[test]
    fn missing_line_is_item_not_found() {
        let mut repo = repo_with_profile(1);
        repo.products
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, 100, None))));
        repo.cart_writer
            .expect_update_cart_item_quantity()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let form: UpdateCartForm =
            serde_json::from_str(r#"{"product_id": 1, "quantity": "2"}"#).unwrap();

        assert!(matches!(
            update_cart_item(&repo, &customer(1), form),
            Err(ServiceError::NotFound(msg)) if msg == "Item not found"
        ));
    }

    #[test]
    fn remove_without_size_clears_every_size() {
        let mut repo = repo_with_profile(1);
        repo.cart_writer
            .expect_remove_cart_items()
            .times(1)
            .withf(|user_id, product_id, size| *user_id == 1 && *product_id == 4 && size.is_none())
            .returning(|_, _, _| Ok(2));

        assert!(remove_from_cart(&repo, &customer(1), 4, RemoveCartQuery::default()).is_ok());
    }
}
