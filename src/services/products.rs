use serde::Deserialize;

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::domain::pricing::check_offer_price;
use crate::domain::product::{Product, ProductListQuery, UpdateProduct};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::{CategoryReader, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult, ensure_seller, not_found_as};

/// Query parameters accepted by the public product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Category slug or name; matched ignoring case.
    pub category: Option<String>,
}

/// Active products, optionally narrowed to one category. An unknown
/// category yields an empty list.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let mut list_query = ProductListQuery::new();

    if let Some(category) = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
    {
        match repo.find_category(category).map_err(ServiceError::from)? {
            Some(found) => list_query = list_query.category(found.id),
            None => return Ok(Vec::new()),
        }
    }

    repo.list_products(list_query).map_err(ServiceError::from)
}

/// Product detail. Inactive products are only visible to sellers.
pub fn get_product<R>(
    repo: &R,
    access: &SellerAccess,
    user: Option<&AuthenticatedUser>,
    product_id: i32,
) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product = fetch_product(repo, product_id)?;

    if !product.is_active && !user.is_some_and(|user| access.is_seller(user)) {
        return Err(ServiceError::not_found("Product not found"));
    }

    Ok(product)
}

pub fn list_inactive_products<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    ensure_seller(access, user)?;

    repo.list_products(ProductListQuery::new().inactive_only())
        .map_err(ServiceError::from)
}

/// Other active products of the same category.
pub fn related_products<R>(repo: &R, category: &str, product_id: i32) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let Some(category) = repo.find_category(category.trim()).map_err(ServiceError::from)? else {
        return Ok(Vec::new());
    };

    repo.list_products(ProductListQuery::new().category(category.id).exclude(product_id))
        .map_err(ServiceError::from)
}

/// Create a product owned by the calling seller.
pub fn create_product<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader + ?Sized,
{
    ensure_seller(access, user)?;

    let new_product = form.into_new_product()?.with_seller(user.id);
    ensure_category(repo, new_product.category_id)?;

    let product = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;
    log::info!("Product {} created by {}", product.id, user.username);
    Ok(product)
}

/// Apply a partial update. An unassigned product becomes the caller's.
pub fn update_product<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader + ?Sized,
{
    ensure_seller(access, user)?;

    let mut updates = form.into_update_product()?;
    let product = fetch_product(repo, product_id)?;
    ensure_can_manage(access, user, &product)?;

    if let Some(category_id) = updates.category_id {
        ensure_category(repo, category_id)?;
    }

    // A lowered original price must still sit above the stored offer.
    let offer_price = match updates.offer_price {
        Some(offer_price) => offer_price,
        None => product.offer_price,
    };
    if let Some(offer_price) = offer_price {
        check_offer_price(updates.effective_original_price(&product), offer_price)?;
    }

    if product.seller_id.is_none() {
        updates = updates.assign_seller(user.id);
    }

    repo.update_product(product_id, &updates)
        .map_err(not_found_as("Product not found"))
}

/// Soft delete: the product is hidden but order history keeps pointing at it.
pub fn delete_product<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    ensure_seller(access, user)?;

    let product = fetch_product(repo, product_id)?;
    ensure_can_manage(access, user, &product)?;

    repo.update_product(product_id, &UpdateProduct::deactivate())
        .map_err(not_found_as("Product not found"))?;
    log::info!("Product {product_id} deactivated by {}", user.username);
    Ok(())
}

fn fetch_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::not_found("Product not found"))
}

fn ensure_category<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryReader + ?Sized,
{
    match repo
        .get_category_by_id(category_id)
        .map_err(ServiceError::from)?
    {
        Some(_) => Ok(()),
        None => Err(ServiceError::form("Invalid category")),
    }
}

fn ensure_can_manage(
    access: &SellerAccess,
    user: &AuthenticatedUser,
    product: &Product,
) -> ServiceResult<()> {
    if access.is_seller_admin(user) || product.is_owned_by(user.id) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "You can only manage your own products".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::pricing::Money;
    use crate::domain::product::tests::{fixed_datetime, sample_product};
    use crate::repository::mock::MockRepo;
    use crate::services::tests::{access, customer, seller};

    fn shirts() -> Category {
        Category {
            id: 1,
            name: "Shirts".into(),
            slug: "shirts".into(),
            is_active: true,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn unknown_category_lists_nothing() {
        let mut repo = MockRepo::new();
        repo.categories.expect_find_category().returning(|_| Ok(None));
        repo.products.expect_list_products().never();

        let query = ProductsQuery {
            category: Some("hats".into()),
        };

        assert!(list_products(&repo, query).unwrap().is_empty());
    }

    #[test]
    fn category_filter_uses_found_id() {
        let mut repo = MockRepo::new();
        repo.categories
            .expect_find_category()
            .withf(|name| name == "SHIRTS")
            .returning(|_| Ok(Some(shirts())));
        repo.products
            .expect_list_products()
            .withf(|query| query.category_id == Some(1) && query.exclude_id.is_none())
            .returning(|_| Ok(vec![sample_product(1, 500, None)]));

        let query = ProductsQuery {
            category: Some("SHIRTS".into()),
        };

        assert_eq!(list_products(&repo, query).unwrap().len(), 1);
    }

    #[test]
    fn inactive_product_is_hidden_from_customers() {
        let mut repo = MockRepo::new();
        repo.products.expect_get_product_by_id().returning(|id| {
            let mut product = sample_product(id, 500, None);
            product.is_active = false;
            Ok(Some(product))
        });

        assert!(matches!(
            get_product(&repo, &access(), Some(&customer(1)), 3),
            Err(ServiceError::NotFound(_))
        ));
        assert!(get_product(&repo, &access(), Some(&seller(2)), 3).is_ok());
    }

    #[test]
    fn related_products_exclude_current() {
        let mut repo = MockRepo::new();
        repo.categories
            .expect_find_category()
            .returning(|_| Ok(Some(shirts())));
        repo.products
            .expect_list_products()
            .withf(|query| query.category_id == Some(1) && query.exclude_id == Some(4))
            .returning(|_| Ok(vec![sample_product(5, 300, None)]));

        let related = related_products(&repo, "shirts", 4).unwrap();

        assert_eq!(related[0].id, 5);
    }

    #[test]
    fn create_assigns_caller_as_seller() {
        let mut repo = MockRepo::new();
        repo.categories
            .expect_get_category_by_id()
            .returning(|_| Ok(Some(shirts())));
        repo.product_writer
            .expect_create_product()
            .times(1)
            .withf(|product| product.seller_id == Some(9) && product.name == "Linen shirt")
            .returning(|product| {
                let mut stored = sample_product(10, 0, None);
                stored.seller_id = product.seller_id;
                stored.name = product.name.clone();
                stored.original_price = product.original_price;
                Ok(stored)
            });

        let form: AddProductForm = serde_json::from_str(
            r#"{"category": 1, "name": "Linen shirt", "original_price": "1500"}"#,
        )
        .unwrap();
        let product = create_product(&repo, &access(), &seller(9), form).unwrap();

        assert_eq!(product.original_price, Money::from_units(1500));
    }

    #[test]
    fn create_rejects_unknown_category() {
        let mut repo = MockRepo::new();
        repo.categories
            .expect_get_category_by_id()
            .returning(|_| Ok(None));
        repo.product_writer.expect_create_product().never();

        let form: AddProductForm =
            serde_json::from_str(r#"{"category": 42, "name": "Cap", "original_price": 10}"#)
                .unwrap();

        assert!(matches!(
            create_product(&repo, &access(), &seller(9), form),
            Err(ServiceError::Form(msg)) if msg == "Invalid category"
        ));
    }

    #[test]
    fn update_checks_offer_against_stored_price() {
        let mut repo = MockRepo::new();
        repo.products
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, 500, None))));
        repo.product_writer.expect_update_product().never();

        let form: EditProductForm = serde_json::from_str(r#"{"offer_price": "600"}"#).unwrap();

        assert!(matches!(
            update_product(&repo, &access(), &seller(9), 1, form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn lowering_original_below_stored_offer_is_rejected() {
        let mut repo = MockRepo::new();
        repo.products
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, 500, Some(400)))));
        repo.product_writer.expect_update_product().never();

        let form: EditProductForm = serde_json::from_str(r#"{"original_price": "300"}"#).unwrap();

        assert!(matches!(
            update_product(&repo, &access(), &seller(9), 1, form),
            Err(ServiceError::Form(msg)) if msg == "Offer price must be less than original price"
        ));
    }

    #[test]
    fn clearing_offer_allows_lower_original() {
        let mut repo = MockRepo::new();
        repo.products
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, 500, Some(400)))));
        repo.product_writer
            .expect_update_product()
            .times(1)
            .withf(|_, updates| updates.offer_price == Some(None))
            .returning(|id, _| Ok(sample_product(id, 300, None)));

        let form: EditProductForm =
            serde_json::from_str(r#"{"original_price": "300", "offer_price": ""}"#).unwrap();

        assert!(update_product(&repo, &access(), &seller(9), 1, form).is_ok());
    }

    #[test]
    fn update_claims_unassigned_product() {
        let mut repo = MockRepo::new();
        repo.products
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, 500, None))));
        repo.product_writer
            .expect_update_product()
            .times(1)
            .withf(|id, updates| *id == 1 && updates.seller_id == Some(9))
            .returning(|id, _| Ok(sample_product(id, 500, Some(450))));

        let form: EditProductForm = serde_json::from_str(r#"{"offer_price": "450"}"#).unwrap();

        assert!(update_product(&repo, &access(), &seller(9), 1, form).is_ok());
    }

    #[test]
    fn other_sellers_cannot_delete() {
        let mut repo = MockRepo::new();
        repo.products.expect_get_product_by_id().returning(|id| {
            let mut product = sample_product(id, 500, None);
            product.seller_id = Some(3);
            Ok(Some(product))
        });
        repo.product_writer.expect_update_product().never();

        assert!(matches!(
            delete_product(&repo, &access(), &seller(9), 1),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn delete_deactivates_product() {
        let mut repo = MockRepo::new();
        repo.products
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, 500, None))));
        repo.product_writer
            .expect_update_product()
            .times(1)
            .withf(|_, updates| updates.is_active == Some(false))
            .returning(|id, _| Ok(sample_product(id, 500, None)));

        assert!(delete_product(&repo, &access(), &seller(9), 1).is_ok());
    }
}
