//! Customer side of ordering: buy now, cart checkout, history and cancel.

use pushkind_common::repository::errors::RepositoryError;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{NewOrder, Order, OrderListQuery, StatusError};
use crate::forms::orders::{BuyNowForm, ShippingForm};
use crate::repository::{OrderReader, OrderWriter, ProductReader, ProfileReader};
use crate::services::cart::active_product;
use crate::services::{ServiceError, ServiceResult, require_complete_profile};

/// Place a single-product order at the current selling price.
pub fn buy_now<R>(repo: &R, user: &AuthenticatedUser, form: BuyNowForm) -> ServiceResult<Order>
where
    R: ProductReader + OrderWriter + ?Sized,
{
    let request = form.into_request()?;
    let product = active_product(repo, request.product_id)?;

    let variant = match request.size_variant_id {
        Some(variant_id) => Some(
            product
                .active_variant(variant_id)
                .ok_or_else(|| ServiceError::form("Invalid product"))?,
        ),
        None => None,
    };

    let new_order = NewOrder::buy_now(
        user.id,
        request.shipping,
        &product,
        variant,
        request.quantity,
    );
    let order = repo.create_order(&new_order).map_err(ServiceError::from)?;

    log::info!(
        "Order {} placed by user {} for product {} (total {})",
        order.id,
        user.id,
        product.id,
        order.total_amount
    );
    Ok(order)
}

/// Turn the whole cart into one order and empty the cart. The lines are
/// priced inside the repository transaction, so a concurrent cart edit is
/// either fully included or not seen at all.
pub fn checkout_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ShippingForm,
) -> ServiceResult<Order>
where
    R: ProfileReader + OrderWriter + ?Sized,
{
    require_complete_profile(repo, user)?;
    let shipping = form.into_shipping()?;

    let order = repo
        .create_order_from_cart(user.id, &shipping)
        .map_err(|err| match err {
            RepositoryError::NotFound => {
                ServiceError::form("Cart changed during checkout, please try again")
            }
            other => ServiceError::from(other),
        })?
        .ok_or_else(|| ServiceError::form("Cart is empty"))?;

    log::info!(
        "Order {} placed by user {} from {} cart lines (total {})",
        order.id,
        user.id,
        order.items.len(),
        order.total_amount
    );
    Ok(order)
}

/// The caller's orders, newest first.
pub fn list_orders<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    repo.list_orders(OrderListQuery::for_user(user.id))
        .map_err(ServiceError::from)
}

pub fn get_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    own_order(repo, user, order_id)
}

/// Cancel one of the caller's orders unless it is already delivered or
/// cancelled.
pub fn cancel_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    let order = own_order(repo, user, order_id)?;
    let status = order.status.cancel()?;

    // A concurrent status change may have made the order terminal.
    let order = repo
        .update_order_status(order.id, order.status, status)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::from(StatusError::NotCancellable))?;
    log::info!("Order {} cancelled by user {}", order.id, user.id);
    Ok(order)
}

fn own_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    repo.get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .filter(|order| order.user_id == user.id)
        .ok_or_else(|| ServiceError::not_found("Order not found"))
}
