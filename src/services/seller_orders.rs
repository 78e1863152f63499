//! Seller side of orders: listing with optional customer grouping and
//! forward status updates.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::domain::order::{
    CustomerOrders, Order, OrderListQuery, OrderStatus, SellerOrderView, StatusError,
    group_orders_by_customer,
};
use crate::forms::orders::{SellerOrdersQuery, StatusForm};
use crate::repository::{OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult, ensure_seller};

/// Either the flat list or the per-customer grouping.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SellerOrderListing {
    Orders(Vec<SellerOrderView>),
    Customers(Vec<CustomerOrders>),
}

/// Body returned after a status change.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusUpdated {
    pub message: &'static str,
    pub status: OrderStatus,
}

/// Orders visible to the seller. Seller-admins see everything; other
/// sellers see only their own lines.
pub fn list_seller_orders<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    query: &SellerOrdersQuery,
    today: NaiveDate,
) -> ServiceResult<SellerOrderListing>
where
    R: OrderReader + ?Sized,
{
    ensure_seller(access, user)?;

    let orders = repo
        .list_orders(OrderListQuery::all())
        .map_err(ServiceError::from)?;

    let is_admin = access.is_seller_admin(user);
    let views: Vec<SellerOrderView> = orders
        .into_iter()
        .filter_map(|order| {
            if is_admin {
                Some(order)
            } else {
                order.scoped_to_seller(user.id)
            }
        })
        .map(|order| order.seller_view(today))
        .collect();

    if query.group_by_customer() {
        Ok(SellerOrderListing::Customers(group_orders_by_customer(views)))
    } else {
        Ok(SellerOrderListing::Orders(views))
    }
}

/// Move an order forward through the fulfilment states.
pub fn update_order_status<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    order_id: i32,
    form: StatusForm,
) -> ServiceResult<StatusUpdated>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_seller(access, user)?;

    let target = form.into_status()?;
    let order: Order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::not_found("Order not found"))?;

    if !access.is_seller_admin(user) && !order.is_owned_by_seller(user.id) {
        return Err(ServiceError::Forbidden(
            "You can only update orders for your products".to_string(),
        ));
    }

    let status = order.status.advance_to(target)?;
    let updated = repo
        .update_order_status(order.id, order.status, status)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::from(StatusError::NotUpdatable))?;

    log::info!(
        "Order {} moved from {} to {} by {}",
        updated.id,
        order.status,
        updated.status,
        user.username
    );
    Ok(StatusUpdated {
        message: "Status updated",
        status: updated.status,
    })
}
