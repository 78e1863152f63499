use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
    OrderItem as DomainOrderItem, OrderStatus, ShippingDetails,
};
use crate::domain::pricing::Money;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub total_amount: i64,
    pub status: String,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    pub product_name: String,
    pub size_label: String,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub full_name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub pincode: &'a str,
    pub total_amount: i64,
    pub status: &'a str,
    pub estimated_delivery_date: Option<NaiveDate>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: i32,
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    pub product_name: &'a str,
    pub size_label: &'a str,
    pub quantity: i32,
    pub price: i64,
}

impl<'a> NewOrderItem<'a> {
    pub fn for_order(order_id: i32, value: &'a DomainNewOrderItem) -> Self {
        Self {
            order_id,
            product_id: value.product_id,
            size_variant_id: value.size_variant_id,
            product_name: value.product_name.as_str(),
            size_label: value.size_label.as_str(),
            quantity: value.quantity,
            price: value.price.cents(),
        }
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            user_id: value.user_id,
            full_name: value.shipping.full_name.as_str(),
            phone: value.shipping.phone.as_str(),
            address: value.shipping.address.as_str(),
            city: value.shipping.city.as_str(),
            state: value.shipping.state.as_str(),
            pincode: value.shipping.pincode.as_str(),
            total_amount: value.total_amount.cents(),
            status: value.status.as_str(),
            estimated_delivery_date: value.estimated_delivery_date,
        }
    }
}

/// Row plus the email of the customer; items are attached separately.
impl From<(Order, String)> for DomainOrder {
    fn from((value, customer_email): (Order, String)) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            customer_email,
            shipping: ShippingDetails {
                full_name: value.full_name,
                phone: value.phone,
                address: value.address,
                city: value.city,
                state: value.state,
                pincode: value.pincode,
            },
            total_amount: Money::from_cents(value.total_amount),
            status: OrderStatus::from_stored(&value.status),
            estimated_delivery_date: value.estimated_delivery_date,
            created_at: value.created_at,
            items: Vec::new(),
        }
    }
}

impl From<OrderItem> for DomainOrderItem {
    fn from(value: OrderItem) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            product_id: value.product_id,
            size_variant_id: value.size_variant_id,
            product_name: value.product_name,
            size_label: value.size_label,
            quantity: value.quantity,
            price: Money::from_cents(value.price),
            product: None,
        }
    }
}
