use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::cart::CartItem;
use crate::domain::pricing::{Money, Priced};
use crate::domain::product::{Product, ProductSizeVariant};

/// Days added to the order date when no explicit delivery date is stored.
pub const DEFAULT_DELIVERY_DAYS: u64 = 5;

/// Lifecycle states of an order.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been created by the customer.
    #[default]
    Placed,
    Shipped,
    OutForDelivery,
    /// Terminal.
    Delivered,
    /// Terminal.
    Cancelled,
}

/// Forward path a seller can move an order along.
const FORWARD: [OrderStatus; 4] = [
    OrderStatus::Placed,
    OrderStatus::Shipped,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

/// Rejected status changes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StatusError {
    #[error("Invalid status")]
    InvalidStatus,
    #[error("Order cannot be updated")]
    NotUpdatable,
    #[error("Invalid status transition")]
    InvalidTransition,
    #[error("Order cannot be cancelled")]
    NotCancellable,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Read a stored status; unknown values are treated as `placed`.
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    fn forward_index(self) -> Option<usize> {
        FORWARD.iter().position(|status| *status == self)
    }

    /// Move the order forward to `target`. Skipping steps is allowed;
    /// staying put or moving back is not.
    pub fn advance_to(self, target: OrderStatus) -> Result<OrderStatus, StatusError> {
        let target_index = target.forward_index().ok_or(StatusError::InvalidStatus)?;
        if self.is_terminal() {
            return Err(StatusError::NotUpdatable);
        }
        let current_index = self.forward_index().unwrap_or(0);
        if target_index <= current_index {
            return Err(StatusError::InvalidTransition);
        }
        Ok(target)
    }

    pub fn cancel(self) -> Result<OrderStatus, StatusError> {
        if self.is_terminal() {
            return Err(StatusError::NotCancellable);
        }
        Ok(OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "placed" => Ok(OrderStatus::Placed),
            "shipped" => Ok(OrderStatus::Shipped),
            "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(StatusError::InvalidStatus),
        }
    }
}

/// Where an order is shipped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub phone: String,
    /// Street address, both lines joined.
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl ShippingDetails {
    /// `"{address}, {city}, {state} - {pincode}"`
    pub fn formatted_address(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.address, self.city, self.state, self.pincode
        )
    }
}

/// Join two address lines, skipping an empty second line.
pub fn join_address_lines(line1: &str, line2: &str) -> String {
    if line2.is_empty() {
        line1.to_string()
    } else {
        format!("{line1}, {line2}")
    }
}

/// Purchased line frozen at order time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub id: i32,
    #[serde(skip_serializing)]
    pub order_id: i32,
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    /// Product name at order time.
    pub product_name: String,
    /// Size label at order time, empty when no size was chosen.
    pub size_label: String,
    pub quantity: i32,
    /// Unit selling price at order time.
    pub price: Money,
    /// Current product record, used for display and seller ownership.
    pub product: Option<Product>,
}

impl OrderItem {
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Lines of unassigned products count as owned by every seller.
    pub fn is_owned_by(&self, seller_id: i32) -> bool {
        self.product
            .as_ref()
            .is_some_and(|product| product.is_owned_by(seller_id))
    }
}

/// Domain representation of a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    /// Customer that placed the order.
    pub user_id: i32,
    /// Email of the customer, loaded alongside the order.
    pub customer_email: String,
    pub shipping: ShippingDetails,
    /// Sum of line totals at creation time.
    pub total_amount: Money,
    pub status: OrderStatus,
    /// Explicit delivery date set on the order, if any.
    pub estimated_delivery_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Explicit delivery date, or five days after the order was placed.
    pub fn estimated_delivery(&self) -> NaiveDate {
        self.estimated_delivery_date.unwrap_or_else(|| {
            let placed = self.created_at.date();
            placed
                .checked_add_days(Days::new(DEFAULT_DELIVERY_DAYS))
                .unwrap_or(placed)
        })
    }

    /// Whole days until the estimated delivery, never negative.
    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        (self.estimated_delivery() - today).num_days().max(0)
    }

    pub fn is_owned_by_seller(&self, seller_id: i32) -> bool {
        self.items.iter().any(|item| item.is_owned_by(seller_id))
    }

    /// Keep only the lines `seller_id` owns; `None` when nothing is left.
    pub fn scoped_to_seller(mut self, seller_id: i32) -> Option<Order> {
        self.items.retain(|item| item.is_owned_by(seller_id));
        if self.items.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Customer facing representation.
    pub fn view(&self, today: NaiveDate) -> OrderView<'_> {
        OrderView {
            id: self.id,
            full_name: &self.shipping.full_name,
            phone: &self.shipping.phone,
            address: &self.shipping.address,
            city: &self.shipping.city,
            state: &self.shipping.state,
            pincode: &self.shipping.pincode,
            total_amount: self.total_amount,
            status: self.status,
            created_at: self.created_at,
            estimated_delivery_date: self.estimated_delivery(),
            remaining_days: self.remaining_days(today),
            items: &self.items,
        }
    }

    /// Seller dashboard representation.
    pub fn seller_view(&self, today: NaiveDate) -> SellerOrderView {
        SellerOrderView {
            id: self.id,
            user_id: self.user_id,
            customer_name: self.shipping.full_name.clone(),
            customer_email: self.customer_email.clone(),
            phone: self.shipping.phone.clone(),
            address: self.shipping.formatted_address(),
            city: self.shipping.city.clone(),
            state: self.shipping.state.clone(),
            pincode: self.shipping.pincode.clone(),
            total_amount: self.total_amount,
            status: self.status,
            created_at: self.created_at,
            estimated_delivery_date: self.estimated_delivery(),
            remaining_days: self.remaining_days(today),
            items: self.items.iter().map(SellerOrderLine::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderView<'a> {
    pub id: i32,
    pub full_name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub pincode: &'a str,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub estimated_delivery_date: NaiveDate,
    pub remaining_days: i64,
    pub items: &'a [OrderItem],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerOrderLine {
    pub product_id: i32,
    pub product_name: String,
    pub size_label: String,
    pub category_name: String,
    pub image: Option<String>,
    pub quantity: i32,
    pub price: Money,
    pub line_total: Money,
}

impl From<&OrderItem> for SellerOrderLine {
    fn from(item: &OrderItem) -> Self {
        let product = item.product.as_ref();
        Self {
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            size_label: item.size_label.clone(),
            category_name: product
                .map(|product| product.category_name.clone())
                .unwrap_or_default(),
            image: product.and_then(|product| product.image.clone()),
            quantity: item.quantity,
            price: item.price,
            line_total: item.line_total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerOrderView {
    pub id: i32,
    pub user_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub phone: String,
    /// `"{address}, {city}, {state} - {pincode}"`
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub estimated_delivery_date: NaiveDate,
    pub remaining_days: i64,
    pub items: Vec<SellerOrderLine>,
}

/// Orders of one customer on the seller dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerOrders {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub phone: String,
    pub total_orders: usize,
    pub total_value: Money,
    pub last_order_date: NaiveDateTime,
    /// Newest first.
    pub orders: Vec<SellerOrderView>,
}

/// Group seller order views per customer. Groups are ordered by their most
/// recent order, newest first. Contact details come from the newest order.
pub fn group_orders_by_customer(mut orders: Vec<SellerOrderView>) -> Vec<CustomerOrders> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let mut positions: HashMap<i32, usize> = HashMap::new();
    let mut groups: Vec<CustomerOrders> = Vec::new();

    for order in orders {
        let index = *positions.entry(order.user_id).or_insert_with(|| {
            groups.push(CustomerOrders {
                customer_id: order.user_id,
                customer_name: order.customer_name.clone(),
                customer_email: order.customer_email.clone(),
                phone: order.phone.clone(),
                total_orders: 0,
                total_value: Money::ZERO,
                last_order_date: order.created_at,
                orders: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[index];
        group.total_orders += 1;
        group.total_value += order.total_amount;
        if order.created_at > group.last_order_date {
            group.last_order_date = order.created_at;
        }
        group.orders.push(order);
    }

    groups.sort_by(|a, b| b.last_order_date.cmp(&a.last_order_date));
    groups
}

/// Query definition used to list orders, newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    /// Restrict to one customer.
    pub user_id: Option<i32>,
}

impl OrderListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

/// Line of an order about to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    pub product_name: String,
    pub size_label: String,
    pub quantity: i32,
    pub price: Money,
}

impl NewOrderItem {
    /// Snapshot the selling price of `product`, or of `variant` when given.
    pub fn snapshot(
        product: &Product,
        variant: Option<&ProductSizeVariant>,
        quantity: i32,
    ) -> Self {
        let quote = match variant {
            Some(variant) => variant.quote(),
            None => product.quote(),
        };
        Self {
            product_id: product.id,
            size_variant_id: variant.map(|variant| variant.id),
            product_name: product.name.clone(),
            size_label: variant
                .map(|variant| variant.size_label.clone())
                .unwrap_or_default(),
            quantity,
            price: quote.selling_price,
        }
    }

    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// Order about to be placed, with its lines and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i32,
    pub shipping: ShippingDetails,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn from_items(user_id: i32, shipping: ShippingDetails, items: Vec<NewOrderItem>) -> Self {
        let total_amount = items.iter().map(NewOrderItem::line_total).sum();
        Self {
            user_id,
            shipping,
            total_amount,
            status: OrderStatus::Placed,
            estimated_delivery_date: None,
            items,
        }
    }

    /// Single product purchase.
    pub fn buy_now(
        user_id: i32,
        shipping: ShippingDetails,
        product: &Product,
        variant: Option<&ProductSizeVariant>,
        quantity: i32,
    ) -> Self {
        let item = NewOrderItem::snapshot(product, variant, quantity);
        Self::from_items(user_id, shipping, vec![item])
    }

    /// One line per cart line, priced with the selected size.
    pub fn from_cart(user_id: i32, shipping: ShippingDetails, cart: &[CartItem]) -> Self {
        let items = cart
            .iter()
            .map(|line| {
                NewOrderItem::snapshot(&line.product, line.size_variant.as_ref(), line.quantity)
            })
            .collect();
        Self::from_items(user_id, shipping, items)
    }
}
