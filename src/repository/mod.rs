use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    cart::{CartItem, CartLineKey, NewCartItem},
    category::{Category, NewCategory},
    customer::{CustomerProfile, NewCustomerProfile, UpdateCustomerProfile},
    enquiry::{Enquiry, NewEnquiry},
    offer::{NewOffer, Offer, OfferListQuery, UpdateOffer},
    order::{NewOrder, Order, OrderListQuery, OrderStatus, ShippingDetails},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    user::{NewUser, User},
    wishlist::WishlistItem,
};

pub mod cart;
pub mod category;
pub mod customer;
pub mod enquiry;
pub mod offer;
pub mod order;
pub mod product;
pub mod user;
pub mod wishlist;

#[cfg(test)]
pub mod mock;

// SQLite `lower()`, used for case-insensitive lookups.
diesel::define_sql_function! {
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    /// Insert a customer together with an empty profile.
    /// Insert a customer and an empty profile. `None` when the username
    /// is already taken.
    fn create_customer(&self, new_user: &NewUser) -> RepositoryResult<Option<User>>;
}

pub trait CategoryReader {
    fn list_categories(&self, active_only: bool) -> RepositoryResult<Vec<Category>>;
    /// Match a category by slug or name, ignoring case.
    fn find_category(&self, slug_or_name: &str) -> RepositoryResult<Option<Category>>;
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
}

pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
}

/// Read-only operations over products and their size variants.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over products and their size variants.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
}

pub trait OfferReader {
    fn get_offer_by_id(&self, id: i32) -> RepositoryResult<Option<Offer>>;
    fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<Vec<Offer>>;
}

/// Offer writes also store the submitted offer price on the product, in the
/// same transaction.
pub trait OfferWriter {
    fn create_offer(&self, new_offer: &NewOffer) -> RepositoryResult<Offer>;
    fn update_offer(&self, offer_id: i32, updates: &UpdateOffer) -> RepositoryResult<Offer>;
    fn delete_offer(&self, offer_id: i32) -> RepositoryResult<()>;
}

pub trait CartReader {
    fn list_cart_items(&self, user_id: i32) -> RepositoryResult<Vec<CartItem>>;
}

pub trait CartWriter {
    /// Add a line, or increase the quantity of the matching line.
    fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem>;
    fn update_cart_item_quantity(
        &self,
        key: &CartLineKey,
        quantity: i32,
    ) -> RepositoryResult<CartItem>;
    fn delete_cart_line(&self, key: &CartLineKey) -> RepositoryResult<()>;
    /// Remove lines of a product; `None` removes every size.
    fn remove_cart_items(
        &self,
        user_id: i32,
        product_id: i32,
        size_variant_id: Option<i32>,
    ) -> RepositoryResult<usize>;
}

pub trait WishlistReader {
    fn list_wishlist_items(&self, user_id: i32) -> RepositoryResult<Vec<WishlistItem>>;
}

pub trait WishlistWriter {
    /// Idempotent: returns the existing item when already saved.
    fn add_wishlist_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<WishlistItem>;
    fn remove_wishlist_items(&self, user_id: i32, product_id: i32) -> RepositoryResult<usize>;
}

pub trait ProfileReader {
    fn get_profile(&self, user_id: i32) -> RepositoryResult<Option<CustomerProfile>>;
}

pub trait ProfileWriter {
    fn create_profile(&self, profile: &NewCustomerProfile) -> RepositoryResult<CustomerProfile>;
    fn update_profile(
        &self,
        user_id: i32,
        updates: &UpdateCustomerProfile,
    ) -> RepositoryResult<CustomerProfile>;
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
}

pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    /// Price the user's cart as it stands inside the transaction, insert the
    /// order and delete the converted lines. `None` when the cart is empty.
    fn create_order_from_cart(
        &self,
        user_id: i32,
        shipping: &ShippingDetails,
    ) -> RepositoryResult<Option<Order>>;
    /// Move an order from `from` to `to`. `None` when the order is missing or
    /// its stored status is no longer `from`.
    fn update_order_status(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> RepositoryResult<Option<Order>>;
}

pub trait EnquiryReader {
    /// All enquiries, or only those of `user_id`, newest first.
    fn list_enquiries(&self, user_id: Option<i32>) -> RepositoryResult<Vec<Enquiry>>;
}

pub trait EnquiryWriter {
    fn create_enquiry(&self, new_enquiry: &NewEnquiry) -> RepositoryResult<Enquiry>;
}
