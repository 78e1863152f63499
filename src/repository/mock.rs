use mockall::mock;

use super::{
    CartReader, CartWriter, CategoryReader, CategoryWriter, EnquiryReader, EnquiryWriter,
    OfferReader, OfferWriter, OrderReader, OrderWriter, ProductReader, ProductWriter,
    ProfileReader, ProfileWriter, UserReader, UserWriter, WishlistReader, WishlistWriter,
};
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
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn create_customer(&self, new_user: &NewUser) -> RepositoryResult<Option<User>>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn list_categories(&self, active_only: bool) -> RepositoryResult<Vec<Category>>;
        fn find_category(&self, slug_or_name: &str) -> RepositoryResult<Option<Category>>;
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
    }
}

mock! {
    pub OfferReader {}

    impl OfferReader for OfferReader {
        fn get_offer_by_id(&self, id: i32) -> RepositoryResult<Option<Offer>>;
        fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<Vec<Offer>>;
    }
}

mock! {
    pub OfferWriter {}

    impl OfferWriter for OfferWriter {
        fn create_offer(&self, new_offer: &NewOffer) -> RepositoryResult<Offer>;
        fn update_offer(&self, offer_id: i32, updates: &UpdateOffer) -> RepositoryResult<Offer>;
        fn delete_offer(&self, offer_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CartReader {}

    impl CartReader for CartReader {
        fn list_cart_items(&self, user_id: i32) -> RepositoryResult<Vec<CartItem>>;
    }
}

mock! {
    pub CartWriter {}

    impl CartWriter for CartWriter {
        fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem>;
        fn update_cart_item_quantity(&self, key: &CartLineKey, quantity: i32) -> RepositoryResult<CartItem>;
        fn delete_cart_line(&self, key: &CartLineKey) -> RepositoryResult<()>;
        fn remove_cart_items(&self, user_id: i32, product_id: i32, size_variant_id: Option<i32>) -> RepositoryResult<usize>;
    }
}

mock! {
    pub WishlistReader {}

    impl WishlistReader for WishlistReader {
        fn list_wishlist_items(&self, user_id: i32) -> RepositoryResult<Vec<WishlistItem>>;
    }
}

mock! {
    pub WishlistWriter {}

    impl WishlistWriter for WishlistWriter {
        fn add_wishlist_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<WishlistItem>;
        fn remove_wishlist_items(&self, user_id: i32, product_id: i32) -> RepositoryResult<usize>;
    }
}

mock! {
    pub ProfileReader {}

    impl ProfileReader for ProfileReader {
        fn get_profile(&self, user_id: i32) -> RepositoryResult<Option<CustomerProfile>>;
    }
}

mock! {
    pub ProfileWriter {}

    impl ProfileWriter for ProfileWriter {
        fn create_profile(&self, profile: &NewCustomerProfile) -> RepositoryResult<CustomerProfile>;
        fn update_profile(&self, user_id: i32, updates: &UpdateCustomerProfile) -> RepositoryResult<CustomerProfile>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn create_order_from_cart(&self, user_id: i32, shipping: &ShippingDetails) -> RepositoryResult<Option<Order>>;
        fn update_order_status(&self, order_id: i32, from: OrderStatus, to: OrderStatus) -> RepositoryResult<Option<Order>>;
    }
}

mock! {
    pub EnquiryReader {}

    impl EnquiryReader for EnquiryReader {
        fn list_enquiries(&self, user_id: Option<i32>) -> RepositoryResult<Vec<Enquiry>>;
    }
}

mock! {
    pub EnquiryWriter {}

    impl EnquiryWriter for EnquiryWriter {
        fn create_enquiry(&self, new_enquiry: &NewEnquiry) -> RepositoryResult<Enquiry>;
    }
}

/// Bundle of every mock, implementing all repository traits so that
/// services with several bounds can be tested against one value.
#[derive(Default)]
pub struct MockRepo {
    pub users: MockUserReader,
    pub user_writer: MockUserWriter,
    pub categories: MockCategoryReader,
    pub category_writer: MockCategoryWriter,
    pub products: MockProductReader,
    pub product_writer: MockProductWriter,
    pub offers: MockOfferReader,
    pub offer_writer: MockOfferWriter,
    pub cart: MockCartReader,
    pub cart_writer: MockCartWriter,
    pub wishlist: MockWishlistReader,
    pub wishlist_writer: MockWishlistWriter,
    pub profiles: MockProfileReader,
    pub profile_writer: MockProfileWriter,
    pub orders: MockOrderReader,
    pub order_writer: MockOrderWriter,
    pub enquiries: MockEnquiryReader,
    pub enquiry_writer: MockEnquiryWriter,
}

impl MockRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserReader for MockRepo {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        self.users.get_user_by_id(id)
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        self.users.get_user_by_username(username)
    }
}

impl UserWriter for MockRepo {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        self.user_writer.create_user(new_user)
    }

    fn create_customer(&self, new_user: &NewUser) -> RepositoryResult<Option<User>> {
        self.user_writer.create_customer(new_user)
    }
}

impl CategoryReader for MockRepo {
    fn list_categories(&self, active_only: bool) -> RepositoryResult<Vec<Category>> {
        self.categories.list_categories(active_only)
    }

    fn find_category(&self, slug_or_name: &str) -> RepositoryResult<Option<Category>> {
        self.categories.find_category(slug_or_name)
    }

    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>> {
        self.categories.get_category_by_id(id)
    }
}

impl CategoryWriter for MockRepo {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category> {
        self.category_writer.create_category(new_category)
    }
}

impl ProductReader for MockRepo {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        self.products.get_product_by_id(id)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        self.products.list_products(query)
    }
}

impl ProductWriter for MockRepo {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        self.product_writer.create_product(new_product)
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        self.product_writer.update_product(product_id, updates)
    }
}

impl OfferReader for MockRepo {
    fn get_offer_by_id(&self, id: i32) -> RepositoryResult<Option<Offer>> {
        self.offers.get_offer_by_id(id)
    }

    fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<Vec<Offer>> {
        self.offers.list_offers(query)
    }
}

impl OfferWriter for MockRepo {
    fn create_offer(&self, new_offer: &NewOffer) -> RepositoryResult<Offer> {
        self.offer_writer.create_offer(new_offer)
    }

    fn update_offer(&self, offer_id: i32, updates: &UpdateOffer) -> RepositoryResult<Offer> {
        self.offer_writer.update_offer(offer_id, updates)
    }

    fn delete_offer(&self, offer_id: i32) -> RepositoryResult<()> {
        self.offer_writer.delete_offer(offer_id)
    }
}

impl CartReader for MockRepo {
    fn list_cart_items(&self, user_id: i32) -> RepositoryResult<Vec<CartItem>> {
        self.cart.list_cart_items(user_id)
    }
}

impl CartWriter for MockRepo {
    fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem> {
        self.cart_writer.add_cart_item(new_item)
    }

    fn update_cart_item_quantity(
        &self,
        key: &CartLineKey,
        quantity: i32,
    ) -> RepositoryResult<CartItem> {
        self.cart_writer.update_cart_item_quantity(key, quantity)
    }

    fn delete_cart_line(&self, key: &CartLineKey) -> RepositoryResult<()> {
        self.cart_writer.delete_cart_line(key)
    }

    fn remove_cart_items(
        &self,
        user_id: i32,
        product_id: i32,
        size_variant_id: Option<i32>,
    ) -> RepositoryResult<usize> {
        self.cart_writer
            .remove_cart_items(user_id, product_id, size_variant_id)
    }
}

impl WishlistReader for MockRepo {
    fn list_wishlist_items(&self, user_id: i32) -> RepositoryResult<Vec<WishlistItem>> {
        self.wishlist.list_wishlist_items(user_id)
    }
}

impl WishlistWriter for MockRepo {
    fn add_wishlist_item(&self, user_id: i32, product_id: i32) -> RepositoryResult<WishlistItem> {
        self.wishlist_writer.add_wishlist_item(user_id, product_id)
    }

    fn remove_wishlist_items(&self, user_id: i32, product_id: i32) -> RepositoryResult<usize> {
        self.wishlist_writer.remove_wishlist_items(user_id, product_id)
    }
}

impl ProfileReader for MockRepo {
    fn get_profile(&self, user_id: i32) -> RepositoryResult<Option<CustomerProfile>> {
        self.profiles.get_profile(user_id)
    }
}

impl ProfileWriter for MockRepo {
    fn create_profile(&self, profile: &NewCustomerProfile) -> RepositoryResult<CustomerProfile> {
        self.profile_writer.create_profile(profile)
    }

    fn update_profile(
        &self,
        user_id: i32,
        updates: &UpdateCustomerProfile,
    ) -> RepositoryResult<CustomerProfile> {
        self.profile_writer.update_profile(user_id, updates)
    }
}

impl OrderReader for MockRepo {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>> {
        self.orders.get_order_by_id(id)
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>> {
        self.orders.list_orders(query)
    }
}

impl OrderWriter for MockRepo {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        self.order_writer.create_order(new_order)
    }

    fn create_order_from_cart(
        &self,
        user_id: i32,
        shipping: &ShippingDetails,
    ) -> RepositoryResult<Option<Order>> {
        self.order_writer.create_order_from_cart(user_id, shipping)
    }

    fn update_order_status(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> RepositoryResult<Option<Order>> {
        self.order_writer.update_order_status(order_id, from, to)
    }
}

impl EnquiryReader for MockRepo {
    fn list_enquiries(&self, user_id: Option<i32>) -> RepositoryResult<Vec<Enquiry>> {
        self.enquiries.list_enquiries(user_id)
    }
}

impl EnquiryWriter for MockRepo {
    fn create_enquiry(&self, new_enquiry: &NewEnquiry) -> RepositoryResult<Enquiry> {
        self.enquiry_writer.create_enquiry(new_enquiry)
    }
}
