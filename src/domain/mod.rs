pub mod auth;
pub mod cart;
pub mod category;
pub mod customer;
pub mod enquiry;
pub mod offer;
pub mod order;
pub mod pricing;
pub mod product;
pub mod slug;
pub mod user;
pub mod wishlist;
