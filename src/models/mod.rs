pub mod cart;
pub mod category;
pub mod config;
pub mod customer;
pub mod enquiry;
pub mod offer;
pub mod order;
pub mod product;
pub mod user;
pub mod wishlist;
