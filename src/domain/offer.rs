use chrono::{Local, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::domain::pricing::Money;
use crate::domain::product::Product;

/// Promotional banner pointing at one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub subtitle: String,
    /// Lower values are listed first.
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// The promoted product, loaded alongside the offer.
    pub product: Option<Product>,
}

impl Offer {
    /// Offers are public only while both the offer and its product are active.
    pub fn is_visible(&self) -> bool {
        self.is_active && self.product.as_ref().is_some_and(|product| product.is_active)
    }
}

#[derive(Serialize)]
struct OfferRepr<'a> {
    id: i32,
    title: &'a str,
    subtitle: &'a str,
    product_id: i32,
    product_name: Option<&'a str>,
    original_price: Option<Money>,
    offer_price: Option<Money>,
    image: Option<&'a str>,
    display_order: i32,
    is_active: bool,
}

impl Serialize for Offer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let product = self.product.as_ref();
        OfferRepr {
            id: self.id,
            title: &self.title,
            subtitle: &self.subtitle,
            product_id: self.product_id,
            product_name: product.map(|product| product.name.as_str()),
            original_price: product.map(|product| product.original_price),
            offer_price: product.and_then(|product| product.offer_price),
            image: product.and_then(|product| product.image.as_deref()),
            display_order: self.display_order,
            is_active: self.is_active,
        }
        .serialize(serializer)
    }
}

/// Payload required to insert a new offer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    pub product_id: i32,
    pub title: String,
    pub subtitle: String,
    pub display_order: i32,
    pub is_active: bool,
    /// Offer price written onto the product in the same transaction.
    pub offer_price: Option<Money>,
}

impl NewOffer {
    pub fn new(product_id: i32, title: impl Into<String>) -> Self {
        Self {
            product_id,
            title: title.into(),
            subtitle: String::new(),
            display_order: 0,
            is_active: true,
            offer_price: None,
        }
    }

    pub fn with_offer_price(mut self, offer_price: Money) -> Self {
        self.offer_price = Some(offer_price);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Patch data applied when updating an offer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOffer {
    pub product_id: Option<i32>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    /// Offer price written onto the offer's product.
    pub offer_price: Option<Money>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateOffer {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateOffer {
    pub fn new() -> Self {
        Self {
            product_id: None,
            title: None,
            subtitle: None,
            display_order: None,
            is_active: None,
            offer_price: None,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Which offers a listing should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferListQuery {
    /// Active offers on active products.
    Visible,
    All,
}
