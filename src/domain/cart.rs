use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::domain::pricing::{Money, PriceQuote, Priced};
use crate::domain::product::{Product, ProductSizeVariant};

/// One line in a customer's cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub product: Product,
    /// Selected size. Its prices supersede the product's.
    pub size_variant: Option<ProductSizeVariant>,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CartItem {
    pub fn quote(&self) -> PriceQuote {
        match &self.size_variant {
            Some(variant) => variant.quote(),
            None => self.product.quote(),
        }
    }

    pub fn line_total(&self) -> Money {
        self.quote().selling_price.times(self.quantity)
    }

    pub fn size_label(&self) -> &str {
        self.size_variant
            .as_ref()
            .map_or("", |variant| variant.size_label.as_str())
    }
}

#[derive(Serialize)]
struct CartItemRepr<'a> {
    id: i32,
    product: &'a Product,
    size_variant: Option<&'a ProductSizeVariant>,
    quantity: i32,
    price: Money,
    has_offer: bool,
    discounted_price: Option<Money>,
    selling_price: Money,
    line_total: Money,
}

impl Serialize for CartItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let quote = self.quote();
        CartItemRepr {
            id: self.id,
            product: &self.product,
            size_variant: self.size_variant.as_ref(),
            quantity: self.quantity,
            price: quote.original_price,
            has_offer: quote.has_offer,
            discounted_price: quote.discounted_price(),
            selling_price: quote.selling_price,
            line_total: self.line_total(),
        }
        .serialize(serializer)
    }
}

/// Line added to a cart; merged into an existing line for the same
/// product and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub user_id: i32,
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    pub quantity: i32,
}

/// Identifies exactly one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLineKey {
    pub user_id: i32,
    pub product_id: i32,
    /// `None` is the line without a size.
    pub size_variant_id: Option<i32>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::product::tests::{fixed_datetime, sample_product, sample_variant};

    pub(crate) fn cart_item(
        id: i32,
        product: Product,
        size_variant: Option<ProductSizeVariant>,
        quantity: i32,
    ) -> CartItem {
        CartItem {
            id,
            user_id: 1,
            product,
            size_variant,
            quantity,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn variant_prices_supersede_product_prices() {
        let product = sample_product(1, 1000, None);
        let variant = sample_variant(5, 1, "L", 1200, Some(900));
        let item = cart_item(1, product, Some(variant), 2);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], "1200.00");
        assert_eq!(json["has_offer"], true);
        assert_eq!(json["discounted_price"], "900.00");
        assert_eq!(json["line_total"], "1800.00");
        assert_eq!(item.size_label(), "L");
    }

    #[test]
    fn product_prices_apply_without_variant() {
        let item = cart_item(1, sample_product(1, 1000, None), None, 3);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], "1000.00");
        assert_eq!(json["has_offer"], false);
        assert_eq!(json["discounted_price"], serde_json::Value::Null);
        assert_eq!(item.line_total(), Money::from_units(3000));
    }
}
