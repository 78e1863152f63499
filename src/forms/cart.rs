use serde::Deserialize;

use crate::forms::{FieldValue, FormError, FormResult, clamp_quantity, parse_id};

/// Line selection shared by cart and wishlist payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSelection {
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    pub quantity: i32,
}

/// Payload for adding a product to the cart or the wishlist.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub product_id: Option<FieldValue>,
    /// Older clients send the id as `product`.
    #[serde(default)]
    pub product: Option<FieldValue>,
    #[serde(default)]
    pub size_variant_id: Option<FieldValue>,
    #[serde(default)]
    pub quantity: Option<FieldValue>,
}

impl AddToCartForm {
    pub fn into_selection(self) -> FormResult<CartSelection> {
        Ok(CartSelection {
            product_id: product_id(self.product_id.as_ref(), self.product.as_ref())?,
            size_variant_id: size_variant_id(self.size_variant_id.as_ref())?,
            quantity: clamp_quantity(self.quantity.as_ref()),
        })
    }
}

/// Payload for setting the quantity of a cart line. A quantity of zero
/// or less removes the line.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCartForm {
    #[serde(default)]
    pub product_id: Option<FieldValue>,
    #[serde(default)]
    pub product: Option<FieldValue>,
    #[serde(default)]
    pub size_variant_id: Option<FieldValue>,
    #[serde(default)]
    pub quantity: Option<FieldValue>,
}

impl UpdateCartForm {
    pub fn into_selection(self) -> FormResult<CartSelection> {
        let quantity = self
            .quantity
            .as_ref()
            .and_then(FieldValue::as_i32)
            .ok_or_else(|| FormError::invalid("Invalid quantity"))?;

        Ok(CartSelection {
            product_id: product_id(self.product_id.as_ref(), self.product.as_ref())?,
            size_variant_id: size_variant_id(self.size_variant_id.as_ref())?,
            quantity,
        })
    }
}

/// Query string of the remove endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveCartQuery {
    #[serde(default)]
    pub size_variant_id: Option<i32>,
}

fn product_id(primary: Option<&FieldValue>, fallback: Option<&FieldValue>) -> FormResult<i32> {
    let value = primary.filter(|value| !value.is_blank()).or(fallback);
    parse_id(value).ok_or_else(|| FormError::invalid("Invalid product"))
}

fn size_variant_id(value: Option<&FieldValue>) -> FormResult<Option<i32>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_blank() => Ok(None),
        Some(value) => parse_id(Some(value))
            .map(Some)
            .ok_or_else(|| FormError::invalid("Invalid size variant")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_falls_back_to_product_field() {
        let form: AddToCartForm = serde_json::from_str(r#"{"product": "9", "quantity": "abc"}"#).unwrap();

        let selection = form.into_selection().unwrap();

        assert_eq!(selection.product_id, 9);
        assert_eq!(selection.quantity, 1);
        assert_eq!(selection.size_variant_id, None);
    }

    #[test]
    fn add_form_reads_size_variant() {
        let form: AddToCartForm =
            serde_json::from_str(r#"{"product_id": 2, "size_variant_id": 5, "quantity": 3}"#).unwrap();

        let selection = form.into_selection().unwrap();

        assert_eq!(selection.size_variant_id, Some(5));
        assert_eq!(selection.quantity, 3);
    }

    #[test]
    fn add_form_requires_a_product() {
        let form: AddToCartForm = serde_json::from_str(r#"{"quantity": 2}"#).unwrap();

        assert!(matches!(
            form.into_selection(),
            Err(FormError::Invalid(msg)) if msg == "Invalid product"
        ));
    }

    #[test]
    fn update_form_requires_integer_quantity() {
        let form: UpdateCartForm =
            serde_json::from_str(r#"{"product_id": 2, "quantity": "lots"}"#).unwrap();

        assert!(matches!(
            form.into_selection(),
            Err(FormError::Invalid(msg)) if msg == "Invalid quantity"
        ));
    }

    #[test]
    fn update_form_keeps_non_positive_quantity() {
        let form: UpdateCartForm =
            serde_json::from_str(r#"{"product_id": 2, "quantity": 0}"#).unwrap();

        assert_eq!(form.into_selection().unwrap().quantity, 0);
    }
}
