use serde::Deserialize;

use crate::domain::order::{OrderStatus, ShippingDetails, join_address_lines};
use crate::forms::{FieldValue, FormError, FormResult, clamp_quantity, parse_id, required_text};

const MISSING_FIELDS: &str = "All required fields must be provided";

/// Shipping block sent with every checkout.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ShippingForm {
    #[serde(default)]
    pub full_name: Option<FieldValue>,
    #[serde(default)]
    pub phone: Option<FieldValue>,
    #[serde(default)]
    pub address1: Option<FieldValue>,
    #[serde(default)]
    pub address2: Option<FieldValue>,
    #[serde(default)]
    pub city: Option<FieldValue>,
    #[serde(default)]
    pub state: Option<FieldValue>,
    #[serde(default)]
    pub pincode: Option<FieldValue>,
    /// Only presence is checked; no payment is taken.
    #[serde(default)]
    pub payment_method: Option<FieldValue>,
}

impl ShippingForm {
    pub fn into_shipping(self) -> FormResult<ShippingDetails> {
        let missing = || FormError::invalid(MISSING_FIELDS);

        let full_name = required_text(self.full_name.as_ref()).ok_or_else(missing)?;
        let phone = required_text(self.phone.as_ref()).ok_or_else(missing)?;
        let address1 = required_text(self.address1.as_ref()).ok_or_else(missing)?;
        let city = required_text(self.city.as_ref()).ok_or_else(missing)?;
        let state = required_text(self.state.as_ref()).ok_or_else(missing)?;
        let pincode = required_text(self.pincode.as_ref()).ok_or_else(missing)?;
        required_text(self.payment_method.as_ref()).ok_or_else(missing)?;
        let address2 = required_text(self.address2.as_ref()).unwrap_or_default();

        Ok(ShippingDetails {
            full_name,
            phone,
            address: join_address_lines(&address1, &address2),
            city,
            state,
            pincode,
        })
    }
}

/// Validated single-product purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyNowRequest {
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    pub quantity: i32,
    pub shipping: ShippingDetails,
}

/// Payload of the "buy now" endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct BuyNowForm {
    #[serde(default)]
    pub product_id: Option<FieldValue>,
    #[serde(default)]
    pub size_variant_id: Option<FieldValue>,
    #[serde(default)]
    pub quantity: Option<FieldValue>,
    #[serde(flatten)]
    pub shipping: ShippingForm,
}

impl BuyNowForm {
    pub fn into_request(self) -> FormResult<BuyNowRequest> {
        let product_present = self
            .product_id
            .as_ref()
            .is_some_and(|value| !value.is_blank());
        if !product_present {
            return Err(FormError::invalid(MISSING_FIELDS));
        }
        let shipping = self.shipping.into_shipping()?;

        let product_id =
            parse_id(self.product_id.as_ref()).ok_or_else(|| FormError::invalid("Invalid product"))?;
        let size_variant_id = match self.size_variant_id.as_ref() {
            None => None,
            Some(value) if value.is_blank() => None,
            Some(value) => Some(
                parse_id(Some(value)).ok_or_else(|| FormError::invalid("Invalid product"))?,
            ),
        };

        Ok(BuyNowRequest {
            product_id,
            size_variant_id,
            quantity: clamp_quantity(self.quantity.as_ref()),
            shipping,
        })
    }
}

/// Seller status change payload.
#[derive(Debug, Default, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusForm {
    /// Target status; only the forward states are accepted here.
    pub fn into_status(self) -> FormResult<OrderStatus> {
        let invalid = || FormError::invalid("Invalid status");
        let status: OrderStatus = self
            .status
            .as_deref()
            .map(str::trim)
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        if status == OrderStatus::Cancelled {
            return Err(invalid());
        }
        Ok(status)
    }
}

/// Query string of the seller order listing.
#[derive(Debug, Default, Deserialize)]
pub struct SellerOrdersQuery {
    #[serde(default)]
    pub group: Option<String>,
}

impl SellerOrdersQuery {
    pub fn group_by_customer(&self) -> bool {
        self.group.as_deref() == Some("customer")
    }
}
