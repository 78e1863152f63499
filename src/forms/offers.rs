use serde::Deserialize;
use validator::Validate;

use crate::domain::offer::{NewOffer, UpdateOffer};
use crate::domain::pricing::Money;
use crate::forms::{FieldValue, FormError, FormResult, parse_id, sanitize_inline_text};

const TITLE_MAX_LEN_VALIDATOR: u64 = 200;
const SUBTITLE_MAX_LEN_VALIDATOR: u64 = 300;

/// Offer payload shared by create and update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct OfferForm {
    /// Product identifier.
    #[serde(default, alias = "product_id")]
    pub product: Option<FieldValue>,
    #[serde(default)]
    #[validate(length(max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(max = SUBTITLE_MAX_LEN_VALIDATOR))]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub display_order: Option<FieldValue>,
    #[serde(default)]
    pub is_active: Option<FieldValue>,
    /// Written onto the product when present and not blank.
    #[serde(default)]
    pub offer_price: Option<FieldValue>,
}

impl OfferForm {
    /// Payload for a new offer. The offer price is only parsed here; it is
    /// checked against the product's price by the caller.
    pub fn into_new_offer(self) -> FormResult<NewOffer> {
        self.validate()?;

        let product_id =
            parse_id(self.product.as_ref()).ok_or_else(|| FormError::invalid("Invalid product"))?;
        let title = self
            .title
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|title| !title.is_empty())
            .ok_or_else(|| FormError::invalid("Title is required"))?;

        let mut offer = NewOffer::new(product_id, title);
        offer.subtitle = self
            .subtitle
            .as_deref()
            .map(sanitize_inline_text)
            .unwrap_or_default();
        offer.display_order = parse_display_order(self.display_order.as_ref())?.unwrap_or(0);
        offer.is_active = parse_flag(self.is_active.as_ref())?.unwrap_or(true);
        if let Some(offer_price) = parse_offer_price(self.offer_price.as_ref())? {
            offer = offer.with_offer_price(offer_price);
        }

        Ok(offer)
    }

    /// Patch for an existing offer; only supplied fields change.
    pub fn into_update_offer(self) -> FormResult<UpdateOffer> {
        self.validate()?;

        let mut update = UpdateOffer::new();

        if let Some(product) = self.product.as_ref() {
            update.product_id =
                Some(parse_id(Some(product)).ok_or_else(|| FormError::invalid("Invalid product"))?);
        }
        if let Some(title) = self.title.as_deref() {
            let title = sanitize_inline_text(title);
            if title.is_empty() {
                return Err(FormError::invalid("Title is required"));
            }
            update.title = Some(title);
        }
        update.subtitle = self.subtitle.as_deref().map(sanitize_inline_text);
        update.display_order = parse_display_order(self.display_order.as_ref())?;
        update.is_active = parse_flag(self.is_active.as_ref())?;
        update.offer_price = parse_offer_price(self.offer_price.as_ref())?;

        Ok(update)
    }
}

fn parse_offer_price(value: Option<&FieldValue>) -> FormResult<Option<Money>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_blank() => Ok(None),
        Some(value) => value
            .as_money()
            .map(Some)
            .ok_or_else(|| FormError::invalid("Invalid offer price")),
    }
}

fn parse_display_order(value: Option<&FieldValue>) -> FormResult<Option<i32>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_blank() => Ok(Some(0)),
        Some(value) => value
            .as_i32()
            .filter(|order| *order >= 0)
            .map(Some)
            .ok_or_else(|| FormError::invalid("Invalid display order")),
    }
}

fn parse_flag(value: Option<&FieldValue>) -> FormResult<Option<bool>> {
    match value {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| FormError::invalid("Invalid is_active")),
    }
}
