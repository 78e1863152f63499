use std::collections::HashSet;

use serde::Deserialize;
use validator::Validate;

use crate::domain::pricing::{Money, check_offer_price};
use crate::domain::product::{NewProduct, NewSizeVariant, UpdateProduct};
use crate::forms::{
    FieldValue, FormError, FormResult, parse_id, present, sanitize_inline_text,
    sanitize_multiline_text,
};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 200;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

const IMAGE_MAX_LEN_VALIDATOR: u64 = 500;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 10_000;

/// Maximum allowed length for a size label.
const SIZE_LABEL_MAX_LEN: usize = 40;
const SIZE_LABEL_MAX_LEN_VALIDATOR: u64 = SIZE_LABEL_MAX_LEN as u64;

/// One entry of the nested `size_variants` list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SizeVariantForm {
    #[serde(default)]
    #[validate(length(max = SIZE_LABEL_MAX_LEN_VALIDATOR))]
    pub size_label: String,
    #[serde(default)]
    pub original_price: Option<FieldValue>,
    #[serde(default)]
    pub offer_price: Option<FieldValue>,
    #[serde(default)]
    pub stock: Option<FieldValue>,
    #[serde(default)]
    pub display_order: Option<FieldValue>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl SizeVariantForm {
    fn into_variant(self, position: usize) -> FormResult<NewSizeVariant> {
        self.validate()?;

        let size_label = sanitize_inline_text(&self.size_label);
        if size_label.is_empty() {
            return Err(FormError::invalid("Size label is required"));
        }

        let original_price = parse_price(self.original_price.as_ref())?
            .ok_or_else(|| FormError::invalid("Size variant price is required"))?;
        let offer_price = parse_offer_price(original_price, self.offer_price.as_ref())?;

        Ok(NewSizeVariant {
            size_label,
            original_price,
            offer_price,
            stock: parse_count(self.stock.as_ref(), "stock")?.unwrap_or(0),
            display_order: parse_count(self.display_order.as_ref(), "display_order")?
                .unwrap_or(i32::try_from(position).unwrap_or(i32::MAX)),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Payload posted to create a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Category identifier.
    #[serde(default, alias = "category_id")]
    pub category: Option<FieldValue>,
    #[serde(default)]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    pub original_price: Option<FieldValue>,
    #[serde(default)]
    pub offer_price: Option<FieldValue>,
    #[serde(default)]
    pub stock: Option<FieldValue>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    #[validate(length(max = IMAGE_MAX_LEN_VALIDATOR))]
    pub image: Option<String>,
    #[serde(default)]
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    #[serde(default)]
    pub size_variants: Option<Vec<SizeVariantForm>>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> FormResult<NewProduct> {
        self.validate()?;

        let category_id =
            parse_id(self.category.as_ref()).ok_or_else(|| FormError::invalid("Invalid category"))?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(FormError::invalid("Product name is required"));
        }

        let original_price = parse_price(self.original_price.as_ref())?
            .ok_or_else(|| FormError::invalid("Original price is required"))?;
        let offer_price = parse_offer_price(original_price, self.offer_price.as_ref())?;

        let mut product = NewProduct::new(category_id, name, original_price)
            .with_stock(parse_count(self.stock.as_ref(), "stock")?.unwrap_or(0))
            .with_size_variants(parse_variants(self.size_variants)?);
        if let Some(offer_price) = offer_price {
            product = product.with_offer_price(offer_price);
        }
        product.is_active = self.is_active.unwrap_or(true);
        product.featured = self.featured.unwrap_or(false);
        product.image = clean_image(self.image);
        product.description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .unwrap_or_default();

        Ok(product)
    }
}

/// Partial update payload for a product.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    #[serde(default, alias = "category_id")]
    pub category: Option<FieldValue>,
    #[serde(default)]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[serde(default)]
    pub original_price: Option<FieldValue>,
    /// `null` or blank clears the offer price.
    #[serde(default, deserialize_with = "present")]
    pub offer_price: Option<Option<FieldValue>>,
    #[serde(default)]
    pub stock: Option<FieldValue>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Option<String>>,
    #[serde(default)]
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    #[serde(default)]
    pub size_variants: Option<Vec<SizeVariantForm>>,
}

impl EditProductForm {
    /// Validates the payload into a domain `UpdateProduct`.
    ///
    /// The offer price is checked against the submitted original price
    /// only; the caller checks it against the stored price otherwise.
    pub fn into_update_product(self) -> FormResult<UpdateProduct> {
        self.validate()?;

        let mut update = UpdateProduct::new();

        if let Some(category) = self.category.as_ref() {
            update.category_id =
                Some(parse_id(Some(category)).ok_or_else(|| FormError::invalid("Invalid category"))?);
        }

        if let Some(name) = self.name.as_deref() {
            let name = sanitize_inline_text(name);
            if name.is_empty() {
                return Err(FormError::invalid("Product name is required"));
            }
            update.name = Some(name);
        }

        if self.original_price.is_some() {
            update.original_price = Some(
                parse_price(self.original_price.as_ref())?
                    .ok_or_else(|| FormError::invalid("Original price is required"))?,
            );
        }

        if let Some(offer_price) = self.offer_price {
            update.offer_price = Some(match offer_price {
                Some(value) if !value.is_blank() => Some(
                    value
                        .as_money()
                        .ok_or_else(|| FormError::invalid("Invalid offer price"))?,
                ),
                _ => None,
            });
        }

        if let (Some(original), Some(Some(offer))) = (update.original_price, update.offer_price) {
            check_offer_price(original, offer)
                .map_err(|err| FormError::invalid(err.to_string()))?;
        }

        update.stock = parse_count(self.stock.as_ref(), "stock")?;
        update.is_active = self.is_active;
        update.featured = self.featured;
        update.image = self.image.map(clean_image);
        update.description = self.description.as_deref().map(sanitize_multiline_text);

        if let Some(variants) = self.size_variants {
            update.size_variants = Some(parse_variants(Some(variants))?);
        }

        Ok(update)
    }
}

fn parse_variants(forms: Option<Vec<SizeVariantForm>>) -> FormResult<Vec<NewSizeVariant>> {
    let Some(forms) = forms else {
        return Ok(Vec::new());
    };

    let mut seen = HashSet::new();
    let mut variants = Vec::with_capacity(forms.len());
    for (position, form) in forms.into_iter().enumerate() {
        let variant = form.into_variant(position)?;
        if !seen.insert(variant.size_label.to_lowercase()) {
            return Err(FormError::invalid(format!(
                "Duplicate size label `{}`",
                variant.size_label
            )));
        }
        variants.push(variant);
    }

    Ok(variants)
}

fn parse_price(value: Option<&FieldValue>) -> FormResult<Option<Money>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_blank() => Ok(None),
        Some(value) => match value.as_money() {
            Some(price) if price < Money::ZERO => Err(FormError::invalid("Invalid price")),
            Some(price) => Ok(Some(price)),
            None => Err(FormError::invalid("Invalid price")),
        },
    }
}

fn parse_offer_price(original: Money, value: Option<&FieldValue>) -> FormResult<Option<Money>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_blank() => Ok(None),
        Some(value) => {
            let offer = value
                .as_money()
                .ok_or_else(|| FormError::invalid("Invalid offer price"))?;
            check_offer_price(original, offer).map_err(|err| FormError::invalid(err.to_string()))?;
            Ok(Some(offer))
        }
    }
}

fn parse_count(value: Option<&FieldValue>, field: &str) -> FormResult<Option<i32>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_blank() => Ok(None),
        Some(value) => match value.as_i32() {
            Some(count) if count >= 0 => Ok(Some(count)),
            _ => Err(FormError::invalid(format!("Invalid {field}"))),
        },
    }
}

fn clean_image(image: Option<String>) -> Option<String> {
    image
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
