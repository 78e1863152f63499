use serde::Deserialize;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::forms::{FormError, FormResult, sanitize_inline_text};

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 100;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Payload posted to create a category.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[serde(default)]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> FormResult<NewCategory> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(FormError::invalid("Category name is required"));
        }

        let category = NewCategory::new(name);
        Ok(match self.is_active {
            Some(false) => category.inactive(),
            _ => category,
        })
    }
}
