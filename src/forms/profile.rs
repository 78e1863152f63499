use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::UpdateCustomerProfile;
use crate::forms::{FieldValue, FormResult, sanitize_inline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = 150;
const FIELD_MAX_LEN_VALIDATOR: u64 = 100;
const PHONE_MAX_LEN_VALIDATOR: u64 = 20;
const PINCODE_MAX_LEN_VALIDATOR: u64 = 10;

/// Partial profile update; omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<FieldValue>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = FIELD_MAX_LEN_VALIDATOR))]
    pub city: Option<String>,
    #[serde(default)]
    #[validate(length(max = FIELD_MAX_LEN_VALIDATOR))]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<FieldValue>,
}

/// Normalised text fields checked by length after sanitisation.
#[derive(Debug, Validate)]
struct ProfileLengths {
    #[validate(length(max = PHONE_MAX_LEN_VALIDATOR))]
    phone: Option<String>,
    #[validate(length(max = PINCODE_MAX_LEN_VALIDATOR))]
    pincode: Option<String>,
}

impl ProfileForm {
    pub fn into_update(self) -> FormResult<UpdateCustomerProfile> {
        self.validate()?;

        let phone = self.phone.as_ref().map(|value| sanitize_inline_text(&value.as_text()));
        let pincode = self
            .pincode
            .as_ref()
            .map(|value| sanitize_inline_text(&value.as_text()));

        ProfileLengths {
            phone: phone.clone(),
            pincode: pincode.clone(),
        }
        .validate()?;

        Ok(UpdateCustomerProfile {
            name: self.name.as_deref().map(sanitize_inline_text),
            phone,
            address: self.address.as_deref().map(sanitize_inline_text),
            city: self.city.as_deref().map(sanitize_inline_text),
            state: self.state.as_deref().map(sanitize_inline_text),
            pincode,
            ..UpdateCustomerProfile::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormError;

    #[test]
    fn profile_form_keeps_only_supplied_fields() {
        let form: ProfileForm =
            serde_json::from_str(r#"{"phone": 9876543210, "city": "  Pune "}"#).unwrap();

        let update = form.into_update().unwrap();

        assert_eq!(update.phone.as_deref(), Some("9876543210"));
        assert_eq!(update.city.as_deref(), Some("Pune"));
        assert!(update.name.is_none());
        assert!(update.address.is_none());
    }

    #[test]
    fn profile_form_rejects_long_pincode() {
        let form: ProfileForm = serde_json::from_str(r#"{"pincode": "12345678901"}"#).unwrap();

        assert!(matches!(form.into_update(), Err(FormError::Validation(_))));
    }
}
