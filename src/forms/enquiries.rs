use serde::Deserialize;
use validator::Validate;

use crate::domain::enquiry::{EnquirySubject, NewEnquiry};
use crate::domain::user::normalize_email;
use crate::forms::{
    FieldValue, FormError, FormResult, sanitize_inline_text, sanitize_multiline_text,
};

const NAME_MAX_LEN_VALIDATOR: u64 = 100;
const ORDER_ID_MAX_LEN_VALIDATOR: u64 = 50;
const MESSAGE_MAX_LEN_VALIDATOR: u64 = 5_000;

/// Customer-service enquiry payload.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EnquiryForm {
    #[serde(default)]
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    /// Free text; clients send either a number or a string.
    #[serde(default)]
    pub order_id: Option<FieldValue>,
    #[serde(default)]
    #[validate(length(min = 1, max = MESSAGE_MAX_LEN_VALIDATOR))]
    pub message: String,
}

#[derive(Validate)]
struct OrderReference {
    #[validate(length(max = ORDER_ID_MAX_LEN_VALIDATOR))]
    order_id: String,
}

impl EnquiryForm {
    /// Sanitised enquiry attached to `user_id` when the sender is signed in.
    pub fn into_new_enquiry(self, user_id: Option<i32>) -> FormResult<NewEnquiry> {
        let form = EnquiryForm {
            name: sanitize_inline_text(&self.name),
            email: normalize_email(&self.email),
            message: sanitize_multiline_text(&self.message),
            ..self
        };
        form.validate()?;

        let subject = match form.subject.as_deref().map(str::trim) {
            None | Some("") => EnquirySubject::default(),
            Some(value) => value
                .parse()
                .map_err(|_| FormError::invalid("Invalid subject"))?,
        };

        let order_id = form
            .order_id
            .as_ref()
            .map(FieldValue::as_text)
            .unwrap_or_default();
        OrderReference {
            order_id: order_id.clone(),
        }
        .validate()?;

        Ok(NewEnquiry {
            user_id,
            name: form.name,
            email: form.email,
            subject,
            order_id,
            message: form.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enquiry_defaults_to_general_subject() {
        let form: EnquiryForm = serde_json::from_str(
            r#"{"name": " Asha ", "email": "Asha@Example.com", "message": "Where is my parcel?", "order_id": 42}"#,
        )
        .unwrap();

        let enquiry = form.into_new_enquiry(Some(3)).unwrap();

        assert_eq!(enquiry.subject, EnquirySubject::General);
        assert_eq!(enquiry.name, "Asha");
        assert_eq!(enquiry.email, "asha@example.com");
        assert_eq!(enquiry.order_id, "42");
        assert_eq!(enquiry.user_id, Some(3));
    }

    #[test]
    fn enquiry_requires_message_and_valid_email() {
        let no_message: EnquiryForm =
            serde_json::from_str(r#"{"name": "A", "email": "a@b.co", "message": "   "}"#).unwrap();
        let bad_email: EnquiryForm =
            serde_json::from_str(r#"{"name": "A", "email": "nope", "message": "hi"}"#).unwrap();

        assert!(matches!(no_message.into_new_enquiry(None), Err(FormError::Validation(_))));
        assert!(matches!(bad_email.into_new_enquiry(None), Err(FormError::Validation(_))));
    }

    #[test]
    fn enquiry_rejects_unknown_subject() {
        let form: EnquiryForm = serde_json::from_str(
            r#"{"name": "A", "email": "a@b.co", "message": "hi", "subject": "Refunds"}"#,
        )
        .unwrap();

        assert!(matches!(
            form.into_new_enquiry(None),
            Err(FormError::Invalid(msg)) if msg == "Invalid subject"
        ));
    }
}
