use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Topic picked on the contact form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnquirySubject {
    #[default]
    General,
    Order,
    Payment,
    Delivery,
    Other,
}

impl EnquirySubject {
    pub fn as_str(self) -> &'static str {
        match self {
            EnquirySubject::General => "General",
            EnquirySubject::Order => "Order",
            EnquirySubject::Payment => "Payment",
            EnquirySubject::Delivery => "Delivery",
            EnquirySubject::Other => "Other",
        }
    }
}

impl FromStr for EnquirySubject {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "General" => Ok(EnquirySubject::General),
            "Order" => Ok(EnquirySubject::Order),
            "Payment" => Ok(EnquirySubject::Payment),
            "Delivery" => Ok(EnquirySubject::Delivery),
            "Other" => Ok(EnquirySubject::Other),
            _ => Err(()),
        }
    }
}

/// Customer-service message left through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enquiry {
    pub id: i32,
    /// Set when the sender was logged in.
    #[serde(skip_serializing)]
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub subject: EnquirySubject,
    /// Free-text order reference supplied by the sender.
    pub order_id: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnquiry {
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub subject: EnquirySubject,
    pub order_id: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_parses_known_values() {
        assert_eq!("Payment".parse(), Ok(EnquirySubject::Payment));
        assert!("payment".parse::<EnquirySubject>().is_err());
        assert_eq!(EnquirySubject::default().as_str(), "General");
    }
}
