use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// Shipping details a customer keeps on file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerProfile {
    #[serde(skip_serializing)]
    pub id: i32,
    /// Owning user.
    #[serde(skip_serializing)]
    pub user_id: i32,
    /// Email of the owning user, loaded alongside the profile.
    pub email: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
    #[serde(skip_serializing)]
    pub updated_at: NaiveDateTime,
}

impl CustomerProfile {
    /// A profile is complete once every shipping field is filled in.
    pub fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.phone,
            &self.address,
            &self.city,
            &self.state,
            &self.pincode,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Payload required to insert a profile for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomerProfile {
    pub user_id: i32,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl NewCustomerProfile {
    /// Empty profile carrying only the display name.
    #[must_use]
    pub fn empty(user_id: i32, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial profile update; `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCustomerProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateCustomerProfile {
    fn default() -> Self {
        Self {
            name: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            pincode: None,
            updated_at: Local::now().naive_utc(),
        }
    }
}
