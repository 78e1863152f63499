use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    CustomerProfile as DomainCustomerProfile, NewCustomerProfile as DomainNewCustomerProfile,
    UpdateCustomerProfile as DomainUpdateCustomerProfile,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customer_profiles)]
pub struct CustomerProfile {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customer_profiles)]
pub struct NewCustomerProfile<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub pincode: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customer_profiles)]
pub struct UpdateCustomerProfile<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub pincode: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Row plus the email of its user.
impl From<(CustomerProfile, String)> for DomainCustomerProfile {
    fn from((value, email): (CustomerProfile, String)) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            email,
            name: value.name,
            phone: value.phone,
            address: value.address,
            city: value.city,
            state: value.state,
            pincode: value.pincode,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCustomerProfile> for NewCustomerProfile<'a> {
    fn from(value: &'a DomainNewCustomerProfile) -> Self {
        Self {
            user_id: value.user_id,
            name: value.name.as_str(),
            phone: value.phone.as_str(),
            address: value.address.as_str(),
            city: value.city.as_str(),
            state: value.state.as_str(),
            pincode: value.pincode.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomerProfile> for UpdateCustomerProfile<'a> {
    fn from(value: &'a DomainUpdateCustomerProfile) -> Self {
        Self {
            name: value.name.as_deref(),
            phone: value.phone.as_deref(),
            address: value.address.as_deref(),
            city: value.city.as_deref(),
            state: value.state.as_deref(),
            pincode: value.pincode.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
