use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::offer::{
    NewOffer as DomainNewOffer, Offer as DomainOffer, UpdateOffer as DomainUpdateOffer,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::offers)]
pub struct Offer {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub subtitle: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::offers)]
pub struct NewOffer<'a> {
    pub product_id: i32,
    pub title: &'a str,
    pub subtitle: &'a str,
    pub display_order: i32,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::offers)]
pub struct UpdateOffer<'a> {
    pub product_id: Option<i32>,
    pub title: Option<&'a str>,
    pub subtitle: Option<&'a str>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Offer> for DomainOffer {
    fn from(value: Offer) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            title: value.title,
            subtitle: value.subtitle,
            display_order: value.display_order,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
            product: None,
        }
    }
}

impl<'a> From<&'a DomainNewOffer> for NewOffer<'a> {
    fn from(value: &'a DomainNewOffer) -> Self {
        Self {
            product_id: value.product_id,
            title: value.title.as_str(),
            subtitle: value.subtitle.as_str(),
            display_order: value.display_order,
            is_active: value.is_active,
        }
    }
}

impl<'a> From<&'a DomainUpdateOffer> for UpdateOffer<'a> {
    fn from(value: &'a DomainUpdateOffer) -> Self {
        Self {
            product_id: value.product_id,
            title: value.title.as_deref(),
            subtitle: value.subtitle.as_deref(),
            display_order: value.display_order,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
