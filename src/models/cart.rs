use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::NewCartItem as DomainNewCartItem;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem {
    pub user_id: i32,
    pub product_id: i32,
    pub size_variant_id: Option<i32>,
    pub quantity: i32,
}

impl From<&DomainNewCartItem> for NewCartItem {
    fn from(value: &DomainNewCartItem) -> Self {
        Self {
            user_id: value.user_id,
            product_id: value.product_id,
            size_variant_id: value.size_variant_id,
            quantity: value.quantity,
        }
    }
}
