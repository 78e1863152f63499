use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::wishlist_items)]
pub struct WishlistItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub added_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::wishlist_items)]
pub struct NewWishlistItem {
    pub user_id: i32,
    pub product_id: i32,
}
