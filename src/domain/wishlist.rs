use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;

/// Product saved by a customer for later.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WishlistItem {
    pub id: i32,
    #[serde(skip_serializing)]
    pub user_id: i32,
    pub product: Product,
    pub added_at: NaiveDateTime,
}
