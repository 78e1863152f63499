use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::wishlist::WishlistItem as DomainWishlistItem,
    models::wishlist::{NewWishlistItem as DbNewWishlistItem, WishlistItem as DbWishlistItem},
    repository::product::load_products_by_ids,
    repository::{DieselRepository, WishlistReader, WishlistWriter},
};

impl WishlistReader for DieselRepository {
    fn list_wishlist_items(&self, user_id: i32) -> RepositoryResult<Vec<DomainWishlistItem>> {
        use crate::schema::wishlist_items;

        let mut conn = self.conn()?;
        let rows = wishlist_items::table
            .filter(wishlist_items::user_id.eq(user_id))
            .order((wishlist_items::added_at.desc(), wishlist_items::id.desc()))
            .load::<DbWishlistItem>(&mut conn)?;

        hydrate(&mut conn, rows)
    }
}

impl WishlistWriter for DieselRepository {
    fn add_wishlist_item(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> RepositoryResult<DomainWishlistItem> {
        use crate::schema::wishlist_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainWishlistItem, RepositoryError, _>(|conn| {
            let existing = wishlist_items::table
                .filter(wishlist_items::user_id.eq(user_id))
                .filter(wishlist_items::product_id.eq(product_id))
                .first::<DbWishlistItem>(conn)
                .optional()?;

            let row = match existing {
                Some(row) => row,
                None => diesel::insert_into(wishlist_items::table)
                    .values(&DbNewWishlistItem {
                        user_id,
                        product_id,
                    })
                    .get_result::<DbWishlistItem>(conn)?,
            };

            hydrate(conn, vec![row])?.pop().ok_or(RepositoryError::NotFound)
        })
    }

    fn remove_wishlist_items(&self, user_id: i32, product_id: i32) -> RepositoryResult<usize> {
        use crate::schema::wishlist_items;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            wishlist_items::table
                .filter(wishlist_items::user_id.eq(user_id))
                .filter(wishlist_items::product_id.eq(product_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }
}

fn hydrate(
    conn: &mut SqliteConnection,
    rows: Vec<DbWishlistItem>,
) -> RepositoryResult<Vec<DomainWishlistItem>> {
    let product_ids: Vec<i32> = rows.iter().map(|row| row.product_id).collect();
    let products = load_products_by_ids(conn, &product_ids)?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            Some(DomainWishlistItem {
                id: row.id,
                user_id: row.user_id,
                product: products.get(&row.product_id)?.clone(),
                added_at: row.added_at,
            })
        })
        .collect())
}
