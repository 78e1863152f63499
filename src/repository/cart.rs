use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::cart::{CartItem as DomainCartItem, CartLineKey, NewCartItem as DomainNewCartItem},
    models::cart::{CartItem as DbCartItem, NewCartItem as DbNewCartItem},
    repository::product::load_products_by_ids,
    repository::{CartReader, CartWriter, DieselRepository},
};

impl CartReader for DieselRepository {
    fn list_cart_items(&self, user_id: i32) -> RepositoryResult<Vec<DomainCartItem>> {
        let mut conn = self.conn()?;
        load_cart_items(&mut conn, user_id)
    }
}

impl CartWriter for DieselRepository {
    fn add_cart_item(&self, new_item: &DomainNewCartItem) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCartItem, RepositoryError, _>(|conn| {
            let key = CartLineKey {
                user_id: new_item.user_id,
                product_id: new_item.product_id,
                size_variant_id: new_item.size_variant_id,
            };

            let row = match find_line(conn, &key)? {
                Some(existing) => diesel::update(cart_items::table.filter(cart_items::id.eq(existing.id)))
                    .set((
                        cart_items::quantity.eq(existing.quantity.saturating_add(new_item.quantity)),
                        cart_items::updated_at.eq(Local::now().naive_utc()),
                    ))
                    .get_result::<DbCartItem>(conn)?,
                None => diesel::insert_into(cart_items::table)
                    .values(&DbNewCartItem::from(new_item))
                    .get_result::<DbCartItem>(conn)?,
            };

            hydrate_cart_items(conn, vec![row])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn update_cart_item_quantity(
        &self,
        key: &CartLineKey,
        quantity: i32,
    ) -> RepositoryResult<DomainCartItem> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCartItem, RepositoryError, _>(|conn| {
            let existing = find_line(conn, key)?.ok_or(RepositoryError::NotFound)?;

            let row = diesel::update(cart_items::table.filter(cart_items::id.eq(existing.id)))
                .set((
                    cart_items::quantity.eq(quantity),
                    cart_items::updated_at.eq(Local::now().naive_utc()),
                ))
                .get_result::<DbCartItem>(conn)?;

            hydrate_cart_items(conn, vec![row])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_cart_line(&self, key: &CartLineKey) -> RepositoryResult<()> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        let existing = find_line(&mut conn, key)?.ok_or(RepositoryError::NotFound)?;

        diesel::delete(cart_items::table.filter(cart_items::id.eq(existing.id)))
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove_cart_items(
        &self,
        user_id: i32,
        product_id: i32,
        size_variant_id: Option<i32>,
    ) -> RepositoryResult<usize> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        let mut target = cart_items::table
            .filter(cart_items::user_id.eq(user_id))
            .filter(cart_items::product_id.eq(product_id))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(variant_id) = size_variant_id {
            target = target.filter(cart_items::size_variant_id.eq(variant_id));
        }

        let ids: Vec<i32> = target.select(cart_items::id).load(&mut conn)?;
        if ids.is_empty() {
            return Ok(0);
        }

        let deleted = diesel::delete(cart_items::table.filter(cart_items::id.eq_any(&ids)))
            .execute(&mut conn)?;

        Ok(deleted)
    }
}

/// Cart lines of `user_id` with their products, most recently touched first.
pub(crate) fn load_cart_items(
    conn: &mut SqliteConnection,
    user_id: i32,
) -> RepositoryResult<Vec<DomainCartItem>> {
    use crate::schema::cart_items;

    let rows = cart_items::table
        .filter(cart_items::user_id.eq(user_id))
        .order((cart_items::updated_at.desc(), cart_items::id.desc()))
        .load::<DbCartItem>(conn)?;

    hydrate_cart_items(conn, rows)
}

fn find_line(conn: &mut SqliteConnection, key: &CartLineKey) -> RepositoryResult<Option<DbCartItem>> {
    use crate::schema::cart_items;

    let mut query = cart_items::table
        .filter(cart_items::user_id.eq(key.user_id))
        .filter(cart_items::product_id.eq(key.product_id))
        .into_boxed::<diesel::sqlite::Sqlite>();

    query = match key.size_variant_id {
        Some(variant_id) => query.filter(cart_items::size_variant_id.eq(variant_id)),
        None => query.filter(cart_items::size_variant_id.is_null()),
    };

    Ok(query.first::<DbCartItem>(conn).optional()?)
}

fn hydrate_cart_items(
    conn: &mut SqliteConnection,
    rows: Vec<DbCartItem>,
) -> RepositoryResult<Vec<DomainCartItem>> {
    let product_ids: Vec<i32> = rows.iter().map(|row| row.product_id).collect();
    let products = load_products_by_ids(conn, &product_ids)?;

    let items = rows
        .into_iter()
        .filter_map(|row| {
            let product = products.get(&row.product_id)?.clone();
            let size_variant = row
                .size_variant_id
                .and_then(|variant_id| product.variant(variant_id).cloned());
            Some(DomainCartItem {
                id: row.id,
                user_id: row.user_id,
                product,
                size_variant,
                quantity: row.quantity,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        })
        .collect();

    Ok(items)
}
