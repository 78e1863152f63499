use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::offer::{
        NewOffer as DomainNewOffer, Offer as DomainOffer, OfferListQuery,
        UpdateOffer as DomainUpdateOffer,
    },
    domain::pricing::Money,
    models::offer::{NewOffer as DbNewOffer, Offer as DbOffer, UpdateOffer as DbUpdateOffer},
    repository::product::load_products_by_ids,
    repository::{DieselRepository, OfferReader, OfferWriter},
};

impl OfferReader for DieselRepository {
    fn get_offer_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOffer>> {
        let mut conn = self.conn()?;
        load_offer(&mut conn, id)
    }

    fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<Vec<DomainOffer>> {
        use crate::schema::{offers, products};

        let mut conn = self.conn()?;

        let mut items = offers::table
            .inner_join(products::table)
            .select(DbOffer::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query == OfferListQuery::Visible {
            items = items
                .filter(offers::is_active.eq(true))
                .filter(products::is_active.eq(true));
        }

        let rows = items
            .order((offers::display_order.asc(), offers::created_at.desc()))
            .load::<DbOffer>(&mut conn)?;

        attach_products(&mut conn, rows)
    }
}

impl OfferWriter for DieselRepository {
    fn create_offer(&self, new_offer: &DomainNewOffer) -> RepositoryResult<DomainOffer> {
        use crate::schema::offers;

        let mut conn = self.conn()?;

        conn.transaction::<DomainOffer, RepositoryError, _>(|conn| {
            let db_new = DbNewOffer::from(new_offer);
            let created = diesel::insert_into(offers::table)
                .values(&db_new)
                .get_result::<DbOffer>(conn)?;

            if let Some(offer_price) = new_offer.offer_price {
                store_offer_price(conn, created.product_id, offer_price)?;
            }

            load_offer(conn, created.id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn update_offer(
        &self,
        offer_id: i32,
        updates: &DomainUpdateOffer,
    ) -> RepositoryResult<DomainOffer> {
        use crate::schema::offers;

        let mut conn = self.conn()?;

        conn.transaction::<DomainOffer, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateOffer::from(updates);
            let updated = diesel::update(offers::table.filter(offers::id.eq(offer_id)))
                .set(&db_updates)
                .get_result::<DbOffer>(conn)?;

            if let Some(offer_price) = updates.offer_price {
                store_offer_price(conn, updated.product_id, offer_price)?;
            }

            load_offer(conn, offer_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_offer(&self, offer_id: i32) -> RepositoryResult<()> {
        use crate::schema::offers;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(offers::table.filter(offers::id.eq(offer_id))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn store_offer_price(
    conn: &mut SqliteConnection,
    product_id: i32,
    offer_price: Money,
) -> RepositoryResult<()> {
    use crate::schema::products;

    let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
        .set((
            products::offer_price.eq(Some(offer_price.cents())),
            products::updated_at.eq(Local::now().naive_utc()),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}

fn load_offer(conn: &mut SqliteConnection, offer_id: i32) -> RepositoryResult<Option<DomainOffer>> {
    use crate::schema::offers;

    let row = offers::table
        .filter(offers::id.eq(offer_id))
        .first::<DbOffer>(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(attach_products(conn, vec![row])?.pop())
}

fn attach_products(
    conn: &mut SqliteConnection,
    rows: Vec<DbOffer>,
) -> RepositoryResult<Vec<DomainOffer>> {
    let product_ids: Vec<i32> = rows.iter().map(|row| row.product_id).collect();
    let products = load_products_by_ids(conn, &product_ids)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let mut offer: DomainOffer = row.into();
            offer.product = products.get(&offer.product_id).cloned();
            offer
        })
        .collect())
}
