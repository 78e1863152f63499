use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::order::{
        NewOrder as DomainNewOrder, Order as DomainOrder, OrderItem as DomainOrderItem,
        OrderListQuery, OrderStatus, ShippingDetails,
    },
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem,
    },
    repository::cart::load_cart_items,
    repository::product::load_products_by_ids,
    repository::{DieselRepository, OrderReader, OrderWriter},
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        let mut conn = self.conn()?;
        load_order(&mut conn, id)
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let mut items = orders::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(user_id) = query.user_id {
            items = items.filter(orders::user_id.eq(user_id));
        }

        let rows = items
            .order((orders::created_at.desc(), orders::id.desc()))
            .load::<DbOrder>(&mut conn)?;

        hydrate_orders(&mut conn, rows)
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let order_id = insert_order(conn, new_order)?;
            load_order(conn, order_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn create_order_from_cart(
        &self,
        user_id: i32,
        shipping: &ShippingDetails,
    ) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        // Takes the write lock before reading so the priced lines are the
        // ones that get deleted.
        conn.immediate_transaction::<Option<DomainOrder>, RepositoryError, _>(|conn| {
            let cart = load_cart_items(conn, user_id)?;
            if cart.is_empty() {
                return Ok(None);
            }

            let new_order = DomainNewOrder::from_cart(user_id, shipping.clone(), &cart);
            let order_id = insert_order(conn, &new_order)?;

            let cart_item_ids: Vec<i32> = cart.iter().map(|line| line.id).collect();
            let deleted = diesel::delete(
                cart_items::table
                    .filter(cart_items::user_id.eq(user_id))
                    .filter(cart_items::id.eq_any(&cart_item_ids)),
            )
            .execute(conn)?;
            if deleted != cart_item_ids.len() {
                return Err(RepositoryError::NotFound);
            }

            load_order(conn, order_id)
        })
    }

    fn update_order_status(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        conn.transaction::<Option<DomainOrder>, RepositoryError, _>(|conn| {
            let updated = diesel::update(
                orders::table
                    .filter(orders::id.eq(order_id))
                    .filter(orders::status.eq(from.as_str())),
            )
            .set(orders::status.eq(to.as_str()))
            .execute(conn)?;
            if updated == 0 {
                return Ok(None);
            }

            load_order(conn, order_id)
        })
    }
}

fn insert_order(conn: &mut SqliteConnection, new_order: &DomainNewOrder) -> RepositoryResult<i32> {
    use crate::schema::{order_items, orders};

    let created = diesel::insert_into(orders::table)
        .values(&DbNewOrder::from(new_order))
        .get_result::<DbOrder>(conn)?;

    let payload: Vec<DbNewOrderItem> = new_order
        .items
        .iter()
        .map(|item| DbNewOrderItem::for_order(created.id, item))
        .collect();

    if !payload.is_empty() {
        diesel::insert_into(order_items::table)
            .values(&payload)
            .execute(conn)?;
    }

    Ok(created.id)
}

fn load_order(conn: &mut SqliteConnection, order_id: i32) -> RepositoryResult<Option<DomainOrder>> {
    use crate::schema::orders;

    let row = orders::table
        .filter(orders::id.eq(order_id))
        .first::<DbOrder>(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(hydrate_orders(conn, vec![row])?.pop())
}

/// Attach items, their current products, and customer emails.
fn hydrate_orders(
    conn: &mut SqliteConnection,
    rows: Vec<DbOrder>,
) -> RepositoryResult<Vec<DomainOrder>> {
    use crate::schema::users;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let items = DbOrderItem::belonging_to(&rows)
        .select(DbOrderItem::as_select())
        .load::<DbOrderItem>(conn)?;

    let product_ids: Vec<i32> = items.iter().map(|item| item.product_id).collect();
    let products = load_products_by_ids(conn, &product_ids)?;

    let mut user_ids: Vec<i32> = rows.iter().map(|row| row.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let emails: HashMap<i32, String> = users::table
        .filter(users::id.eq_any(&user_ids))
        .select((users::id, users::email))
        .load::<(i32, String)>(conn)?
        .into_iter()
        .collect();

    let mut items_map: HashMap<i32, Vec<DomainOrderItem>> = HashMap::new();
    for item in items {
        let mut domain_item: DomainOrderItem = item.into();
        domain_item.product = products.get(&domain_item.product_id).cloned();
        items_map
            .entry(domain_item.order_id)
            .or_default()
            .push(domain_item);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let email = emails.get(&row.user_id).cloned().unwrap_or_default();
            let mut order: DomainOrder = (row, email).into();
            let mut order_items = items_map.remove(&order.id).unwrap_or_default();
            order_items.sort_by_key(|item| item.id);
            order.items = order_items;
            order
        })
        .collect())
}
