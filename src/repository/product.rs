use std::collections::{HashMap, HashSet};

use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::product::{
        ActivityFilter, NewProduct as DomainNewProduct, NewSizeVariant as DomainNewSizeVariant,
        Product as DomainProduct, ProductListQuery,
        ProductSizeVariant as DomainProductSizeVariant, UpdateProduct as DomainUpdateProduct,
    },
    domain::slug::unique_slug,
    models::product::{
        NewProduct as DbNewProduct, NewProductSizeVariant as DbNewProductSizeVariant,
        Product as DbProduct, ProductSizeVariant as DbProductSizeVariant,
        UpdateProduct as DbUpdateProduct, UpdateProductSizeVariant as DbUpdateProductSizeVariant,
    },
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        load_product(&mut conn, id)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let mut items = products::table
            .inner_join(categories::table)
            .select((DbProduct::as_select(), categories::name))
            .into_boxed::<diesel::sqlite::Sqlite>();

        match query.activity {
            ActivityFilter::Active => items = items.filter(products::is_active.eq(true)),
            ActivityFilter::Inactive => items = items.filter(products::is_active.eq(false)),
            ActivityFilter::All => {}
        }

        if let Some(category_id) = query.category_id {
            items = items.filter(products::category_id.eq(category_id));
        }

        if let Some(exclude_id) = query.exclude_id {
            items = items.filter(products::id.ne(exclude_id));
        }

        let rows = items
            .order((products::created_at.desc(), products::id.desc()))
            .load::<(DbProduct, String)>(&mut conn)?;

        let mut domain_products: Vec<DomainProduct> = rows.into_iter().map(Into::into).collect();
        attach_size_variants(&mut conn, &mut domain_products)?;

        Ok(domain_products)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_size_variants, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let slug = unique_slug(&new_product.name, "product", |candidate| {
                products::table
                    .filter(products::slug.eq(candidate))
                    .count()
                    .get_result::<i64>(conn)
                    .map(|count| count > 0)
            })?;

            let db_new = DbNewProduct::with_slug(new_product, &slug);
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            if !new_product.size_variants.is_empty() {
                let payload: Vec<DbNewProductSizeVariant> = new_product
                    .size_variants
                    .iter()
                    .map(|variant| DbNewProductSizeVariant::for_product(created.id, variant))
                    .collect();

                diesel::insert_into(product_size_variants::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            load_product(conn, created.id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateProduct::from(updates);

            diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            if let Some(variants) = updates.size_variants.as_ref() {
                replace_size_variants(conn, product_id, variants)?;
            }

            load_product(conn, product_id)?.ok_or(RepositoryError::NotFound)
        })
    }
}

/// Load one product with its category name and size variants.
pub(super) fn load_product(
    conn: &mut SqliteConnection,
    product_id: i32,
) -> RepositoryResult<Option<DomainProduct>> {
    let mut products = load_products_by_ids(conn, &[product_id])?;
    Ok(products.remove(&product_id))
}

/// Load products keyed by id, with category names and size variants.
pub(super) fn load_products_by_ids(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, DomainProduct>> {
    use crate::schema::{categories, products};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = products::table
        .inner_join(categories::table)
        .filter(products::id.eq_any(product_ids))
        .select((DbProduct::as_select(), categories::name))
        .load::<(DbProduct, String)>(conn)?;

    let mut domain_products: Vec<DomainProduct> = rows.into_iter().map(Into::into).collect();
    attach_size_variants(conn, &mut domain_products)?;

    Ok(domain_products
        .into_iter()
        .map(|product| (product.id, product))
        .collect())
}

fn attach_size_variants(
    conn: &mut SqliteConnection,
    products: &mut [DomainProduct],
) -> RepositoryResult<()> {
    use crate::schema::product_size_variants;

    if products.is_empty() {
        return Ok(());
    }

    let product_ids: Vec<i32> = products.iter().map(|product| product.id).collect();
    let rows = product_size_variants::table
        .filter(product_size_variants::product_id.eq_any(&product_ids))
        .order((
            product_size_variants::display_order.asc(),
            product_size_variants::id.asc(),
        ))
        .load::<DbProductSizeVariant>(conn)?;

    let mut map: HashMap<i32, Vec<DomainProductSizeVariant>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row.into());
    }

    for product in products.iter_mut() {
        product.size_variants = map.remove(&product.id).unwrap_or_default();
    }

    Ok(())
}

/// Make the stored variants match `variants`. Rows are matched by label,
/// ignoring case, so existing variant ids survive an edit.
fn replace_size_variants(
    conn: &mut SqliteConnection,
    product_id: i32,
    variants: &[DomainNewSizeVariant],
) -> RepositoryResult<()> {
    use crate::schema::product_size_variants;

    let existing = product_size_variants::table
        .filter(product_size_variants::product_id.eq(product_id))
        .load::<DbProductSizeVariant>(conn)?;

    let mut by_label: HashMap<String, i32> = existing
        .iter()
        .map(|row| (row.size_label.to_lowercase(), row.id))
        .collect();
    let mut kept: HashSet<i32> = HashSet::new();
    let now = Local::now().naive_utc();

    for variant in variants {
        match by_label.remove(&variant.size_label.to_lowercase()) {
            Some(variant_id) => {
                diesel::update(
                    product_size_variants::table.filter(product_size_variants::id.eq(variant_id)),
                )
                .set(&DbUpdateProductSizeVariant::from_domain(variant, now))
                .execute(conn)?;
                kept.insert(variant_id);
            }
            None => {
                let inserted = diesel::insert_into(product_size_variants::table)
                    .values(&DbNewProductSizeVariant::for_product(product_id, variant))
                    .get_result::<DbProductSizeVariant>(conn)?;
                kept.insert(inserted.id);
            }
        }
    }

    let stale: Vec<i32> = existing
        .iter()
        .map(|row| row.id)
        .filter(|id| !kept.contains(id))
        .collect();
    if !stale.is_empty() {
        diesel::delete(
            product_size_variants::table.filter(product_size_variants::id.eq_any(&stale)),
        )
        .execute(conn)?;
    }

    Ok(())
}
