use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory},
    domain::slug::unique_slug,
    models::category::{Category as DbCategory, NewCategory as DbNewCategory},
    repository::{CategoryReader, CategoryWriter, DieselRepository, lower},
};

impl CategoryReader for DieselRepository {
    fn list_categories(&self, active_only: bool) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let mut query = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            query = query.filter(categories::is_active.eq(true));
        }

        let rows = query
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn find_category(&self, slug_or_name: &str) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let needle = slug_or_name.trim().to_lowercase();
        let mut conn = self.conn()?;
        let category = categories::table
            .filter(
                lower(categories::slug)
                    .eq(&needle)
                    .or(lower(categories::name).eq(&needle)),
            )
            .order(categories::id.asc())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(Into::into))
    }

    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let category = categories::table
            .filter(categories::id.eq(id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(Into::into))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCategory, RepositoryError, _>(|conn| {
            let slug = unique_slug(&new_category.name, "category", |candidate| {
                categories::table
                    .filter(categories::slug.eq(candidate))
                    .count()
                    .get_result::<i64>(conn)
                    .map(|count| count > 0)
            })?;

            let db_new = DbNewCategory {
                name: new_category.name.as_str(),
                slug: slug.as_str(),
                is_active: new_category.is_active,
            };

            let created = diesel::insert_into(categories::table)
                .values(&db_new)
                .get_result::<DbCategory>(conn)?;

            Ok(created.into())
        })
    }
}
