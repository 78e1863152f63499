use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::customer::{
        CustomerProfile as DomainCustomerProfile, NewCustomerProfile as DomainNewCustomerProfile,
        UpdateCustomerProfile as DomainUpdateCustomerProfile,
    },
    models::customer::{
        CustomerProfile as DbCustomerProfile, NewCustomerProfile as DbNewCustomerProfile,
        UpdateCustomerProfile as DbUpdateCustomerProfile,
    },
    repository::{DieselRepository, ProfileReader, ProfileWriter},
};

impl ProfileReader for DieselRepository {
    fn get_profile(&self, user_id: i32) -> RepositoryResult<Option<DomainCustomerProfile>> {
        let mut conn = self.conn()?;
        load_profile(&mut conn, user_id)
    }
}

impl ProfileWriter for DieselRepository {
    fn create_profile(
        &self,
        profile: &DomainNewCustomerProfile,
    ) -> RepositoryResult<DomainCustomerProfile> {
        use crate::schema::customer_profiles;

        let mut conn = self.conn()?;
        let db_new = DbNewCustomerProfile::from(profile);

        diesel::insert_into(customer_profiles::table)
            .values(&db_new)
            .execute(&mut conn)?;

        load_profile(&mut conn, profile.user_id)?.ok_or(RepositoryError::NotFound)
    }

    fn update_profile(
        &self,
        user_id: i32,
        updates: &DomainUpdateCustomerProfile,
    ) -> RepositoryResult<DomainCustomerProfile> {
        use crate::schema::customer_profiles;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCustomerProfile::from(updates);

        diesel::update(customer_profiles::table.filter(customer_profiles::user_id.eq(user_id)))
            .set(&db_updates)
            .get_result::<DbCustomerProfile>(&mut conn)?;

        load_profile(&mut conn, user_id)?.ok_or(RepositoryError::NotFound)
    }
}

fn load_profile(
    conn: &mut SqliteConnection,
    user_id: i32,
) -> RepositoryResult<Option<DomainCustomerProfile>> {
    use crate::schema::{customer_profiles, users};

    let row = customer_profiles::table
        .inner_join(users::table)
        .filter(customer_profiles::user_id.eq(user_id))
        .select((DbCustomerProfile::as_select(), users::email))
        .first::<(DbCustomerProfile, String)>(conn)
        .optional()?;

    Ok(row.map(Into::into))
}
