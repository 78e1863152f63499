use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::user::{NewUser as DomainNewUser, User as DomainUser},
    models::customer::NewCustomerProfile as DbNewCustomerProfile,
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::{DieselRepository, UserReader, UserWriter},
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::username.eq(username))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new = DbNewUser::from(new_user);

        let created = diesel::insert_into(users::table)
            .values(&db_new)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn create_customer(&self, new_user: &DomainNewUser) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::{customer_profiles, users};

        let mut conn = self.conn()?;

        conn.transaction::<Option<DomainUser>, RepositoryError, _>(|conn| {
            let db_new = DbNewUser::from(new_user);
            let created = match diesel::insert_into(users::table)
                .values(&db_new)
                .get_result::<DbUser>(conn)
            {
                Ok(created) => created,
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            };

            let profile = DbNewCustomerProfile {
                user_id: created.id,
                name: created.name.as_str(),
                phone: "",
                address: "",
                city: "",
                state: "",
                pincode: "",
            };
            diesel::insert_into(customer_profiles::table)
                .values(&profile)
                .execute(conn)?;

            Ok(Some(created.into()))
        })
    }
}
