use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::{
    domain::enquiry::{Enquiry as DomainEnquiry, NewEnquiry as DomainNewEnquiry},
    models::enquiry::{Enquiry as DbEnquiry, NewEnquiry as DbNewEnquiry},
    repository::{DieselRepository, EnquiryReader, EnquiryWriter},
};

impl EnquiryReader for DieselRepository {
    fn list_enquiries(&self, user_id: Option<i32>) -> RepositoryResult<Vec<DomainEnquiry>> {
        use crate::schema::enquiries;

        let mut conn = self.conn()?;

        let mut items = enquiries::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(user_id) = user_id {
            items = items.filter(enquiries::user_id.eq(user_id));
        }

        let rows = items
            .order((enquiries::created_at.desc(), enquiries::id.desc()))
            .load::<DbEnquiry>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl EnquiryWriter for DieselRepository {
    fn create_enquiry(&self, new_enquiry: &DomainNewEnquiry) -> RepositoryResult<DomainEnquiry> {
        use crate::schema::enquiries;

        let mut conn = self.conn()?;
        let db_new = DbNewEnquiry::from(new_enquiry);

        let created = diesel::insert_into(enquiries::table)
            .values(&db_new)
            .get_result::<DbEnquiry>(&mut conn)?;

        Ok(created.into())
    }
}
