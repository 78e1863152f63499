use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::enquiry::{
    Enquiry as DomainEnquiry, EnquirySubject, NewEnquiry as DomainNewEnquiry,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::enquiries)]
pub struct Enquiry {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub order_id: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::enquiries)]
pub struct NewEnquiry<'a> {
    pub user_id: Option<i32>,
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub order_id: &'a str,
    pub message: &'a str,
}

impl From<Enquiry> for DomainEnquiry {
    fn from(value: Enquiry) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            name: value.name,
            email: value.email,
            subject: value.subject.parse().unwrap_or(EnquirySubject::Other),
            order_id: value.order_id,
            message: value.message,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewEnquiry> for NewEnquiry<'a> {
    fn from(value: &'a DomainNewEnquiry) -> Self {
        Self {
            user_id: value.user_id,
            name: value.name.as_str(),
            email: value.email.as_str(),
            subject: value.subject.as_str(),
            order_id: value.order_id.as_str(),
            message: value.message.as_str(),
        }
    }
}
