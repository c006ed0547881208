use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::billing_address::{
    BillingAddress as DomainBillingAddress, NewBillingAddress as DomainNewBillingAddress,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::billing_addresses)]
pub struct BillingAddress {
    pub id: i32,
    pub user_id: i32,
    pub street_address: String,
    pub apartment_address: String,
    pub country: String,
    pub zip: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::billing_addresses)]
pub struct NewBillingAddress<'a> {
    pub user_id: i32,
    pub street_address: &'a str,
    pub apartment_address: &'a str,
    pub country: &'a str,
    pub zip: &'a str,
}

impl From<BillingAddress> for DomainBillingAddress {
    fn from(value: BillingAddress) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            street_address: value.street_address,
            apartment_address: value.apartment_address,
            country: value.country,
            zip: value.zip,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewBillingAddress> for NewBillingAddress<'a> {
    fn from(value: &'a DomainNewBillingAddress) -> Self {
        Self {
            user_id: value.user_id,
            street_address: value.street_address.as_str(),
            apartment_address: value.apartment_address.as_str(),
            country: value.country.as_str(),
            zip: value.zip.as_str(),
        }
    }
}
