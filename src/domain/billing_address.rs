use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Address captured by a checkout submission.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BillingAddress {
    pub id: i32,
    pub user_id: i32,
    pub street_address: String,
    pub apartment_address: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    pub zip: String,
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new billing address.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBillingAddress {
    pub user_id: i32,
    pub street_address: String,
    pub apartment_address: String,
    pub country: String,
    pub zip: String,
}
