pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod manage;
