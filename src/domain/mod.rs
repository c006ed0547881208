pub mod billing_address;
pub mod category;
pub mod item;
pub mod order;
pub mod user;
