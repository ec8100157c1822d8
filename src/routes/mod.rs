pub mod fields;
pub mod health_check;
pub mod order;
pub mod products;
pub mod user;
