pub mod admin;
pub mod auth;
pub mod categories;
pub mod errors;
pub mod products;
pub mod storefront;

pub use errors::{ServiceError, ServiceResult};
