pub mod breadcrumb;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod image;
pub mod product;
pub mod variant;
