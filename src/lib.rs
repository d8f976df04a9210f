//! Core library exports for the VAM storefront service.
//!
//! The `data` feature exposes the catalog domain, Diesel models and
//! repositories; the `server` feature adds the forms, DTOs, services and
//! Actix-web routes of the storefront and seller dashboard.

/// Role value in a user's public metadata that grants dashboard access.
pub const ADMIN_ROLE: &str = "admin";

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod identity;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
