//! CarPrice API Module
//!
//! HTTP serving layer for car-price prediction: server-rendered form and
//! result pages, a JSON make/model reference lookup, and a health check,
//! all over a read-only model registry loaded at startup.

pub mod catalog;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod server;

pub use catalog::{CarCatalog, CarMakeModel};
pub use handlers::*;
pub use models::*;
pub use server::*;
