//! In-process product catalog with stock levels.

pub mod service;

pub use service::CatalogService;
