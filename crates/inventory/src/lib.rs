//! Inventory domain module.
//!
//! This crate contains the business rules for products and stock: the
//! validation rules, the repository boundary and the inventory service.
//! Deterministic domain logic only (no IO, no storage).

pub mod category;
pub mod product;
pub mod repository;
pub mod service;
pub mod validation;

pub use category::Category;
pub use product::Product;
pub use repository::ProductRepository;
pub use service::InventoryService;
