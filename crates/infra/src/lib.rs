//! Infrastructure layer: concrete product repositories and configuration.

pub mod config;
pub mod repository;


pub use config::{ConfigError, InfraConfig, StoreKind};
pub use repository::{
    open_repository, InMemoryProductRepository, JsonFileProductRepository, RepositoryError,
};
