//! Concrete `ProductRepository` implementations.
//!
//! Both stores share the same query semantics through [`ProductTable`]:
//! exact code and category matches, case-insensitive name substring search,
//! insert-only `save`, results ordered by code.

pub mod in_memory;
pub mod json_file;

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use stockroom_inventory::{Product, ProductRepository};

use crate::config::{InfraConfig, StoreKind};

pub use in_memory::InMemoryProductRepository;
pub use json_file::JsonFileProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid product snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate product code '{0}' in snapshot")]
    DuplicateCode(String),
}

/// Build the repository selected by the configuration.
pub fn open_repository(
    config: &InfraConfig,
) -> Result<Box<dyn ProductRepository>, RepositoryError> {
    match config.store {
        StoreKind::Memory => Ok(Box::new(InMemoryProductRepository::new())),
        StoreKind::Json => Ok(Box::new(JsonFileProductRepository::open(&config.data_path)?)),
    }
}

/// Products keyed by code.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProductTable {
    rows: BTreeMap<String, Product>,
}

impl ProductTable {
    pub(crate) fn from_products(products: Vec<Product>) -> Result<Self, RepositoryError> {
        let mut table = Self::default();
        for product in products {
            let code = product.code().to_string();
            if table.rows.insert(code.clone(), product).is_some() {
                return Err(RepositoryError::DuplicateCode(code));
            }
        }
        Ok(table)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn to_products(&self) -> Vec<Product> {
        self.rows.values().cloned().collect()
    }

    pub(crate) fn get(&self, code: &str) -> Option<Product> {
        self.rows.get(code).cloned()
    }

    pub(crate) fn select(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.rows.values().filter(|p| keep(p)).cloned().collect()
    }

    pub(crate) fn by_name(&self, name: &str) -> Vec<Product> {
        let needle = name.to_lowercase();
        self.select(|p| p.name().to_lowercase().contains(&needle))
    }

    pub(crate) fn by_category(&self, category: &str) -> Vec<Product> {
        self.select(|p| p.category() == category)
    }

    pub(crate) fn insert(&mut self, product: &Product) -> bool {
        let code = product.code().as_str();
        if self.rows.contains_key(code) {
            return false;
        }
        self.rows.insert(code.to_string(), product.clone());
        true
    }

    pub(crate) fn remove(&mut self, code: &str) -> bool {
        self.rows.remove(code).is_some()
    }

    pub(crate) fn set_stock(&mut self, code: &str, stock: i64) -> bool {
        match self.rows.get_mut(code) {
            Some(product) => {
                product.set_stock(stock);
                true
            }
            None => false,
        }
    }
}
