use std::sync::RwLock;

use stockroom_inventory::{Product, ProductRepository};

use super::ProductTable;

/// In-memory product repository.
///
/// Intended for tests/dev. Each call takes the lock once, so a single call is
/// atomic; nothing spans calls.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: RwLock<ProductTable>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. Later duplicates of a code are ignored.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut table = ProductTable::default();
        for product in products {
            table.insert(&product);
        }
        Self {
            table: RwLock::new(table),
        }
    }

    pub fn len(&self) -> usize {
        self.read(ProductTable::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<T: Default>(&self, f: impl FnOnce(&ProductTable) -> T) -> T {
        match self.table.read() {
            Ok(table) => f(&table),
            Err(_) => {
                tracing::error!("product table lock poisoned");
                T::default()
            }
        }
    }

    fn write(&self, f: impl FnOnce(&mut ProductTable) -> bool) -> bool {
        match self.table.write() {
            Ok(mut table) => f(&mut table),
            Err(_) => {
                tracing::error!("product table lock poisoned");
                false
            }
        }
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn find_by_code(&self, code: &str) -> Option<Product> {
        self.read(|t| t.get(code))
    }

    fn find_by_name(&self, name: &str) -> Vec<Product> {
        self.read(|t| t.by_name(name))
    }

    fn find_by_category(&self, category: &str) -> Vec<Product> {
        self.read(|t| t.by_category(category))
    }

    fn find_all(&self) -> Vec<Product> {
        self.read(ProductTable::to_products)
    }

    fn find_low_stock(&self) -> Vec<Product> {
        self.read(|t| t.select(Product::is_low_stock))
    }

    fn find_out_of_stock(&self) -> Vec<Product> {
        self.read(|t| t.select(Product::is_out_of_stock))
    }

    fn save(&self, product: &Product) -> bool {
        self.write(|t| t.insert(product))
    }

    fn delete(&self, code: &str) -> bool {
        self.write(|t| t.remove(code))
    }

    fn update_stock(&self, code: &str, stock: i64) -> bool {
        self.write(|t| t.set_stock(code, stock))
    }
}
