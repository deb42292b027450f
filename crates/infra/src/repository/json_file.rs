use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use stockroom_inventory::{Product, ProductRepository};

use super::{ProductTable, RepositoryError};

/// Product repository persisted as a JSON array snapshot.
///
/// The whole table is rewritten after every mutation: the snapshot goes to a
/// temp file, is synced to disk, then renamed over the previous one.
/// A mutation is only kept in memory once the snapshot write succeeded;
/// otherwise the call returns `false` and the previous state stays in place.
#[derive(Debug)]
pub struct JsonFileProductRepository {
    path: PathBuf,
    table: RwLock<ProductTable>,
}

impl JsonFileProductRepository {
    /// Load the snapshot at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();

        let table = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => ProductTable::default(),
            Ok(bytes) => {
                let products: Vec<Product> =
                    serde_json::from_slice(&bytes).map_err(|source| RepositoryError::Snapshot {
                        path: path.clone(),
                        source,
                    })?;
                ProductTable::from_products(products)?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => ProductTable::default(),
            Err(source) => return Err(RepositoryError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), "opened product snapshot");
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, table: &ProductTable) -> Result<(), RepositoryError> {
        let io_err = |source: std::io::Error| RepositoryError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_vec_pretty(&table.to_products()).map_err(|source| {
            RepositoryError::Snapshot {
                path: self.path.clone(),
                source,
            }
        })?;

        // Data must be on disk before the rename makes it visible.
        let tmp = self.temp_path();
        let mut file = File::create(&tmp).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn read<T: Default>(&self, f: impl FnOnce(&ProductTable) -> T) -> T {
        match self.table.read() {
            Ok(table) => f(&table),
            Err(_) => {
                tracing::error!(path = %self.path.display(), "product table lock poisoned");
                T::default()
            }
        }
    }

    /// Apply `f` to a copy of the table, persist the copy, then swap it in.
    fn mutate(&self, f: impl FnOnce(&mut ProductTable) -> bool) -> bool {
        let mut guard = match self.table.write() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::error!(path = %self.path.display(), "product table lock poisoned");
                return false;
            }
        };

        let mut next = guard.clone();
        if !f(&mut next) {
            return false;
        }
        if let Err(err) = self.persist(&next) {
            tracing::error!(error = %err, "failed to persist product snapshot");
            return false;
        }

        *guard = next;
        true
    }
}

impl ProductRepository for JsonFileProductRepository {
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
        self.mutate(|t| t.insert(product))
    }

    fn delete(&self, code: &str) -> bool {
        self.mutate(|t| t.remove(code))
    }

    fn update_stock(&self, code: &str, stock: i64) -> bool {
        self.mutate(|t| t.set_stock(code, stock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product::new("P001", "Laptop", "Elektronik", 5_000_000.0, 10, 5)
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProductRepository::open(dir.path().join("none.json")).unwrap();
        assert!(repo.find_all().is_empty());
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        {
            let repo = JsonFileProductRepository::open(&path).unwrap();
            assert!(repo.save(&laptop()));
            let mouse = Product::new("P002", "Mouse", "Elektronik", 50_000.0, 0, 1);
            assert!(repo.save(&mouse.with_active(false)));
            assert!(repo.update_stock("P001", 7));
        }

        let reopened = JsonFileProductRepository::open(&path).unwrap();
        assert_eq!(reopened.find_by_code("P001").map(|p| p.stock()), Some(7));
        let mouse = reopened.find_by_code("P002").unwrap();
        assert!(!mouse.is_active());

        assert!(reopened.delete("P002"));
        let again = JsonFileProductRepository::open(&path).unwrap();
        assert!(again.find_by_code("P002").is_none());
    }

    #[test]
    fn persist_replaces_snapshot_without_leaving_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let repo = JsonFileProductRepository::open(&path).unwrap();

        assert!(repo.save(&laptop()));
        assert!(repo.update_stock("P001", 3));

        assert!(!repo.temp_path().exists());
        let on_disk: Vec<Product> = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].stock(), 3);
    }

    #[test]
    fn corrupt_snapshot_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileProductRepository::open(&path).unwrap_err();
        assert!(matches!(err, RepositoryError::Snapshot { .. }));
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let repo = JsonFileProductRepository::open(&path).unwrap();
        assert!(repo.save(&laptop()));

        // A directory where the temp file should go makes the next write fail.
        fs::create_dir(repo.temp_path()).unwrap();

        assert!(!repo.update_stock("P001", 1));
        assert_eq!(repo.find_by_code("P001").map(|p| p.stock()), Some(10));
    }
}
