//! Product repository boundary.
//!
//! The inventory service never touches storage directly; it drives this trait.
//! Every operation is boolean/optional: a missing code shows up as `None`,
//! `false` or an empty collection, never as an error.

use std::sync::Arc;

use crate::product::Product;

/// Storage capability consumed by [`crate::InventoryService`].
pub trait ProductRepository: Send + Sync {
    fn find_by_code(&self, code: &str) -> Option<Product>;

    /// Name search (implementations decide how fuzzy the match is).
    fn find_by_name(&self, name: &str) -> Vec<Product>;

    fn find_by_category(&self, category: &str) -> Vec<Product>;

    fn find_all(&self) -> Vec<Product>;

    /// Products with `0 < stock <= min_stock`.
    fn find_low_stock(&self) -> Vec<Product>;

    /// Products with `stock == 0`.
    fn find_out_of_stock(&self) -> Vec<Product>;

    /// Insert a new product. Returns `true` on success.
    fn save(&self, product: &Product) -> bool;

    /// Physically remove a product. Returns `true` on success.
    fn delete(&self, code: &str) -> bool;

    /// Overwrite the stock of a product with an absolute value.
    fn update_stock(&self, code: &str, stock: i64) -> bool;
}

macro_rules! forward_product_repository {
    () => {
        fn find_by_code(&self, code: &str) -> Option<Product> {
            (**self).find_by_code(code)
        }

        fn find_by_name(&self, name: &str) -> Vec<Product> {
            (**self).find_by_name(name)
        }

        fn find_by_category(&self, category: &str) -> Vec<Product> {
            (**self).find_by_category(category)
        }

        fn find_all(&self) -> Vec<Product> {
            (**self).find_all()
        }

        fn find_low_stock(&self) -> Vec<Product> {
            (**self).find_low_stock()
        }

        fn find_out_of_stock(&self) -> Vec<Product> {
            (**self).find_out_of_stock()
        }

        fn save(&self, product: &Product) -> bool {
            (**self).save(product)
        }

        fn delete(&self, code: &str) -> bool {
            (**self).delete(code)
        }

        fn update_stock(&self, code: &str, stock: i64) -> bool {
            (**self).update_stock(code, stock)
        }
    };
}

impl<R> ProductRepository for &R
where
    R: ProductRepository + ?Sized,
{
    forward_product_repository!();
}

impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    forward_product_repository!();
}

impl<R> ProductRepository for Box<R>
where
    R: ProductRepository + ?Sized,
{
    forward_product_repository!();
}
