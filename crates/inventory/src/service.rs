//! Inventory service: validated stock mutations and aggregate queries.
//!
//! Each operation validates its inputs first and returns before touching the
//! repository when they are malformed. Lookups and writes are separate
//! repository calls, so a concurrent writer between them can be lost; callers
//! that need atomicity must get it from the repository.
//!
//! Mutations come in two flavours: `try_*` returns a [`DomainResult`] carrying
//! the failure class, and the plain method collapses it into `bool`. Both make
//! exactly the same repository calls.

use stockroom_core::{DomainError, DomainResult};

use crate::product::Product;
use crate::repository::ProductRepository;
use crate::validation;

#[derive(Debug, Clone)]
pub struct InventoryService<R> {
    repository: R,
}

impl<R> InventoryService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_inner(self) -> R {
        self.repository
    }

    /// Insert a valid product whose code is not taken yet.
    pub fn try_add_product(&self, product: &Product) -> DomainResult<()> {
        validation::validate_product(product)?;

        let code = product.code().as_str();
        if self.repository.find_by_code(code).is_some() {
            return Err(DomainError::conflict(format!("product '{code}' already exists")));
        }
        if !self.repository.save(product) {
            return Err(DomainError::persistence(format!("save of '{code}' was rejected")));
        }

        tracing::info!(code, "product added");
        Ok(())
    }

    pub fn add_product(&self, product: &Product) -> bool {
        outcome("add_product", product.code().as_str(), self.try_add_product(product))
    }

    /// Physically remove a product; only allowed once its stock is depleted.
    pub fn try_remove_product(&self, code: &str) -> DomainResult<()> {
        validation::validate_code(code)?;

        let product = self.repository.find_by_code(code).ok_or_else(DomainError::not_found)?;
        if product.stock() > 0 {
            return Err(DomainError::invariant(format!(
                "product '{code}' still has {} in stock",
                product.stock()
            )));
        }
        if !self.repository.delete(code) {
            return Err(DomainError::persistence(format!("delete of '{code}' was rejected")));
        }

        tracing::info!(code, "product removed");
        Ok(())
    }

    pub fn remove_product(&self, code: &str) -> bool {
        outcome("remove_product", code, self.try_remove_product(code))
    }

    pub fn find_by_code(&self, code: &str) -> Option<Product> {
        if !validation::is_valid_code(code) {
            return None;
        }
        self.repository.find_by_code(code)
    }

    /// An absent or empty name matches nothing and skips the repository.
    pub fn find_by_name(&self, name: Option<&str>) -> Vec<Product> {
        match name {
            Some(name) if !name.is_empty() => self.repository.find_by_name(name),
            _ => Vec::new(),
        }
    }

    pub fn find_by_category(&self, category: &str) -> Vec<Product> {
        self.repository.find_by_category(category)
    }

    /// Take `quantity` units out of stock (e.g. a sale).
    pub fn try_issue_stock(&self, code: &str, quantity: i64) -> DomainResult<()> {
        let product = self.active_product_for_movement(code, quantity)?;

        if quantity > product.stock() {
            return Err(DomainError::invariant(format!(
                "insufficient stock for '{code}' (requested {quantity}, available {})",
                product.stock()
            )));
        }

        let new_stock = product.stock() - quantity;
        self.write_stock(code, new_stock)?;

        tracing::info!(code, quantity, new_stock, "stock issued");
        Ok(())
    }

    pub fn issue_stock(&self, code: &str, quantity: i64) -> bool {
        outcome("issue_stock", code, self.try_issue_stock(code, quantity))
    }

    /// Put `quantity` units into stock (e.g. a delivery).
    pub fn try_receive_stock(&self, code: &str, quantity: i64) -> DomainResult<()> {
        let product = self.active_product_for_movement(code, quantity)?;

        let new_stock = product
            .stock()
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invariant(format!("stock overflow for '{code}'")))?;
        self.write_stock(code, new_stock)?;

        tracing::info!(code, quantity, new_stock, "stock received");
        Ok(())
    }

    pub fn receive_stock(&self, code: &str, quantity: i64) -> bool {
        outcome("receive_stock", code, self.try_receive_stock(code, quantity))
    }

    /// Overwrite the stock with an absolute value.
    ///
    /// Unlike issue/receive this does not look at the active flag: stock
    /// counts of inactive products can still be corrected.
    pub fn try_set_stock(&self, code: &str, new_stock: i64) -> DomainResult<()> {
        validation::validate_code(code)?;
        validation::validate_stock(new_stock)?;

        if self.repository.find_by_code(code).is_none() {
            return Err(DomainError::not_found());
        }
        self.write_stock(code, new_stock)?;

        tracing::info!(code, new_stock, "stock set");
        Ok(())
    }

    pub fn set_stock(&self, code: &str, new_stock: i64) -> bool {
        outcome("set_stock", code, self.try_set_stock(code, new_stock))
    }

    /// Sum of `price × stock` over active products.
    pub fn total_inventory_value(&self) -> f64 {
        self.repository
            .find_all()
            .iter()
            .filter(|p| p.is_active())
            .map(Product::stock_value)
            .sum()
    }

    /// Sum of stock over active products, saturating at `i64::MAX`.
    pub fn total_stock(&self) -> i64 {
        self.repository
            .find_all()
            .iter()
            .filter(|p| p.is_active())
            .map(Product::stock)
            .fold(0i64, i64::saturating_add)
    }

    pub fn low_stock_products(&self) -> Vec<Product> {
        self.repository.find_low_stock()
    }

    pub fn out_of_stock_products(&self) -> Vec<Product> {
        self.repository.find_out_of_stock()
    }

    /// Shared pre-checks of issue/receive: valid code and quantity, product
    /// exists and is active.
    fn active_product_for_movement(&self, code: &str, quantity: i64) -> DomainResult<Product> {
        validation::validate_code(code)?;
        validation::validate_quantity(quantity)?;

        let product = self.repository.find_by_code(code).ok_or_else(DomainError::not_found)?;
        if !product.is_active() {
            return Err(DomainError::invariant(format!("product '{code}' is inactive")));
        }
        Ok(product)
    }

    fn write_stock(&self, code: &str, new_stock: i64) -> DomainResult<()> {
        if self.repository.update_stock(code, new_stock) {
            Ok(())
        } else {
            Err(DomainError::persistence(format!("stock update of '{code}' was rejected")))
        }
    }
}

fn outcome(operation: &'static str, code: &str, result: DomainResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(
                operation,
                code,
                input_error = err.is_input_error(),
                error = %err,
                "inventory operation rejected"
            );
            false
        }
    }
}
