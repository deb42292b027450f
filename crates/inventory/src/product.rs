use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, ProductCode};

/// A stock-keeping unit.
///
/// Plain data holder: constructors and setters enforce nothing. Whether a
/// product is well-formed is decided by [`crate::validation::is_valid_product`].
/// Equality and hashing use the product code only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    code: ProductCode,
    name: String,
    category: String,
    price: f64,
    stock: i64,
    min_stock: i64,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn new(
        code: impl Into<ProductCode>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: i64,
        min_stock: i64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category: category.into(),
            price,
            stock,
            min_stock,
            active: true,
        }
    }

    /// Product with only code, name and price set (no category, zero stock).
    pub fn priced(code: impl Into<ProductCode>, name: impl Into<String>, price: f64) -> Self {
        Self::new(code, name, String::new(), price, 0, 0)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn min_stock(&self) -> i64 {
        self.min_stock
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Overwrite the stock level. Used by repositories; no invariant checks.
    pub fn set_stock(&mut self, stock: i64) {
        self.stock = stock;
    }

    /// In stock, but at or below the minimum threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= self.min_stock
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// `price × stock`.
    pub fn stock_value(&self) -> f64 {
        self.price * self.stock as f64
    }
}

impl Entity for Product {
    type Id = ProductCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Product {}

impl core::hash::Hash for Product {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Product{{code='{}', name='{}', category='{}', ",
            self.code, self.name, self.category
        )?;
        write!(
            f,
            "price={}, stock={}, min_stock={}, active={}}}",
            self.price, self.stock, self.min_stock, self.active
        )
    }
}
