//! Validation rules for products, categories and stock movements.
//!
//! Every rule is a pure, total function. The `is_valid_*` predicates answer
//! yes/no; the `validate_*` functions report the first failing field as a
//! [`DomainError`] and back the record-level predicates.

use stockroom_core::{DomainError, DomainResult};

use crate::category::Category;
use crate::product::Product;

pub const CODE_MIN_LEN: usize = 2;
pub const CODE_MAX_LEN: usize = 10;
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// 2..=10 ASCII alphanumeric characters.
pub fn is_valid_code(code: &str) -> bool {
    let len = code.chars().count();
    (CODE_MIN_LEN..=CODE_MAX_LEN).contains(&len) && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Non-blank, 3..=100 characters.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name.chars().count())
}

pub fn is_valid_price(price: f64) -> bool {
    price > 0.0
}

pub fn is_valid_stock(stock: i64) -> bool {
    stock >= 0
}

pub fn is_valid_min_stock(min_stock: i64) -> bool {
    min_stock >= 0
}

/// Quantity of a single stock movement (issue or receive).
pub fn is_valid_quantity(quantity: i64) -> bool {
    quantity > 0
}

pub fn is_valid_percentage(percentage: f64) -> bool {
    (0.0..=100.0).contains(&percentage)
}

pub fn is_valid_product(product: &Product) -> bool {
    validate_product(product).is_ok()
}

pub fn is_valid_category(category: &Category) -> bool {
    validate_category(category).is_ok()
}

pub fn validate_code(code: &str) -> DomainResult<()> {
    if is_valid_code(code) {
        Ok(())
    } else {
        Err(DomainError::invalid_id(format!(
            "product code '{code}' must be {CODE_MIN_LEN}-{CODE_MAX_LEN} alphanumeric characters"
        )))
    }
}

pub fn validate_quantity(quantity: i64) -> DomainResult<()> {
    if is_valid_quantity(quantity) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "quantity must be positive (got {quantity})"
        )))
    }
}

pub fn validate_stock(stock: i64) -> DomainResult<()> {
    if is_valid_stock(stock) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "stock cannot be negative (got {stock})"
        )))
    }
}

pub fn validate_product(product: &Product) -> DomainResult<()> {
    validate_code(product.code().as_str())?;
    if !is_valid_name(product.name()) {
        return Err(DomainError::validation(format!(
            "name must be {NAME_MIN_LEN}-{NAME_MAX_LEN} characters"
        )));
    }
    if product.category().trim().is_empty() {
        return Err(DomainError::validation("category cannot be empty"));
    }
    if !is_valid_price(product.price()) {
        return Err(DomainError::validation("price must be greater than zero"));
    }
    validate_stock(product.stock())?;
    if !is_valid_min_stock(product.min_stock()) {
        return Err(DomainError::validation("minimum stock cannot be negative"));
    }
    Ok(())
}

pub fn validate_category(category: &Category) -> DomainResult<()> {
    if !is_valid_name(category.name()) {
        return Err(DomainError::validation(format!(
            "category name must be {NAME_MIN_LEN}-{NAME_MAX_LEN} characters"
        )));
    }
    if category
        .description()
        .is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LEN)
    {
        return Err(DomainError::validation(format!(
            "description cannot exceed {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_a() -> Product {
        Product::new("P001", "Produk A", "Kategori A", 100.0, 10, 5)
    }

    #[test]
    fn code_accepts_short_alphanumeric() {
        assert!(is_valid_code("P001"));
        assert!(is_valid_code("ABC123"));
        assert!(is_valid_code("AB"));
        assert!(is_valid_code("ABCDEFGHIJ"));
    }

    #[test]
    fn code_rejects_bad_length_or_characters() {
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("A"));
        assert!(!is_valid_code("TOOLONGCODE123"));
        assert!(!is_valid_code("@@@"));
        assert!(!is_valid_code("P 01"));
        assert!(!is_valid_code("PRÖD1"));
    }

    #[test]
    fn name_bounds() {
        assert!(is_valid_name("Produk A"));
        assert!(is_valid_name("Nama 123"));
        assert!(is_valid_name(&"A".repeat(100)));

        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("AB"));
        assert!(!is_valid_name(&"A".repeat(101)));
    }

    #[test]
    fn numeric_rules() {
        assert!(is_valid_price(100.0));
        assert!(!is_valid_price(0.0));
        assert!(!is_valid_price(-50.0));
        assert!(!is_valid_price(f64::NAN));

        assert!(is_valid_stock(0));
        assert!(is_valid_stock(10));
        assert!(!is_valid_stock(-1));

        assert!(is_valid_min_stock(0));
        assert!(is_valid_min_stock(5));
        assert!(!is_valid_min_stock(-2));

        assert!(is_valid_quantity(1));
        assert!(!is_valid_quantity(0));
        assert!(!is_valid_quantity(-5));

        assert!(is_valid_percentage(0.0));
        assert!(is_valid_percentage(50.0));
        assert!(is_valid_percentage(100.0));
        assert!(!is_valid_percentage(-1.0));
        assert!(!is_valid_percentage(101.0));
    }

    #[test]
    fn valid_product_passes() {
        assert!(is_valid_product(&product_a()));
        assert_eq!(validate_product(&product_a()), Ok(()));
    }

    #[test]
    fn absent_product_is_invalid() {
        let missing: Option<&Product> = None;
        assert!(!missing.is_some_and(is_valid_product));
    }

    #[test]
    fn product_rejects_each_bad_field() {
        let cases = [
            Product::new("", "Produk A", "Kategori A", 100.0, 10, 5),
            Product::new("P001", "", "Kategori A", 100.0, 10, 5),
            Product::new("P001", "Produk A", "", 100.0, 10, 5),
            Product::new("P001", "Produk A", "Kategori A", -100.0, 10, 5),
            Product::new("P001", "Produk A", "Kategori A", 100.0, -1, 5),
            Product::new("P001", "Produk A", "Kategori A", 100.0, 10, -2),
        ];
        for product in &cases {
            assert!(!is_valid_product(product), "expected invalid: {product}");
        }
    }

    #[test]
    fn product_errors_name_the_failing_field() {
        let bad_code = Product::new("", "Produk A", "Kategori A", 100.0, 10, 5);
        assert!(matches!(validate_product(&bad_code), Err(DomainError::InvalidId(_))));

        let bad_category = Product::new("P001", "Produk A", " ", 100.0, 10, 5);
        match validate_product(&bad_category) {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("category")),
            other => panic!("expected category validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_categories() {
        let k1 = Category::new("K001", "Kategori A", Some("Deskripsi kategori".to_string()));
        let k2 = Category::new("K002", "Kat", None);
        let k3 = Category::new("K003", "Kategori B", Some("D".repeat(500)));
        assert!(is_valid_category(&k1));
        assert!(is_valid_category(&k2));
        assert!(is_valid_category(&k3));
    }

    #[test]
    fn invalid_categories() {
        let cases = [
            Category::new("K002", "", Some("Deskripsi".to_string())),
            Category::new("K003", "AB", Some("Deskripsi".to_string())),
            Category::new("K005", "A".repeat(101), Some("Deskripsi".to_string())),
            Category::new("K004", "Kategori Valid", Some("D".repeat(501))),
        ];
        for category in &cases {
            assert!(!is_valid_category(category), "expected invalid: {category}");
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: any 2-10 char alphanumeric code is accepted.
            #[test]
            fn alphanumeric_codes_in_range_are_valid(code in "[A-Za-z0-9]{2,10}") {
                prop_assert!(is_valid_code(&code));
            }

            /// Property: a single non-alphanumeric character invalidates a code.
            #[test]
            fn codes_with_symbols_are_invalid(
                prefix in "[A-Z0-9]{1,4}",
                symbol in "[-_@#. ]",
                suffix in "[A-Z0-9]{0,4}"
            ) {
                let code = format!("{prefix}{symbol}{suffix}");
                prop_assert!(!is_valid_code(&code));
            }

            /// Property: stock and quantity rules partition the integers at zero.
            #[test]
            fn stock_and_quantity_boundaries(n in any::<i64>()) {
                prop_assert_eq!(is_valid_stock(n), n >= 0);
                prop_assert_eq!(is_valid_min_stock(n), n >= 0);
                prop_assert_eq!(is_valid_quantity(n), n > 0);
            }

            /// Property: the record predicate agrees with the field predicates.
            #[test]
            fn product_predicate_is_conjunction_of_fields(
                code in "[A-Z0-9@]{0,12}",
                name in "[A-Za-z ]{0,8}",
                category in "[A-Za-z]{0,3}",
                price in -10.0f64..10.0,
                stock in -3i64..3,
                min_stock in -3i64..3
            ) {
                let product = Product::new(
                    code.as_str(),
                    name.as_str(),
                    category.as_str(),
                    price,
                    stock,
                    min_stock,
                );
                let expected = is_valid_code(&code)
                    && is_valid_name(&name)
                    && !category.trim().is_empty()
                    && is_valid_price(price)
                    && is_valid_stock(stock)
                    && is_valid_min_stock(min_stock);
                prop_assert_eq!(is_valid_product(&product), expected);
            }
        }
    }
}
