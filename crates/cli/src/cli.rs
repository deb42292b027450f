//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreArg {
    Memory,
    Json,
}

/// stockroom - product and stock keeping
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repository backend (overrides STOCKROOM_STORE)
    #[arg(long, global = true, value_enum)]
    pub store: Option<StoreArg>,

    /// JSON snapshot path (overrides STOCKROOM_DATA)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Print query results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Register a new product
    Add {
        code: String,
        name: String,
        category: String,
        #[arg(allow_hyphen_values = true)]
        price: f64,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        stock: i64,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        min_stock: i64,
        /// Register the product as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Remove a product whose stock is zero
    Remove { code: String },
    /// Show one product
    Show { code: String },
    /// Search products by name
    Search { name: Option<String> },
    /// List products of a category
    Category { name: String },
    /// Take stock out (e.g. a sale)
    Issue {
        code: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Put stock in (e.g. a delivery)
    Receive {
        code: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Overwrite the stock level
    Set {
        code: String,
        #[arg(allow_hyphen_values = true)]
        stock: i64,
    },
    /// Total value of active products
    Value,
    /// Total stock of active products
    Total,
    /// Products at or below their minimum stock
    Low,
    /// Products with no stock left
    Out,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_options() {
        let cli = Cli::parse_from([
            "stockroom",
            "add",
            "PROD001",
            "Laptop Gaming",
            "Elektronik",
            "15000000",
            "--stock",
            "10",
            "--min-stock",
            "5",
        ]);
        assert_eq!(
            cli.command,
            Commands::Add {
                code: "PROD001".to_string(),
                name: "Laptop Gaming".to_string(),
                category: "Elektronik".to_string(),
                price: 15_000_000.0,
                stock: 10,
                min_stock: 5,
                inactive: false,
            }
        );
    }

    #[test]
    fn negative_quantities_reach_the_service() {
        let cli = Cli::parse_from(["stockroom", "issue", "P001", "-3"]);
        assert_eq!(
            cli.command,
            Commands::Issue {
                code: "P001".to_string(),
                quantity: -3
            }
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["stockroom", "low", "--store", "memory", "--json"]);
        assert_eq!(cli.store, Some(StoreArg::Memory));
        assert!(cli.json);
        assert_eq!(cli.command, Commands::Low);
    }

    #[test]
    fn search_name_is_optional() {
        let cli = Cli::parse_from(["stockroom", "search"]);
        assert_eq!(cli.command, Commands::Search { name: None });
    }
}
