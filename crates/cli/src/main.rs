use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use stockroom_infra::{open_repository, InfraConfig, StoreKind};
use stockroom_inventory::{InventoryService, Product, ProductRepository};
use stockroom_observability::LogConfig;

mod cli;

use cli::{Cli, Commands, StoreArg};

fn main() -> anyhow::Result<ExitCode> {
    stockroom_observability::tracing::init(&LogConfig::from_env().with_default_directive("warn"));

    let cli = Cli::parse();

    let mut config = InfraConfig::from_env().context("invalid stockroom configuration")?;
    if let Some(store) = cli.store {
        config.store = match store {
            StoreArg::Memory => StoreKind::Memory,
            StoreArg::Json => StoreKind::Json,
        };
    }
    if let Some(path) = cli.data {
        config.data_path = path;
    }

    let repository = open_repository(&config).with_context(|| {
        format!("failed to open repository at {}", config.data_path.display())
    })?;
    let service = InventoryService::new(repository);

    let outcome = run(&service, cli.command, cli.json, &mut std::io::stdout().lock())?;
    Ok(outcome.exit_code())
}

/// Whether the command did what was asked.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Outcome {
    Done,
    Rejected,
}

impl Outcome {
    fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Self::Done
        } else {
            Self::Rejected
        }
    }

    fn exit_code(self) -> ExitCode {
        match self {
            Self::Done => ExitCode::SUCCESS,
            Self::Rejected => ExitCode::FAILURE,
        }
    }
}

fn run<R: ProductRepository>(
    service: &InventoryService<R>,
    command: Commands,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    match command {
        Commands::Add {
            code,
            name,
            category,
            price,
            stock,
            min_stock,
            inactive,
        } => {
            let product =
                Product::new(code, name, category, price, stock, min_stock).with_active(!inactive);
            report(out, service.add_product(&product))
        }
        Commands::Remove { code } => report(out, service.remove_product(&code)),
        Commands::Issue { code, quantity } => report(out, service.issue_stock(&code, quantity)),
        Commands::Receive { code, quantity } => {
            report(out, service.receive_stock(&code, quantity))
        }
        Commands::Set { code, stock } => report(out, service.set_stock(&code, stock)),
        Commands::Show { code } => match service.find_by_code(&code) {
            Some(product) => {
                print_products(out, &[product], json)?;
                Ok(Outcome::Done)
            }
            None if json => {
                print_products(out, &[], json)?;
                Ok(Outcome::Rejected)
            }
            None => {
                writeln!(out, "not found")?;
                Ok(Outcome::Rejected)
            }
        },
        Commands::Search { name } => {
            print_products(out, &service.find_by_name(name.as_deref()), json)?;
            Ok(Outcome::Done)
        }
        Commands::Category { name } => {
            print_products(out, &service.find_by_category(&name), json)?;
            Ok(Outcome::Done)
        }
        Commands::Low => {
            print_products(out, &service.low_stock_products(), json)?;
            Ok(Outcome::Done)
        }
        Commands::Out => {
            print_products(out, &service.out_of_stock_products(), json)?;
            Ok(Outcome::Done)
        }
        Commands::Value => {
            writeln!(out, "{:.2}", service.total_inventory_value())?;
            Ok(Outcome::Done)
        }
        Commands::Total => {
            writeln!(out, "{}", service.total_stock())?;
            Ok(Outcome::Done)
        }
    }
}

fn report(out: &mut impl Write, accepted: bool) -> anyhow::Result<Outcome> {
    writeln!(out, "{}", if accepted { "ok" } else { "rejected" })?;
    Ok(Outcome::from_accepted(accepted))
}

fn print_products(out: &mut impl Write, products: &[Product], json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(products)?)?;
    } else {
        for product in products {
            writeln!(out, "{product}")?;
        }
    }
    tracing::debug!(count = products.len(), "listed products");
    Ok(())
}
