//! Seed data script - populates an empty catalog with generated sample data
//!
//! Run with: cargo run --bin seed-data -- --products 1000 --out-of-stock 150
//!
//! This creates, when the store has no products yet:
//! - 9 categories
//! - products spread uniformly across those categories
//! - one inventory row per product for US and CA, the first products with zero stock

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use catalog_api::{
    config,
    db::{self, DbConfig},
    services::seeding::{
        SeedOutcome, SeedPlan, Seeder, DEFAULT_OUT_OF_STOCK_COUNT, DEFAULT_PRODUCT_COUNT,
    },
};

#[derive(Parser, Debug)]
#[command(name = "seed-data", about = "Seed the catalog store with sample data", version)]
struct Cli {
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://catalog.db?mode=rwc",
        help = "Database connection URL"
    )]
    database_url: String,

    #[arg(long, default_value_t = DEFAULT_PRODUCT_COUNT, help = "Number of products to generate")]
    products: usize,

    #[arg(
        long,
        default_value_t = DEFAULT_OUT_OF_STOCK_COUNT,
        help = "Leading products given zero stock in every country"
    )]
    out_of_stock: usize,

    #[arg(long, help = "Fixed RNG seed for a reproducible dataset")]
    seed: Option<u64>,

    #[arg(long, help = "Skip running migrations before seeding")]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    config::init_tracing("info", false);

    info!("=== Catalog Seed Data ===");

    let plan = SeedPlan {
        product_count: cli.products,
        out_of_stock_count: cli.out_of_stock,
        rng_seed: cli.seed,
        ..Default::default()
    };
    plan.validate().context("invalid seed options")?;

    let pool = db::establish_connection_with_config(&DbConfig {
        url: cli.database_url.clone(),
        max_connections: 5,
        ..Default::default()
    })
    .await
    .with_context(|| format!("failed to connect to {}", cli.database_url))?;
    info!("Connected!");

    if !cli.skip_migrations {
        db::run_migrations(&pool).await?;
    }

    let seeder = Seeder::new(Arc::new(pool), plan);
    match seeder.seed_if_empty().await? {
        SeedOutcome::Seeded(report) => {
            info!("=== Seed Data Complete ===");
            info!("  Categories:       {}", report.categories);
            info!("  Products:         {}", report.products);
            info!(
                "  Inventory rows:   {} ({} out of stock)",
                report.inventory_rows, report.out_of_stock_rows
            );
            info!("");
            info!("Try: curl 'http://localhost:8000/api/products?page=1&limit=20'");
        }
        SeedOutcome::Skipped { existing_products } => {
            info!(
                "Store already holds {} products; nothing to do",
                existing_products
            );
        }
    }

    Ok(())
}
