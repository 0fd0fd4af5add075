//! One-shot population of an empty catalog with generated sample data.
//!
//! The seeder writes categories, then products, then one inventory row per product
//! and supported country. Everything happens inside a single transaction: either the
//! whole dataset is committed or nothing is.

use crate::{
    config::AppConfig,
    entities::{category, inventory, product, Inventory, Product},
    errors::ServiceError,
};
use fake::faker::lorem::en::{Sentence, Word};
use fake::Fake;
use metrics::counter;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Category names seeded into an empty store
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Smartphones",
    "Laptops",
    "Sneakers",
    "Headphones",
    "Books",
    "Cookware",
    "Cameras",
    "Gaming Consoles",
    "Watches",
];

/// Countries that receive an inventory row for every product
pub const SUPPORTED_COUNTRIES: [&str; 2] = ["US", "CA"];

pub const DEFAULT_PRODUCT_COUNT: usize = 1000;
pub const DEFAULT_OUT_OF_STOCK_COUNT: usize = 150;

/// Bulk inserts stay well under SQLite's bound-parameter limit
const INVENTORY_CHUNK_SIZE: usize = 200;

/// Shape of the generated dataset
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub categories: Vec<String>,
    pub product_count: usize,
    /// The first `out_of_stock_count` products (creation order) get zero stock everywhere
    pub out_of_stock_count: usize,
    pub country_codes: Vec<String>,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_quantity: i32,
    pub max_quantity: i32,
    /// Fixed seed for a reproducible dataset; entropy when `None`
    pub rng_seed: Option<u64>,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            product_count: DEFAULT_PRODUCT_COUNT,
            out_of_stock_count: DEFAULT_OUT_OF_STOCK_COUNT,
            country_codes: SUPPORTED_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            min_price: dec!(9.99),
            max_price: dec!(999.99),
            min_quantity: 1,
            max_quantity: 100,
            rng_seed: None,
        }
    }
}

impl From<&AppConfig> for SeedPlan {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            product_count: cfg.seed_product_count as usize,
            out_of_stock_count: cfg.seed_out_of_stock_count as usize,
            rng_seed: cfg.seed_rng_seed,
            ..Default::default()
        }
    }
}

impl SeedPlan {
    /// Rejects plans that cannot produce a consistent dataset
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.categories.is_empty() {
            return Err(ServiceError::InvalidInput(
                "at least one category is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.categories {
            if name.trim().is_empty() {
                return Err(ServiceError::InvalidInput(
                    "category names cannot be blank".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ServiceError::InvalidInput(format!(
                    "duplicate category name '{}'",
                    name
                )));
            }
        }

        if self.product_count == 0 {
            return Err(ServiceError::InvalidInput(
                "product_count must be greater than zero".to_string(),
            ));
        }
        if self.out_of_stock_count > self.product_count {
            return Err(ServiceError::InvalidInput(format!(
                "out_of_stock_count ({}) cannot exceed product_count ({})",
                self.out_of_stock_count, self.product_count
            )));
        }

        if self.country_codes.is_empty() {
            return Err(ServiceError::InvalidInput(
                "at least one country code is required".to_string(),
            ));
        }
        let mut countries = HashSet::new();
        for code in &self.country_codes {
            if !inventory::is_valid_country_code(code) {
                return Err(ServiceError::InvalidInput(format!(
                    "invalid country code '{}'",
                    code
                )));
            }
            if !countries.insert(code.as_str()) {
                return Err(ServiceError::InvalidInput(format!(
                    "duplicate country code '{}'",
                    code
                )));
            }
        }

        if self.min_price.is_sign_negative() || self.min_price > self.max_price {
            return Err(ServiceError::InvalidInput(format!(
                "invalid price range [{}, {}]",
                self.min_price, self.max_price
            )));
        }

        // In-stock rows must actually hold stock.
        if self.min_quantity < 1 || self.min_quantity > self.max_quantity {
            return Err(ServiceError::InvalidInput(format!(
                "invalid quantity range [{}, {}]",
                self.min_quantity, self.max_quantity
            )));
        }

        Ok(())
    }

    pub fn is_out_of_stock(&self, position: usize) -> bool {
        position < self.out_of_stock_count
    }
}

/// Counts written by a seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    pub inventory_rows: usize,
    pub out_of_stock_rows: usize,
    pub in_stock_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedOutcome {
    /// The store already held products; nothing was written
    Skipped { existing_products: u64 },
    Seeded(SeedReport),
}

/// Generated product fields, prior to insertion
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_index: usize,
}

/// Populates an empty store
#[derive(Clone)]
pub struct Seeder {
    db: Arc<DatabaseConnection>,
    plan: SeedPlan,
}

impl Seeder {
    pub fn new(db: Arc<DatabaseConnection>, plan: SeedPlan) -> Self {
        Self { db, plan }
    }

    /// Seeds the store unless it already contains products.
    ///
    /// Safe to call on every process start. Concurrent calls from separate
    /// processes may race on the emptiness check.
    #[instrument(skip(self), fields(products = self.plan.product_count))]
    pub async fn seed_if_empty(&self) -> Result<SeedOutcome, ServiceError> {
        let existing_products = Product::find().count(&*self.db).await?;
        if existing_products > 0 {
            info!(existing_products, "Catalog already seeded; skipping");
            return Ok(SeedOutcome::Skipped { existing_products });
        }

        self.plan.validate()?;

        info!(
            countries = %self.plan.country_codes.join(","),
            out_of_stock = self.plan.out_of_stock_count,
            "Seeding catalog"
        );

        let mut rng = match self.plan.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let drafts = generate_products(&self.plan, &mut rng)?;

        // Dropping the transaction on an early return rolls everything back.
        let txn = self.db.begin().await?;

        info!("  → Seeding {} categories...", self.plan.categories.len());
        let mut category_ids = Vec::with_capacity(self.plan.categories.len());
        for name in &self.plan.categories {
            let created = category::ActiveModel {
                name: Set(name.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            category_ids.push(created.id);
        }

        info!("  → Seeding {} products...", drafts.len());
        let mut product_ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let created = product::ActiveModel {
                name: Set(draft.name),
                description: Set(draft.description),
                price: Set(draft.price),
                category_id: Set(category_ids[draft.category_index]),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            product_ids.push(created.id);
        }

        info!(
            "  → Seeding inventory ({} of {} products out of stock)...",
            self.plan.out_of_stock_count,
            product_ids.len()
        );
        let mut report = SeedReport {
            categories: category_ids.len(),
            products: product_ids.len(),
            ..Default::default()
        };
        let mut rows = Vec::with_capacity(product_ids.len() * self.plan.country_codes.len());
        for (position, product_id) in product_ids.iter().enumerate() {
            let out_of_stock = self.plan.is_out_of_stock(position);
            for country in &self.plan.country_codes {
                let quantity = if out_of_stock {
                    report.out_of_stock_rows += 1;
                    0
                } else {
                    report.in_stock_rows += 1;
                    rng.gen_range(self.plan.min_quantity..=self.plan.max_quantity)
                };
                inventory::check_row(country, quantity)?;
                rows.push(inventory::ActiveModel::stock(*product_id, country, quantity));
            }
        }

        for chunk in rows.chunks(INVENTORY_CHUNK_SIZE) {
            Inventory::insert_many(chunk.to_vec()).exec(&txn).await?;
            debug!(rows = chunk.len(), "Inserted inventory chunk");
        }
        report.inventory_rows = rows.len();

        txn.commit().await?;

        counter!("catalog_seed.runs", 1);
        counter!("catalog_seed.products", report.products as u64);
        info!(
            categories = report.categories,
            products = report.products,
            inventory_rows = report.inventory_rows,
            "Seeded catalog"
        );

        Ok(SeedOutcome::Seeded(report))
    }
}

/// Generates product drafts in creation order
pub fn generate_products<R: Rng + ?Sized>(
    plan: &SeedPlan,
    rng: &mut R,
) -> Result<Vec<ProductDraft>, ServiceError> {
    let category_indexes: Vec<usize> = (0..plan.categories.len()).collect();
    let mut drafts = Vec::with_capacity(plan.product_count);

    for _ in 0..plan.product_count {
        let name = format!(
            "{} {}",
            capitalize(&Word().fake_with_rng::<String, _>(rng)),
            capitalize(&Word().fake_with_rng::<String, _>(rng))
        );
        let description: String = Sentence(6..11).fake_with_rng(rng);
        let price = sample_price(plan.min_price, plan.max_price, rng)?;
        let category_index = *category_indexes
            .choose(rng)
            .ok_or_else(|| ServiceError::InvalidInput("no categories to choose from".into()))?;

        drafts.push(ProductDraft {
            name,
            description,
            price,
            category_index,
        });
    }

    Ok(drafts)
}

/// Uniform price in `[min, max]`, rounded half-to-even to cents
pub fn sample_price<R: Rng + ?Sized>(
    min: Decimal,
    max: Decimal,
    rng: &mut R,
) -> Result<Decimal, ServiceError> {
    let (lo, hi) = match (min.to_f64(), max.to_f64()) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => {
            return Err(ServiceError::InvalidInput(format!(
                "price bounds [{}, {}] are not representable",
                min, max
            )))
        }
    };

    let raw = if lo == hi { lo } else { rng.gen_range(lo..=hi) };
    let price = Decimal::from_f64(raw)
        .ok_or_else(|| ServiceError::InternalError(format!("sampled price {} is not finite", raw)))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

    Ok(price.clamp(min, max))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
