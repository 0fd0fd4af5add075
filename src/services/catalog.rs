use crate::{
    entities::{product, Product, ProductModel},
    errors::ServiceError,
};
use rust_decimal::Decimal;
use sea_orm::{
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// A validated page selection. Only constructible through [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Result<Self, ServiceError> {
        if page < 1 {
            return Err(ServiceError::ValidationError(
                "page must be greater than zero".to_string(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ServiceError::ValidationError(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Rows skipped before this page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Filters accepted by the listing endpoint. Neither narrows the result yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub search: Option<String>,
    pub country_code: Option<String>,
}

/// Product projection returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Id of the owning category
    pub category: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 199.99)]
    pub price: Decimal,
}

impl From<ProductModel> for ProductSummary {
    fn from(model: ProductModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category_id,
            price: model.price,
        }
    }
}

/// Paginated listing envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub data: Vec<ProductSummary>,
    pub page: u64,
    pub limit: u64,
    /// Number of products in the store, independent of pagination
    pub total: u64,
}

/// Read-only access to the product catalog
#[derive(Clone)]
pub struct ProductCatalogService {
    db: Arc<DatabaseConnection>,
}

impl ProductCatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists products in id order.
    ///
    /// The count and the page are read on the same transaction so `total` agrees
    /// with `data`. Pages past the end come back empty.
    #[instrument(skip(self), fields(page = request.page(), limit = request.limit()))]
    pub async fn list_products(
        &self,
        request: PageRequest,
        filters: ProductFilters,
    ) -> Result<ProductPage, ServiceError> {
        if filters != ProductFilters::default() {
            debug!(
                search = ?filters.search,
                country_code = ?filters.country_code,
                "Listing filters received but not applied"
            );
        }

        let txn = self.db.begin().await?;

        let total = Product::find().count(&txn).await?;
        let offset = request.offset();

        let rows = if offset >= total {
            Vec::new()
        } else {
            Product::find()
                .order_by_asc(product::Column::Id)
                .offset(offset)
                .limit(request.limit())
                .all(&txn)
                .await?
        };

        txn.commit().await?;

        Ok(ProductPage {
            data: rows.into_iter().map(ProductSummary::from).collect(),
            page: request.page(),
            limit: request.limit(),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    #[test]
    fn page_request_bounds() {
        assert!(PageRequest::new(1, 1).is_ok());
        assert!(PageRequest::new(1, 100).is_ok());
        assert_matches!(PageRequest::new(0, 20), Err(ServiceError::ValidationError(_)));
        assert_matches!(PageRequest::new(1, 0), Err(ServiceError::ValidationError(_)));
        assert_matches!(PageRequest::new(1, 101), Err(ServiceError::ValidationError(_)));
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 20).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3, 20).unwrap().offset(), 40);
        assert_eq!(PageRequest::new(u64::MAX, 100).unwrap().offset(), u64::MAX);
    }

    #[test]
    fn default_page_request() {
        let request = PageRequest::default();
        assert_eq!((request.page(), request.limit()), (1, 20));
    }

    #[test]
    fn summary_serializes_price_as_number() {
        let summary = ProductSummary::from(ProductModel {
            id: 4,
            name: "Quick Fox".into(),
            description: "A sentence.".into(),
            price: dec!(19.99),
            category_id: 2,
        });

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["category"], 2);
        assert_eq!(value["price"].as_f64(), Some(19.99));
        assert!(value.get("category_id").is_none());
    }
}
