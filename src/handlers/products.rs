use crate::handlers::common::{map_query_rejection, map_service_error, success_response};
use crate::{
    errors::ApiError,
    services::catalog::{PageRequest, ProductFilters, DEFAULT_LIMIT, DEFAULT_PAGE},
    AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Query string accepted by `GET /api/products`
#[derive(Debug, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[param(minimum = 1, default = 1)]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100, default = 20)]
    pub limit: u64,
    /// Accepted, not yet applied
    pub search: Option<String>,
    /// Accepted, not yet applied
    pub country_code: Option<String>,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    Router::new().route("/products", get(list_products))
}

/// List products with pagination
#[utoipa::path(
    get,
    path = "/api/products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Products retrieved", body = crate::services::catalog::ProductPage),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let Query(params) = params.map_err(map_query_rejection)?;

    let request = PageRequest::new(params.page, params.limit).map_err(map_service_error)?;
    let filters = ProductFilters {
        search: params.search,
        country_code: params.country_code,
    };

    let page = state
        .catalog
        .list_products(request, filters)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(page))
}
