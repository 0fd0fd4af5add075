use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = r#"
# Catalog API

Read-only product catalog backed by a relational store seeded with sample categories,
products and per-country inventory.

## Pagination

`GET /api/products` accepts:
- `page`: Page number (default: 1, minimum: 1)
- `limit`: Items per page (default: 20, range: 1-100)
- `search`, `country_code`: accepted and currently ignored

Pages past the end return an empty `data` array with the real `total`.

## Error Handling

Failures use a consistent JSON body:

```json
{
  "error": "Bad Request",
  "message": "Validation error: limit must be between 1 and 100",
  "request_id": "9d0c6f1e-...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development")
    ),
    tags(
        (name = "Products", description = "Product listing endpoints")
    ),
    paths(
        crate::handlers::products::list_products,
    ),
    components(
        schemas(
            crate::services::catalog::ProductPage,
            crate::services::catalog::ProductSummary,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
