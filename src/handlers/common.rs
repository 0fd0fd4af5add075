use crate::errors::{ApiError, ServiceError};
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Map service errors to API errors
pub fn map_service_error(err: ServiceError) -> ApiError {
    ApiError::ServiceError(err)
}

/// Turns a query-string extraction failure into a JSON 400
pub fn map_query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::ValidationError(format!("Invalid query parameters: {}", rejection.body_text()))
}
