// src/common/response.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Envelope de sucesso: todo corpo 2xx sai como `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Response {
        (StatusCode::OK, Json(ApiResponse { data })).into_response()
    }

    pub fn created(data: T) -> Response {
        (StatusCode::CREATED, Json(ApiResponse { data })).into_response()
    }
}

/// Resposta padrão para DELETE bem-sucedido.
pub fn deleted() -> Response {
    (StatusCode::OK, Json(json!({ "data": { "message": "deleted" } }))).into_response()
}
