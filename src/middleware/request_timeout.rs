// src/middleware/request_timeout.rs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState};

/// Prazo máximo por requisição. Estourou o prazo, o future do handler é
/// descartado: uma transação de banco aberta sofre rollback no drop.
pub async fn request_timeout(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(app_state.request_timeout, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => {
            tracing::warn!(%method, %uri, "request exceeded its deadline");
            Err(AppError::Timeout)
        }
    }
}
