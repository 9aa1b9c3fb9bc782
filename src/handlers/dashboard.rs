// src/handlers/dashboard.rs

use axum::{extract::State, response::Response};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::dashboard::DashboardSummary,
};

// GET /api/v1/dashboard
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais, valores em aberto e últimas movimentações", body = DashboardSummary)
    )
)]
pub async fn get_summary(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let summary = app_state.dashboard_service.get_summary().await?;
    Ok(ApiResponse::ok(summary))
}
