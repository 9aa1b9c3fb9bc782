// src/handlers/payouts.rs

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use crate::{
    common::{
        error::AppError,
        response::{deleted, ApiResponse},
    },
    config::AppState,
    models::{
        allocation::{DocumentLink, DocumentType},
        payout::{Payout, PayoutFilter, PayoutInput},
    },
};

// GET /api/v1/payouts
#[utoipa::path(
    get,
    path = "/api/v1/payouts",
    tag = "Payouts",
    params(PayoutFilter),
    responses(
        (status = 200, description = "Repasses das plataformas", body = Vec<Payout>)
    )
)]
pub async fn list_payouts(
    State(app_state): State<AppState>,
    Query(filter): Query<PayoutFilter>,
) -> Result<Response, AppError> {
    let payouts = app_state.payout_service.list(&filter).await?;
    Ok(ApiResponse::ok(payouts))
}

// GET /api/v1/payouts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/payouts/{id}",
    tag = "Payouts",
    params(("id" = i64, Path, description = "ID do repasse")),
    responses(
        (status = 200, description = "Repasse encontrado", body = Payout),
        (status = 404, description = "Repasse não encontrado")
    )
)]
pub async fn get_payout(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let payout = app_state.payout_service.get(id).await?;
    Ok(ApiResponse::ok(payout))
}

// POST /api/v1/payouts
#[utoipa::path(
    post,
    path = "/api/v1/payouts",
    tag = "Payouts",
    request_body = PayoutInput,
    responses(
        (status = 201, description = "Repasse criado", body = Payout),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_payout(
    State(app_state): State<AppState>,
    Json(payload): Json<PayoutInput>,
) -> Result<Response, AppError> {
    let payout = app_state.payout_service.create(payload).await?;
    Ok(ApiResponse::created(payout))
}

// PUT /api/v1/payouts/{id}
#[utoipa::path(
    put,
    path = "/api/v1/payouts/{id}",
    tag = "Payouts",
    params(("id" = i64, Path, description = "ID do repasse")),
    request_body = PayoutInput,
    responses(
        (status = 200, description = "Repasse atualizado", body = Payout),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Repasse não encontrado")
    )
)]
pub async fn update_payout(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PayoutInput>,
) -> Result<Response, AppError> {
    let payout = app_state.payout_service.update(id, payload).await?;
    Ok(ApiResponse::ok(payout))
}

// DELETE /api/v1/payouts/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/payouts/{id}",
    tag = "Payouts",
    params(("id" = i64, Path, description = "ID do repasse")),
    responses(
        (status = 200, description = "Repasse removido"),
        (status = 404, description = "Repasse não encontrado")
    )
)]
pub async fn delete_payout(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    app_state.payout_service.delete(id).await?;
    Ok(deleted())
}

// GET /api/v1/payouts/{id}/links
#[utoipa::path(
    get,
    path = "/api/v1/payouts/{id}/links",
    tag = "Payouts",
    params(("id" = i64, Path, description = "ID do repasse")),
    responses(
        (status = 200, description = "Movimentações alocadas contra o documento", body = Vec<DocumentLink>),
        (status = 404, description = "Documento não encontrado")
    )
)]
pub async fn list_payout_links(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let links = app_state
        .ledger_service
        .links_for_document(DocumentType::Payout, id)
        .await?;
    Ok(ApiResponse::ok(links))
}
