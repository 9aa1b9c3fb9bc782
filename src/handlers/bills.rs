// src/handlers/bills.rs

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
        bill::{Bill, BillFilter, BillInput},
    },
};

// GET /api/v1/bills
#[utoipa::path(
    get,
    path = "/api/v1/bills",
    tag = "Bills",
    params(BillFilter),
    responses(
        (status = 200, description = "Bills com valores alocados", body = Vec<Bill>)
    )
)]
pub async fn list_bills(
    State(app_state): State<AppState>,
    Query(filter): Query<BillFilter>,
) -> Result<Response, AppError> {
    let bills = app_state.bill_service.list(&filter).await?;
    Ok(ApiResponse::ok(bills))
}

// GET /api/v1/bills/{id}
#[utoipa::path(
    get,
    path = "/api/v1/bills/{id}",
    tag = "Bills",
    params(("id" = i64, Path, description = "ID da bill")),
    responses(
        (status = 200, description = "Bill encontrada", body = Bill),
        (status = 404, description = "Bill não encontrada")
    )
)]
pub async fn get_bill(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let bill = app_state.bill_service.get(id).await?;
    Ok(ApiResponse::ok(bill))
}

// POST /api/v1/bills
#[utoipa::path(
    post,
    path = "/api/v1/bills",
    tag = "Bills",
    request_body = BillInput,
    responses(
        (status = 201, description = "Bill criada", body = Bill),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_bill(
    State(app_state): State<AppState>,
    Json(payload): Json<BillInput>,
) -> Result<Response, AppError> {
    let bill = app_state.bill_service.create(payload).await?;
    Ok(ApiResponse::created(bill))
}

// PUT /api/v1/bills/{id}
#[utoipa::path(
    put,
    path = "/api/v1/bills/{id}",
    tag = "Bills",
    params(("id" = i64, Path, description = "ID da bill")),
    request_body = BillInput,
    responses(
        (status = 200, description = "Bill atualizada", body = Bill),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Bill não encontrada")
    )
)]
pub async fn update_bill(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BillInput>,
) -> Result<Response, AppError> {
    let bill = app_state.bill_service.update(id, payload).await?;
    Ok(ApiResponse::ok(bill))
}

// DELETE /api/v1/bills/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/bills/{id}",
    tag = "Bills",
    params(("id" = i64, Path, description = "ID da bill")),
    responses(
        (status = 200, description = "Bill removida"),
        (status = 404, description = "Bill não encontrada")
    )
)]
pub async fn delete_bill(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    app_state.bill_service.delete(id).await?;
    Ok(deleted())
}

// GET /api/v1/bills/{id}/links
#[utoipa::path(
    get,
    path = "/api/v1/bills/{id}/links",
    tag = "Bills",
    params(("id" = i64, Path, description = "ID da bill")),
    responses(
        (status = 200, description = "Movimentações alocadas contra o documento", body = Vec<DocumentLink>),
        (status = 404, description = "Documento não encontrado")
    )
)]
pub async fn list_bill_links(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let links = app_state
        .ledger_service
        .links_for_document(DocumentType::Bill, id)
        .await?;
    Ok(ApiResponse::ok(links))
}
