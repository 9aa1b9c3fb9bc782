// src/handlers/invoices.rs

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
        invoice::{Invoice, InvoiceFilter, InvoiceInput},
    },
};

// GET /api/v1/invoices
#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    tag = "Invoices",
    params(InvoiceFilter),
    responses(
        (status = 200, description = "Invoices com valores alocados", body = Vec<Invoice>)
    )
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    Query(filter): Query<InvoiceFilter>,
) -> Result<Response, AppError> {
    let invoices = app_state.invoice_service.list(&filter).await?;
    Ok(ApiResponse::ok(invoices))
}

// GET /api/v1/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/v1/invoices/{id}",
    tag = "Invoices",
    params(("id" = i64, Path, description = "ID da invoice")),
    responses(
        (status = 200, description = "Invoice encontrada", body = Invoice),
        (status = 404, description = "Invoice não encontrada")
    )
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let invoice = app_state.invoice_service.get(id).await?;
    Ok(ApiResponse::ok(invoice))
}

// POST /api/v1/invoices
#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    tag = "Invoices",
    request_body = InvoiceInput,
    responses(
        (status = 201, description = "Invoice criada", body = Invoice),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<InvoiceInput>,
) -> Result<Response, AppError> {
    let invoice = app_state.invoice_service.create(payload).await?;
    Ok(ApiResponse::created(invoice))
}

// PUT /api/v1/invoices/{id}
#[utoipa::path(
    put,
    path = "/api/v1/invoices/{id}",
    tag = "Invoices",
    params(("id" = i64, Path, description = "ID da invoice")),
    request_body = InvoiceInput,
    responses(
        (status = 200, description = "Invoice atualizada", body = Invoice),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Invoice não encontrada")
    )
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<InvoiceInput>,
) -> Result<Response, AppError> {
    let invoice = app_state.invoice_service.update(id, payload).await?;
    Ok(ApiResponse::ok(invoice))
}

// DELETE /api/v1/invoices/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/invoices/{id}",
    tag = "Invoices",
    params(("id" = i64, Path, description = "ID da invoice")),
    responses(
        (status = 200, description = "Invoice removida"),
        (status = 404, description = "Invoice não encontrada")
    )
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    app_state.invoice_service.delete(id).await?;
    Ok(deleted())
}

// GET /api/v1/invoices/{id}/links
#[utoipa::path(
    get,
    path = "/api/v1/invoices/{id}/links",
    tag = "Invoices",
    params(("id" = i64, Path, description = "ID da invoice")),
    responses(
        (status = 200, description = "Movimentações alocadas contra o documento", body = Vec<DocumentLink>),
        (status = 404, description = "Documento não encontrado")
    )
)]
pub async fn list_invoice_links(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let links = app_state
        .ledger_service
        .links_for_document(DocumentType::Invoice, id)
        .await?;
    Ok(ApiResponse::ok(links))
}
