// src/handlers/transactions.rs

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
        allocation::{AllocationLink, LinkInput},
        transaction::{Transaction, TransactionFilter, TransactionInput},
    },
};

// GET /api/v1/transactions
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "Transactions",
    params(TransactionFilter),
    responses(
        (status = 200, description = "Movimentações com valores alocados", body = Vec<Transaction>)
    )
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Response, AppError> {
    let transactions = app_state.transaction_service.list(&filter).await?;
    Ok(ApiResponse::ok(transactions))
}

// GET /api/v1/transactions/{id}
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    params(("id" = i64, Path, description = "ID da movimentação")),
    responses(
        (status = 200, description = "Movimentação encontrada", body = Transaction),
        (status = 404, description = "Movimentação não encontrada")
    )
)]
pub async fn get_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let transaction = app_state.transaction_service.get(id).await?;
    Ok(ApiResponse::ok(transaction))
}

// POST /api/v1/transactions
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    tag = "Transactions",
    request_body = TransactionInput,
    responses(
        (status = 201, description = "Movimentação criada (na transferência, a perna de saída)", body = Transaction),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    Json(payload): Json<TransactionInput>,
) -> Result<Response, AppError> {
    let transaction = app_state.transaction_service.create(payload).await?;
    Ok(ApiResponse::created(transaction))
}

// PUT /api/v1/transactions/{id}
#[utoipa::path(
    put,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    params(("id" = i64, Path, description = "ID da movimentação")),
    request_body = TransactionInput,
    responses(
        (status = 200, description = "Movimentação atualizada", body = Transaction),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Movimentação não encontrada")
    )
)]
pub async fn update_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionInput>,
) -> Result<Response, AppError> {
    let transaction = app_state.transaction_service.update(id, payload).await?;
    Ok(ApiResponse::ok(transaction))
}

// DELETE /api/v1/transactions/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    params(("id" = i64, Path, description = "ID da movimentação")),
    responses(
        (status = 200, description = "Movimentação removida; a outra perna de uma transferência permanece"),
        (status = 404, description = "Movimentação não encontrada")
    )
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    app_state.transaction_service.delete(id).await?;
    Ok(deleted())
}

// =============================================================================
//  ALOCAÇÕES
// =============================================================================

// GET /api/v1/transactions/{id}/links
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}/links",
    tag = "Transactions",
    params(("id" = i64, Path, description = "ID da movimentação")),
    responses(
        (status = 200, description = "Vínculos da movimentação, do mais antigo ao mais novo", body = Vec<AllocationLink>)
    )
)]
pub async fn list_links(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let links = app_state.ledger_service.list_links(id).await?;
    Ok(ApiResponse::ok(links))
}

// POST /api/v1/transactions/{id}/links
#[utoipa::path(
    post,
    path = "/api/v1/transactions/{id}/links",
    tag = "Transactions",
    params(("id" = i64, Path, description = "ID da movimentação")),
    request_body = LinkInput,
    responses(
        (status = 201, description = "Valor alocado ao documento", body = AllocationLink),
        (status = 400, description = "Dados inválidos ou teto de alocação excedido"),
        (status = 404, description = "Movimentação ou documento não encontrado")
    )
)]
pub async fn create_link(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<LinkInput>,
) -> Result<Response, AppError> {
    let link = app_state.ledger_service.link(id, payload).await?;
    Ok(ApiResponse::created(link))
}

// DELETE /api/v1/transactions/{id}/links/{link_id}
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}/links/{link_id}",
    tag = "Transactions",
    params(
        ("id" = i64, Path, description = "ID da movimentação"),
        ("link_id" = i64, Path, description = "ID do vínculo")
    ),
    responses(
        (status = 200, description = "Vínculo removido"),
        (status = 404, description = "Vínculo não encontrado nesta movimentação")
    )
)]
pub async fn delete_link(
    State(app_state): State<AppState>,
    Path((id, link_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    app_state.ledger_service.unlink(id, link_id).await?;
    Ok(deleted())
}
