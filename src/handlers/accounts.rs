// src/handlers/accounts.rs

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
    models::account::{Account, AccountFilter, AccountInput},
};

// GET /api/v1/accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "Accounts",
    params(AccountFilter),
    responses(
        (status = 200, description = "Contas com saldo calculado", body = Vec<Account>)
    )
)]
pub async fn list_accounts(
    State(app_state): State<AppState>,
    Query(filter): Query<AccountFilter>,
) -> Result<Response, AppError> {
    let accounts = app_state.account_service.list(&filter).await?;
    Ok(ApiResponse::ok(accounts))
}

// GET /api/v1/accounts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    tag = "Accounts",
    params(("id" = i64, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta encontrada", body = Account),
        (status = 404, description = "Conta não encontrada")
    )
)]
pub async fn get_account(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let account = app_state.account_service.get(id).await?;
    Ok(ApiResponse::ok(account))
}

// POST /api/v1/accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "Accounts",
    request_body = AccountInput,
    responses(
        (status = 201, description = "Conta criada", body = Account),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_account(
    State(app_state): State<AppState>,
    Json(payload): Json<AccountInput>,
) -> Result<Response, AppError> {
    let account = app_state.account_service.create(payload).await?;
    Ok(ApiResponse::created(account))
}

// PUT /api/v1/accounts/{id}
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{id}",
    tag = "Accounts",
    params(("id" = i64, Path, description = "ID da conta")),
    request_body = AccountInput,
    responses(
        (status = 200, description = "Conta atualizada", body = Account),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Conta não encontrada")
    )
)]
pub async fn update_account(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AccountInput>,
) -> Result<Response, AppError> {
    let account = app_state.account_service.update(id, payload).await?;
    Ok(ApiResponse::ok(account))
}

// DELETE /api/v1/accounts/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}",
    tag = "Accounts",
    params(("id" = i64, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta removida"),
        (status = 400, description = "Conta ainda tem movimentações"),
        (status = 404, description = "Conta não encontrada")
    )
)]
pub async fn delete_account(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    app_state.account_service.delete(id).await?;
    Ok(deleted())
}
