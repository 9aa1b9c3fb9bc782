// src/handlers/contacts.rs

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
    models::contact::{Contact, ContactFilter, ContactInput},
};

// GET /api/v1/contacts
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    tag = "Contacts",
    params(ContactFilter),
    responses(
        (status = 200, description = "Contatos com saldo em aberto", body = Vec<Contact>)
    )
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    Query(filter): Query<ContactFilter>,
) -> Result<Response, AppError> {
    let contacts = app_state.contact_service.list(&filter).await?;
    Ok(ApiResponse::ok(contacts))
}

// GET /api/v1/contacts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    tag = "Contacts",
    params(("id" = i64, Path, description = "ID do contato")),
    responses(
        (status = 200, description = "Contato encontrado", body = Contact),
        (status = 404, description = "Contato não encontrado")
    )
)]
pub async fn get_contact(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let contact = app_state.contact_service.get(id).await?;
    Ok(ApiResponse::ok(contact))
}

// POST /api/v1/contacts
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    tag = "Contacts",
    request_body = ContactInput,
    responses(
        (status = 201, description = "Contato criado", body = Contact),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    Json(payload): Json<ContactInput>,
) -> Result<Response, AppError> {
    let contact = app_state.contact_service.create(payload).await?;
    Ok(ApiResponse::created(contact))
}

// PUT /api/v1/contacts/{id}
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{id}",
    tag = "Contacts",
    params(("id" = i64, Path, description = "ID do contato")),
    request_body = ContactInput,
    responses(
        (status = 200, description = "Contato atualizado", body = Contact),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Contato não encontrado")
    )
)]
pub async fn update_contact(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ContactInput>,
) -> Result<Response, AppError> {
    let contact = app_state.contact_service.update(id, payload).await?;
    Ok(ApiResponse::ok(contact))
}

// DELETE /api/v1/contacts/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    tag = "Contacts",
    params(("id" = i64, Path, description = "ID do contato")),
    responses(
        (status = 200, description = "Contato removido"),
        (status = 404, description = "Contato não encontrado")
    )
)]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    app_state.contact_service.delete(id).await?;
    Ok(deleted())
}
