// src/common/error.rs

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::{allocation::DocumentType, money::Money};

/// Qual registro não foi encontrado. Os handlers usam isso para montar uma
/// mensagem precisa ("bill not found", "link not found", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Account,
    Contact,
    Bill,
    Invoice,
    Payout,
    Transaction,
    Link,
}

impl From<DocumentType> for EntityKind {
    fn from(document_type: DocumentType) -> Self {
        match document_type {
            DocumentType::Bill => EntityKind::Bill,
            DocumentType::Invoice => EntityKind::Invoice,
            DocumentType::Payout => EntityKind::Payout,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Account => "account",
            EntityKind::Contact => "contact",
            EntityKind::Bill => "bill",
            EntityKind::Invoice => "invoice",
            EntityKind::Payout => "payout",
            EntityKind::Transaction => "transaction",
            EntityKind::Link => "link",
        };
        f.write_str(name)
    }
}

/// O lado da alocação cujo saldo não comporta o valor pedido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacitySide {
    Transaction,
    Document(DocumentType),
}

impl fmt::Display for CapacitySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacitySide::Transaction => f.write_str("transaction"),
            CapacitySide::Document(document_type) => write!(f, "{}", document_type),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", summarize(.0))]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("{side} only has {available} unallocated (requested {requested})")]
    CapacityExceeded {
        side: CapacitySide,
        available: Money,
        requested: Money,
    },

    #[error("request timed out")]
    Timeout,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Qualquer outro erro inesperado
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::CapacityExceeded { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Junta as mensagens do validator numa frase só, campo a campo.
fn summarize(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    if messages.is_empty() {
        "invalid input".to_string()
    } else {
        messages.join("; ")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": summarize(errors),
                "details": details,
            }));
            return (status, body).into_response();
        }

        let message = if status.is_server_error() && status != StatusCode::GATEWAY_TIMEOUT {
            // O detalhe vai pro log; o cliente só recebe a mensagem opaca.
            tracing::error!(error = %self, "internal server error");
            "an unexpected error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(
            AppError::NotFound(EntityKind::Link).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidInput("amount must be positive".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CapacityExceeded {
                side: CapacitySide::Transaction,
                available: Money::from_minor(100),
                requested: Money::from_minor(200),
            }
            .into_response()
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn capacity_message_names_side_and_both_amounts() {
        let err = AppError::CapacityExceeded {
            side: CapacitySide::Document(DocumentType::Invoice),
            available: Money::from_minor(2500),
            requested: Money::from_minor(3000),
        };
        assert_eq!(
            err.to_string(),
            "invoice only has 25.00 unallocated (requested 30.00)"
        );
    }

    #[test]
    fn not_found_names_the_target() {
        assert_eq!(
            AppError::NotFound(EntityKind::Transaction).to_string(),
            "transaction not found"
        );
        assert_eq!(
            AppError::NotFound(DocumentType::Payout.into()).to_string(),
            "payout not found"
        );
    }
}
