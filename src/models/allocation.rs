// src/models/allocation.rs

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::validation::{invalid, validate_positive, validate_positive_id};
use crate::models::money::Money;

/// Documentos que podem receber alocação.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Bill,
    Invoice,
    Payout,
}

impl DocumentType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bill" => Some(DocumentType::Bill),
            "invoice" => Some(DocumentType::Invoice),
            "payout" => Some(DocumentType::Payout),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Bill => "bill",
            DocumentType::Invoice => "invoice",
            DocumentType::Payout => "payout",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn validate_document_type(value: &str) -> Result<(), ValidationError> {
    DocumentType::parse(value)
        .map(|_| ())
        .ok_or_else(|| invalid("one_of", "document_type must be one of: bill, invoice, payout"))
}

/// Aplicação de parte (ou todo) de uma movimentação a um documento.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct AllocationLink {
    pub id: i64,
    pub transaction_id: i64,
    pub document_type: DocumentType,
    pub document_id: i64,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

/// Visão de uma alocação a partir do documento: traz os dados da
/// movimentação e o nome da conta.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct DocumentLink {
    pub id: i64,
    pub transaction_id: i64,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
    pub transaction_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub account_name: Option<String>,
}

/// Valor total e quanto já foi alocado, de uma movimentação ou de um
/// documento. Base das checagens de teto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct Capacity {
    pub amount: Money,
    pub allocated: Money,
}

impl Capacity {
    pub fn unallocated(&self) -> Money {
        self.amount - self.allocated
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LinkInput {
    #[validate(custom(function = "validate_document_type"))]
    #[schema(example = "bill")]
    pub document_type: String,

    #[validate(custom(function = "validate_positive_id", message = "document_id is required"))]
    pub document_id: i64,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Money,
}

impl LinkInput {
    pub fn document_type(&self) -> Option<DocumentType> {
        DocumentType::parse(&self.document_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payout_is_a_linkable_document() {
        let input: LinkInput = serde_json::from_str(
            r#"{"document_type":"payout","document_id":7,"amount":2500}"#,
        )
        .unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.document_type(), Some(DocumentType::Payout));
    }

    #[test]
    fn rejects_unknown_document_zero_id_and_zero_amount() {
        let input: LinkInput = serde_json::from_str(
            r#"{"document_type":"receipt","document_id":0,"amount":0}"#,
        )
        .unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("document_type"));
        assert!(fields.contains_key("document_id"));
        assert!(fields.contains_key("amount"));
    }
}
