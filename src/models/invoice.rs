// src/models/invoice.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::validation::{invalid, validate_not_negative};
use crate::models::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Partial,
    Sent,
    Paid,
    Received,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    /// String vazia vale como `draft`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "draft" => Some(InvoiceStatus::Draft),
            "partial" => Some(InvoiceStatus::Partial),
            "sent" => Some(InvoiceStatus::Sent),
            "received" => Some(InvoiceStatus::Received),
            "paid" => Some(InvoiceStatus::Paid),
            "overdue" => Some(InvoiceStatus::Overdue),
            "cancelled" => Some(InvoiceStatus::Cancelled),
            _ => None,
        }
    }
}

fn validate_invoice_status(value: &str) -> Result<(), ValidationError> {
    InvoiceStatus::parse(value).map(|_| ()).ok_or_else(|| {
        invalid(
            "one_of",
            "status must be one of: draft, partial, sent, paid, received, overdue, cancelled",
        )
    })
}

/// Fatura emitida a um cliente.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Invoice {
    pub id: i64,
    pub contact_id: Option<i64>,
    pub invoice_number: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub file_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    pub allocated: Money,
    pub unallocated: Money,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct InvoiceInput {
    pub contact_id: Option<i64>,
    #[serde(default)]
    pub invoice_number: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Money,

    #[serde(default)]
    #[validate(custom(function = "validate_invoice_status"))]
    #[schema(example = "draft")]
    pub status: String,

    pub file_url: Option<String>,
    pub notes: Option<String>,
}

impl InvoiceInput {
    pub fn invoice_status(&self) -> Option<InvoiceStatus> {
        InvoiceStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceFilter {
    pub status: Option<String>,
    pub contact_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_status_defaults_to_draft() {
        let input: InvoiceInput = serde_json::from_str(r#"{"amount":10000}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.invoice_status(), Some(InvoiceStatus::Draft));
    }

    #[test]
    fn sent_is_an_invoice_status() {
        let input: InvoiceInput =
            serde_json::from_str(r#"{"amount":10000,"status":"sent"}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.invoice_status(), Some(InvoiceStatus::Sent));

        let input: InvoiceInput =
            serde_json::from_str(r#"{"amount":10000,"status":"settled"}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let input: InvoiceInput = serde_json::from_str(r#"{"amount":-1}"#).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }
}
