// src/models/bill.rs

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
pub enum BillStatus {
    Draft,
    Partial,
    Received,
    Paid,
    Overdue,
    Cancelled,
}

impl BillStatus {
    /// String vazia vale como `draft`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "draft" => Some(BillStatus::Draft),
            "partial" => Some(BillStatus::Partial),
            "received" => Some(BillStatus::Received),
            "paid" => Some(BillStatus::Paid),
            "overdue" => Some(BillStatus::Overdue),
            "cancelled" => Some(BillStatus::Cancelled),
            _ => None,
        }
    }
}

fn validate_bill_status(value: &str) -> Result<(), ValidationError> {
    BillStatus::parse(value).map(|_| ()).ok_or_else(|| {
        invalid(
            "one_of",
            "status must be one of: draft, partial, received, paid, overdue, cancelled",
        )
    })
}

/// Conta a pagar. `allocated` / `unallocated` vêm das alocações.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Bill {
    pub id: i64,
    pub contact_id: Option<i64>,
    pub bill_number: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub amount: Money,
    pub status: BillStatus,
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
pub struct BillInput {
    pub contact_id: Option<i64>,
    #[serde(default)]
    pub bill_number: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Money,

    #[serde(default)]
    #[validate(custom(function = "validate_bill_status"))]
    #[schema(example = "draft")]
    pub status: String,

    pub file_url: Option<String>,
    pub notes: Option<String>,
}

impl BillInput {
    pub fn bill_status(&self) -> Option<BillStatus> {
        BillStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BillFilter {
    pub status: Option<String>,
    pub contact_id: Option<i64>,
    /// issue_date >= from
    pub from: Option<NaiveDate>,
    /// issue_date <= to
    pub to: Option<NaiveDate>,
    /// Busca em número, notas e nome do contato
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_status_defaults_to_draft() {
        let input: BillInput = serde_json::from_str(r#"{"amount":10000}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.bill_status(), Some(BillStatus::Draft));
    }

    #[test]
    fn sent_is_not_a_bill_status() {
        let input: BillInput =
            serde_json::from_str(r#"{"amount":10000,"status":"sent"}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let input: BillInput = serde_json::from_str(r#"{"amount":-1}"#).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }
}
