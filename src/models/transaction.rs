// src/models/transaction.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::validation::{field_error, invalid, validate_positive, validate_positive_id};
use crate::models::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            "transfer" => Some(TransactionType::Transfer),
            _ => None,
        }
    }
}

fn validate_transaction_type(value: &str) -> Result<(), ValidationError> {
    TransactionType::parse(value)
        .map(|_| ())
        .ok_or_else(|| invalid("one_of", "type must be one of: income, expense, transfer"))
}

/// Movimentação bancária. Uma transferência vira duas linhas (saída na
/// origem, entrada no destino) com a mesma referência.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Money,
    pub transaction_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub transfer_account_id: Option<i64>,
    pub contact_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    pub allocated: Money,
    pub unallocated: Money,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TransactionInput {
    #[validate(custom(function = "validate_positive_id", message = "account_id is required"))]
    pub account_id: i64,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_transaction_type"))]
    #[schema(example = "expense")]
    pub kind: String,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Money,

    pub transaction_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub transfer_account_id: Option<i64>,
    pub contact_id: Option<i64>,
}

impl TransactionInput {
    pub fn transaction_type(&self) -> Option<TransactionType> {
        TransactionType::parse(&self.kind)
    }

    // Regra cruzada: transferência precisa de um destino diferente da origem.
    fn validate_consistency(&self) -> Result<(), ValidationError> {
        if self.transaction_type() != Some(TransactionType::Transfer) {
            return Ok(());
        }
        match self.transfer_account_id {
            None => Err(invalid(
                "required",
                "transfer_account_id is required for transfers",
            )),
            Some(id) if id <= 0 => Err(invalid(
                "range",
                "transfer_account_id must be positive",
            )),
            Some(id) if id == self.account_id => Err(invalid(
                "same_account",
                "transfer_account_id must differ from account_id",
            )),
            Some(_) => Ok(()),
        }
    }

    /// Validação do derive seguida da regra de transferência.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        self.validate_consistency()
            .map_err(|e| field_error("transfer_account_id", e))
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub account_id: Option<i64>,
    pub contact_id: Option<i64>,
    /// Igualdade exata; acha as duas pernas de uma transferência
    pub reference: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
