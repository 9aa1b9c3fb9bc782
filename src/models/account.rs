// src/models/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::validation::{invalid, validate_bounded};
use crate::models::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Bank,
    Cash,
    CreditCard,
}

impl AccountType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bank" => Some(AccountType::Bank),
            "cash" => Some(AccountType::Cash),
            "credit_card" => Some(AccountType::CreditCard),
            _ => None,
        }
    }
}

fn validate_account_type(value: &str) -> Result<(), ValidationError> {
    AccountType::parse(value)
        .map(|_| ())
        .ok_or_else(|| invalid("one_of", "type must be one of: bank, cash, credit_card"))
}

/// Conta bancária, caixa ou cartão. `balance` é calculado na leitura.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Account {
    pub id: i64,
    #[schema(example = "HDFC Current")]
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: AccountType,
    pub opening_balance: Money,
    /// opening_balance + entradas - saídas
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AccountInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_account_type"))]
    #[schema(example = "bank")]
    pub kind: String,

    #[serde(default)]
    #[validate(custom(function = "validate_bounded"))]
    pub opening_balance: Money,
}

impl AccountInput {
    /// Tipo já convertido. Só chame depois de `validate()`.
    pub fn account_type(&self) -> Option<AccountType> {
        AccountType::parse(&self.kind)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountFilter {
    /// Busca por nome (LIKE)
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_type_and_empty_name() {
        let input = AccountInput {
            name: String::new(),
            kind: "wallet".into(),
            opening_balance: Money::ZERO,
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("kind"));
    }

    #[test]
    fn accepts_credit_card() {
        let input: AccountInput = serde_json::from_str(
            r#"{"name":"Amex","type":"credit_card","opening_balance":-5000}"#,
        )
        .unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.account_type(), Some(AccountType::CreditCard));
    }

    #[test]
    fn opening_balance_has_a_ceiling() {
        let input: AccountInput = serde_json::from_str(
            r#"{"name":"Vault","type":"cash","opening_balance":9000000000000000000}"#,
        )
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("opening_balance"));
    }
}
