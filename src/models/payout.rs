// src/models/payout.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::validation::{invalid, validate_bounded, validate_not_negative};
use crate::models::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Swiggy,
    Zomato,
}

impl Platform {
    /// Aceita qualquer caixa ("Swiggy", "ZOMATO", ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "swiggy" => Some(Platform::Swiggy),
            "zomato" => Some(Platform::Zomato),
            _ => None,
        }
    }
}

fn validate_platform(value: &str) -> Result<(), ValidationError> {
    Platform::parse(value)
        .map(|_| ())
        .ok_or_else(|| invalid("one_of", "platform must be swiggy or zomato"))
}

/// Repasse de plataforma de delivery. Não tem status: só é alocado.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Payout {
    pub id: i64,
    pub outlet_name: String,
    pub platform: Platform,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub settlement_date: Option<NaiveDate>,
    pub total_orders: i64,
    pub gross_sales_amt: Money,
    pub restaurant_discount_amt: Money,
    pub platform_commission_amt: Money,
    pub taxes_tcs_tds_amt: Money,
    pub marketing_ads_amt: Money,
    /// Valor que efetivamente cai na conta; é o teto das alocações.
    pub final_payout_amt: Money,
    pub utr_number: String,
    pub created_at: DateTime<Utc>,
    pub allocated: Money,
    pub unallocated: Money,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PayoutInput {
    #[validate(length(min = 1, message = "outlet_name is required"))]
    pub outlet_name: String,

    #[validate(custom(function = "validate_platform"))]
    #[schema(example = "Swiggy")]
    pub platform: String,

    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub settlement_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    #[validate(custom(function = "validate_bounded"))]
    pub gross_sales_amt: Money,
    #[serde(default)]
    #[validate(custom(function = "validate_bounded"))]
    pub restaurant_discount_amt: Money,
    #[serde(default)]
    #[validate(custom(function = "validate_bounded"))]
    pub platform_commission_amt: Money,
    #[serde(default)]
    #[validate(custom(function = "validate_bounded"))]
    pub taxes_tcs_tds_amt: Money,
    #[serde(default)]
    #[validate(custom(function = "validate_bounded"))]
    pub marketing_ads_amt: Money,
    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub final_payout_amt: Money,
    #[serde(default)]
    pub utr_number: String,
}

impl PayoutInput {
    pub fn platform(&self) -> Option<Platform> {
        Platform::parse(&self.platform)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PayoutFilter {
    /// Sem diferenciar maiúsculas
    pub platform: Option<String>,
    pub outlet_name: Option<String>,
    /// settlement_date >= from
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_is_case_insensitive_and_stored_lowercase() {
        let input: PayoutInput =
            serde_json::from_str(r#"{"outlet_name":"Koramangala","platform":"ZOMATO"}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.platform(), Some(Platform::Zomato));
        assert_eq!(serde_json::to_string(&Platform::Zomato).unwrap(), r#""zomato""#);
    }

    #[test]
    fn unknown_platform_and_missing_outlet_fail() {
        let input: PayoutInput =
            serde_json::from_str(r#"{"outlet_name":"","platform":"ubereats"}"#).unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("outlet_name"));
        assert!(fields.contains_key("platform"));
    }

    #[test]
    fn final_payout_cannot_be_negative() {
        let input: PayoutInput = serde_json::from_str(
            r#"{"outlet_name":"HSR","platform":"swiggy","final_payout_amt":-100}"#,
        )
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("final_payout_amt"));
    }
}
