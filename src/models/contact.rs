// src/models/contact.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::validation::invalid;
use crate::models::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Vendor,   // Fornecedor: recebe bills
    Customer, // Cliente: recebe invoices
}

impl ContactType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "vendor" => Some(ContactType::Vendor),
            "customer" => Some(ContactType::Customer),
            _ => None,
        }
    }
}

fn validate_contact_type(value: &str) -> Result<(), ValidationError> {
    ContactType::parse(value)
        .map(|_| ())
        .ok_or_else(|| invalid("one_of", "type must be one of: vendor, customer"))
}

/// Fornecedor ou cliente, com o saldo em aberto calculado na leitura.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: ContactType,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Soma das bills (fornecedor) ou invoices (cliente)
    pub total_amount: Money,
    /// Soma das alocações contra esses documentos
    pub allocated_amount: Money,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ContactInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_contact_type"))]
    #[schema(example = "vendor")]
    pub kind: String,

    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInput {
    pub fn contact_type(&self) -> Option<ContactType> {
        ContactType::parse(&self.kind)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactFilter {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Busca em nome, e-mail e telefone
    pub search: Option<String>,
}
