// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{money::Money, transaction::TransactionType};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub total_accounts: i64,
    pub total_contacts: i64,
    pub total_bills: i64,
    pub total_invoices: i64,
    pub total_payouts: i64,
    pub total_transactions: i64,

    /// Em aberto nas bills que não estão pagas nem canceladas
    pub bills_payable: Money,
    /// Em aberto nas invoices que não estão pagas, recebidas nem canceladas
    pub invoices_receivable: Money,
    /// Soma de final_payout_amt
    pub payouts_received: Money,

    pub overdue_bills: i64,
    pub overdue_invoices: i64,

    pub recent_transactions: Vec<RecentTransaction>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RecentTransaction {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Money,
    pub transaction_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub account_name: Option<String>,
}
