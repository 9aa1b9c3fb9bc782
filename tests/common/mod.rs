#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;

use accounting::{
    common::clock::FixedClock,
    config::AppState,
    db::MIGRATOR,
    models::{
        account::{Account, AccountInput},
        allocation::LinkInput,
        bill::{Bill, BillInput},
        contact::{Contact, ContactInput},
        invoice::{Invoice, InvoiceInput},
        money::Money,
        payout::{Payout, PayoutInput},
        transaction::{Transaction, TransactionInput},
    },
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
}

/// Estado completo sobre um SQLite em memória com as migrações aplicadas.
/// Uma conexão só: o banco em memória vive enquanto ela estiver aberta.
pub async fn app_state() -> AppState {
    app_state_with_timeout(Duration::from_secs(30)).await
}

pub async fn app_state_with_timeout(request_timeout: Duration) -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();

    AppState::from_pool(pool, Arc::new(FixedClock(fixed_now())), request_timeout)
}

pub fn money(minor: i64) -> Money {
    Money::from_minor(minor)
}

pub async fn account(state: &AppState, name: &str) -> Account {
    state
        .account_service
        .create(AccountInput {
            name: name.into(),
            kind: "bank".into(),
            opening_balance: Money::ZERO,
        })
        .await
        .unwrap()
}

pub async fn contact(state: &AppState, name: &str, kind: &str) -> Contact {
    state
        .contact_service
        .create(ContactInput {
            name: name.into(),
            kind: kind.into(),
            email: None,
            phone: None,
        })
        .await
        .unwrap()
}

pub fn bill_input(amount: i64) -> BillInput {
    BillInput {
        contact_id: None,
        bill_number: String::new(),
        issue_date: None,
        due_date: None,
        amount: money(amount),
        status: String::new(),
        file_url: None,
        notes: None,
    }
}

pub async fn bill(state: &AppState, amount: i64) -> Bill {
    state.bill_service.create(bill_input(amount)).await.unwrap()
}

pub fn invoice_input(amount: i64) -> InvoiceInput {
    InvoiceInput {
        contact_id: None,
        invoice_number: String::new(),
        issue_date: None,
        due_date: None,
        amount: money(amount),
        status: String::new(),
        file_url: None,
        notes: None,
    }
}

pub async fn invoice(state: &AppState, amount: i64) -> Invoice {
    state.invoice_service.create(invoice_input(amount)).await.unwrap()
}

pub fn payout_input(outlet: &str, platform: &str, final_amount: i64) -> PayoutInput {
    PayoutInput {
        outlet_name: outlet.into(),
        platform: platform.into(),
        period_start: None,
        period_end: None,
        settlement_date: None,
        total_orders: 0,
        gross_sales_amt: Money::ZERO,
        restaurant_discount_amt: Money::ZERO,
        platform_commission_amt: Money::ZERO,
        taxes_tcs_tds_amt: Money::ZERO,
        marketing_ads_amt: Money::ZERO,
        final_payout_amt: money(final_amount),
        utr_number: String::new(),
    }
}

pub async fn payout(state: &AppState, final_amount: i64) -> Payout {
    state
        .payout_service
        .create(payout_input("Koramangala", "swiggy", final_amount))
        .await
        .unwrap()
}

pub fn transaction_input(account_id: i64, kind: &str, amount: i64) -> TransactionInput {
    TransactionInput {
        account_id,
        kind: kind.into(),
        amount: money(amount),
        transaction_date: None,
        description: None,
        reference: None,
        transfer_account_id: None,
        contact_id: None,
    }
}

pub async fn transaction(state: &AppState, account_id: i64, kind: &str, amount: i64) -> Transaction {
    state
        .transaction_service
        .create(transaction_input(account_id, kind, amount))
        .await
        .unwrap()
}

pub fn link_input(document_type: &str, document_id: i64, amount: i64) -> LinkInput {
    LinkInput {
        document_type: document_type.into(),
        document_id,
        amount: money(amount),
    }
}
