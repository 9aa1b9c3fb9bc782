mod common;

use chrono::NaiveDate;

use accounting::{
    common::error::{AppError, EntityKind},
    models::{
        account::{AccountFilter, AccountInput, AccountType},
        bill::{BillFilter, BillStatus},
        contact::ContactFilter,
        invoice::InvoiceStatus,
        money::Money,
        payout::{PayoutFilter, Platform},
        transaction::TransactionFilter,
    },
};
use common::*;

#[tokio::test]
async fn account_round_trip_and_balance() {
    let state = app_state().await;

    let created = state
        .account_service
        .create(AccountInput {
            name: "Axis Credit".into(),
            kind: "credit_card".into(),
            opening_balance: money(150000),
        })
        .await
        .unwrap();
    assert_eq!(created.kind, AccountType::CreditCard);
    assert_eq!(created.balance, money(150000));
    assert_eq!(created.created_at, fixed_now());

    transaction(&state, created.id, "income", 5000).await;
    transaction(&state, created.id, "expense", 2000).await;

    let fetched = state.account_service.get(created.id).await.unwrap();
    assert_eq!(fetched.balance, money(153000));

    let updated = state
        .account_service
        .update(
            created.id,
            AccountInput {
                name: "Axis Platinum".into(),
                kind: "credit_card".into(),
                opening_balance: Money::ZERO,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Axis Platinum");
    assert_eq!(updated.balance, money(3000));
}

#[tokio::test]
async fn account_with_transactions_cannot_be_deleted() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    transaction(&state, bank.id, "income", 100).await;

    let err = state.account_service.delete(bank.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let empty = account(&state, "Unused").await;
    state.account_service.delete(empty.id).await.unwrap();
    let err = state.account_service.get(empty.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Account)));
}

#[tokio::test]
async fn accounts_are_listed_by_name_and_searchable() {
    let state = app_state().await;
    account(&state, "Zeta Bank").await;
    account(&state, "Alpha Cash").await;
    account(&state, "Mid Bank").await;

    let names: Vec<String> = state
        .account_service
        .list(&AccountFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Alpha Cash", "Mid Bank", "Zeta Bank"]);

    let banks = state
        .account_service
        .list(&AccountFilter { search: Some("Bank".into()) })
        .await
        .unwrap();
    assert_eq!(banks.len(), 2);
}

#[tokio::test]
async fn invalid_account_type_is_rejected() {
    let state = app_state().await;

    let err = state
        .account_service
        .create(AccountInput {
            name: "Wallet".into(),
            kind: "crypto".into(),
            opening_balance: Money::ZERO,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::ValidationError(_) | AppError::InvalidInput(_)
    ));
}

#[tokio::test]
async fn bill_round_trip_starts_unallocated() {
    let state = app_state().await;
    let vendor = contact(&state, "Fresh Farms", "vendor").await;

    let mut input = bill_input(12500);
    input.contact_id = Some(vendor.id);
    input.bill_number = "FF-001".into();
    input.issue_date = NaiveDate::from_ymd_opt(2025, 1, 3);

    let created = state.bill_service.create(input).await.unwrap();
    assert_eq!(created.status, BillStatus::Draft);
    assert_eq!(created.allocated, Money::ZERO);
    assert_eq!(created.unallocated, money(12500));
    assert_eq!(created.contact_name.as_deref(), Some("Fresh Farms"));

    let mut change = bill_input(15000);
    change.bill_number = "FF-001A".into();
    let updated = state.bill_service.update(created.id, change).await.unwrap();
    assert_eq!(updated.amount, money(15000));
    assert_eq!(updated.bill_number, "FF-001A");
    assert_eq!(updated.contact_id, None);

    state.bill_service.delete(created.id).await.unwrap();
    let err = state.bill_service.get(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Bill)));
}

#[tokio::test]
async fn missing_records_are_not_found_on_every_operation() {
    let state = app_state().await;

    let err = state.bill_service.get(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Bill)));
    let err = state.bill_service.update(404, bill_input(100)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Bill)));
    let err = state.bill_service.delete(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Bill)));

    let err = state.invoice_service.delete(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Invoice)));
    let err = state.payout_service.get(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Payout)));
    let err = state.contact_service.delete(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Contact)));
    let err = state.transaction_service.delete(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Transaction)));
    let err = state
        .transaction_service
        .update(404, transaction_input(1, "income", 100))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Transaction)));
}

#[tokio::test]
async fn bill_with_unknown_contact_is_invalid_input() {
    let state = app_state().await;

    let mut input = bill_input(100);
    input.contact_id = Some(77);
    let err = state.bill_service.create(input).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn bills_filter_by_status_and_search() {
    let state = app_state().await;
    let vendor = contact(&state, "Metro Wholesale", "vendor").await;

    let mut first = bill_input(1000);
    first.bill_number = "MW-17".into();
    first.contact_id = Some(vendor.id);
    let first = state.bill_service.create(first).await.unwrap();

    let mut second = bill_input(2000);
    second.status = "overdue".into();
    second.notes = Some("gas cylinder refill".into());
    let second = state.bill_service.create(second).await.unwrap();

    let overdue = state
        .bill_service
        .list(&BillFilter {
            status: Some("overdue".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, second.id);

    let by_contact_name = state
        .bill_service
        .list(&BillFilter {
            search: Some("Metro".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_contact_name.len(), 1);
    assert_eq!(by_contact_name[0].id, first.id);

    let by_notes = state
        .bill_service
        .list(&BillFilter {
            search: Some("cylinder".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_notes[0].id, second.id);

    // Mais recente primeiro
    let all = state.bill_service.list(&BillFilter::default()).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn invalid_status_is_rejected() {
    let state = app_state().await;

    let mut input = bill_input(100);
    input.status = "sent".into();
    assert!(state.bill_service.create(input).await.is_err());

    let mut input = invoice_input(100);
    input.status = "sent".into();
    let sent = state.invoice_service.create(input).await.unwrap();
    assert_eq!(sent.status, InvoiceStatus::Sent);
}

#[tokio::test]
async fn payouts_filter_by_platform_case_insensitively() {
    let state = app_state().await;

    state
        .payout_service
        .create(payout_input("Indiranagar", "Zomato", 30000))
        .await
        .unwrap();
    state
        .payout_service
        .create(payout_input("Indiranagar", "swiggy", 20000))
        .await
        .unwrap();

    let zomato = state
        .payout_service
        .list(&PayoutFilter {
            platform: Some("ZOMATO".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(zomato.len(), 1);
    assert_eq!(zomato[0].platform, Platform::Zomato);
    assert_eq!(zomato[0].unallocated, money(30000));

    let err = state
        .payout_service
        .create(payout_input("Indiranagar", "ubereats", 100))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::ValidationError(_) | AppError::InvalidInput(_)
    ));
}

#[tokio::test]
async fn contact_balance_tracks_documents_and_allocations() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    let vendor = contact(&state, "Dairy Co", "vendor").await;
    let customer = contact(&state, "Catering Client", "customer").await;

    let mut input = bill_input(10000);
    input.contact_id = Some(vendor.id);
    let milk = state.bill_service.create(input).await.unwrap();

    let mut input = invoice_input(40000);
    input.contact_id = Some(customer.id);
    state.invoice_service.create(input).await.unwrap();

    let payment = transaction(&state, bank.id, "expense", 4000).await;
    state
        .ledger_service
        .link(payment.id, link_input("bill", milk.id, 4000))
        .await
        .unwrap();

    let vendor = state.contact_service.get(vendor.id).await.unwrap();
    assert_eq!(vendor.total_amount, money(10000));
    assert_eq!(vendor.allocated_amount, money(4000));
    assert_eq!(vendor.balance, money(6000));

    let customer = state.contact_service.get(customer.id).await.unwrap();
    assert_eq!(customer.total_amount, money(40000));
    assert_eq!(customer.balance, money(40000));

    let vendors = state
        .contact_service
        .list(&ContactFilter {
            kind: Some("vendor".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(vendors.len(), 1);
}

#[tokio::test]
async fn transactions_filter_by_type_and_account() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    let cash = account(&state, "Cash").await;

    transaction(&state, bank.id, "income", 100).await;
    transaction(&state, bank.id, "expense", 200).await;
    let last = transaction(&state, cash.id, "expense", 300).await;

    let expenses = state
        .transaction_service
        .list(&TransactionFilter {
            kind: Some("expense".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].id, last.id);

    let on_bank = state
        .transaction_service
        .list(&TransactionFilter {
            account_id: Some(bank.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(on_bank.len(), 2);
    assert!(on_bank.iter().all(|t| t.account_name.as_deref() == Some("HDFC")));
}

#[tokio::test]
async fn reads_do_not_change_anything() {
    let state = app_state().await;
    let rent = bill(&state, 5000).await;

    let first = state.bill_service.get(rent.id).await.unwrap();
    let second = state.bill_service.get(rent.id).await.unwrap();
    assert_eq!(first, second);

    let listed = state.bill_service.list(&BillFilter::default()).await.unwrap();
    assert_eq!(listed, vec![first]);
}

#[tokio::test]
async fn oversized_amounts_are_rejected_and_balances_stay_readable() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;

    let err = state
        .transaction_service
        .create(transaction_input(bank.id, "income", i64::MAX / 2))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = state
        .account_service
        .create(AccountInput {
            name: "Vault".into(),
            kind: "cash".into(),
            opening_balance: money(i64::MAX),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    transaction(&state, bank.id, "income", Money::MAX_ENTRY.minor()).await;
    transaction(&state, bank.id, "income", Money::MAX_ENTRY.minor()).await;

    let accounts = state.account_service.list(&AccountFilter::default()).await.unwrap();
    assert_eq!(accounts[0].balance, money(2 * Money::MAX_ENTRY.minor()));
}
