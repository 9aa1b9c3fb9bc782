mod common;

use accounting::models::{money::Money, transaction::TransactionType};
use common::*;

#[tokio::test]
async fn empty_store_gives_zeroed_summary() {
    let state = app_state().await;

    let summary = state.dashboard_service.get_summary().await.unwrap();
    assert_eq!(summary.total_accounts, 0);
    assert_eq!(summary.total_transactions, 0);
    assert_eq!(summary.bills_payable, Money::ZERO);
    assert_eq!(summary.payouts_received, Money::ZERO);
    assert!(summary.recent_transactions.is_empty());
}

#[tokio::test]
async fn summary_reflects_open_amounts_and_recent_activity() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    contact(&state, "Dairy Co", "vendor").await;

    let rent = bill(&state, 30000).await;
    bill(&state, 5000).await;
    let mut cancelled = bill_input(99999);
    cancelled.status = "cancelled".into();
    state.bill_service.create(cancelled).await.unwrap();

    let mut late = invoice_input(8000);
    late.status = "overdue".into();
    state.invoice_service.create(late).await.unwrap();

    payout(&state, 12000).await;
    payout(&state, 3000).await;

    let payment = transaction(&state, bank.id, "expense", 10000).await;
    state
        .ledger_service
        .link(payment.id, link_input("bill", rent.id, 10000))
        .await
        .unwrap();
    for amount in [100, 200, 300, 400, 500] {
        transaction(&state, bank.id, "income", amount).await;
    }

    let summary = state.dashboard_service.get_summary().await.unwrap();
    assert_eq!(summary.total_accounts, 1);
    assert_eq!(summary.total_contacts, 1);
    assert_eq!(summary.total_bills, 3);
    assert_eq!(summary.total_invoices, 1);
    assert_eq!(summary.total_payouts, 2);
    assert_eq!(summary.total_transactions, 6);

    // 20000 em aberto na bill parcial + 5000 na outra; a cancelada fica de fora
    assert_eq!(summary.bills_payable, money(25000));
    assert_eq!(summary.invoices_receivable, money(8000));
    assert_eq!(summary.payouts_received, money(15000));
    assert_eq!(summary.overdue_bills, 0);
    assert_eq!(summary.overdue_invoices, 1);

    assert_eq!(summary.recent_transactions.len(), 5);
    assert_eq!(summary.recent_transactions[0].amount, money(500));
    assert!(summary
        .recent_transactions
        .iter()
        .all(|t| t.kind == TransactionType::Income));
    assert_eq!(
        summary.recent_transactions[0].account_name.as_deref(),
        Some("HDFC")
    );
}
