mod common;

use accounting::{
    common::error::AppError,
    models::{
        money::Money,
        transaction::{TransactionFilter, TransactionInput, TransactionType},
    },
};
use common::*;

fn transfer_input(from: i64, to: i64, amount: i64) -> TransactionInput {
    let mut input = transaction_input(from, "transfer", amount);
    input.transfer_account_id = Some(to);
    input
}

#[tokio::test]
async fn transfer_creates_mirrored_legs_with_generated_reference() {
    let state = app_state().await;
    let bank = account(&state, "HDFC Current").await;
    let cash = account(&state, "Petty Cash").await;

    let expense = state
        .transaction_service
        .create(transfer_input(bank.id, cash.id, 20000))
        .await
        .unwrap();

    assert_eq!(expense.kind, TransactionType::Expense);
    assert_eq!(expense.account_id, bank.id);
    assert_eq!(expense.transfer_account_id, Some(cash.id));
    let reference = format!("TRF-{}", expense.id);
    assert_eq!(expense.reference.as_deref(), Some(reference.as_str()));

    let legs = state
        .transaction_service
        .list(&TransactionFilter {
            reference: Some(reference.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(legs.len(), 2);

    let income = legs
        .iter()
        .find(|t| t.kind == TransactionType::Income)
        .unwrap();
    assert_eq!(income.account_id, cash.id);
    assert_eq!(income.transfer_account_id, Some(bank.id));
    assert_eq!(income.amount, money(20000));

    // Saldos: a origem perde, o destino ganha
    assert_eq!(state.account_service.get(bank.id).await.unwrap().balance, money(-20000));
    assert_eq!(state.account_service.get(cash.id).await.unwrap().balance, money(20000));
}

#[tokio::test]
async fn supplied_reference_is_kept_on_both_legs() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    let card = account(&state, "Amex").await;

    let mut input = transfer_input(bank.id, card.id, 5000);
    input.reference = Some("CC-PAY-MARCH".into());
    let expense = state.transaction_service.create(input).await.unwrap();
    assert_eq!(expense.reference.as_deref(), Some("CC-PAY-MARCH"));

    let legs = state
        .transaction_service
        .list(&TransactionFilter {
            reference: Some("CC-PAY-MARCH".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(legs.len(), 2);
}

#[tokio::test]
async fn empty_reference_counts_as_absent() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    let cash = account(&state, "Cash").await;

    let mut input = transfer_input(bank.id, cash.id, 100);
    input.reference = Some(String::new());
    let expense = state.transaction_service.create(input).await.unwrap();

    assert_eq!(expense.reference, Some(format!("TRF-{}", expense.id)));
}

#[tokio::test]
async fn deleting_one_leg_leaves_the_other() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    let cash = account(&state, "Cash").await;

    let expense = state
        .transaction_service
        .create(transfer_input(bank.id, cash.id, 7500))
        .await
        .unwrap();

    state.transaction_service.delete(expense.id).await.unwrap();

    let remaining = state
        .transaction_service
        .list(&TransactionFilter {
            reference: expense.reference.clone(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].kind, TransactionType::Income);
    assert_eq!(state.account_service.get(bank.id).await.unwrap().balance, Money::ZERO);
    assert_eq!(state.account_service.get(cash.id).await.unwrap().balance, money(7500));
}

#[tokio::test]
async fn transfer_legs_are_independent_allocation_targets() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    let cash = account(&state, "Cash").await;

    let expense = state
        .transaction_service
        .create(transfer_input(bank.id, cash.id, 3000))
        .await
        .unwrap();
    let rent = bill(&state, 3000).await;

    state
        .ledger_service
        .link(expense.id, link_input("bill", rent.id, 3000))
        .await
        .unwrap();

    let income = state
        .transaction_service
        .list(&TransactionFilter {
            kind: Some("income".into()),
            ..Default::default()
        })
        .await
        .unwrap()
        .remove(0);
    assert_eq!(income.unallocated, money(3000));
}

#[tokio::test]
async fn transfer_to_same_or_missing_account_is_rejected() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;

    let err = state
        .transaction_service
        .create(transfer_input(bank.id, bank.id, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = state
        .transaction_service
        .create(transaction_input(bank.id, "transfer", 100))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = state
        .transaction_service
        .create(transfer_input(bank.id, 9999, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    // Nada ficou gravado pela metade
    let all = state
        .transaction_service
        .list(&TransactionFilter::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn failure_on_the_income_leg_rolls_back_the_whole_transfer() {
    let state = app_state().await;
    let bank = account(&state, "HDFC").await;
    let cash = account(&state, "Cash").await;

    // A perna de saída e o patch da referência passam; a de entrada falha.
    sqlx::query(
        r#"
        CREATE TRIGGER reject_income BEFORE INSERT ON transactions
        WHEN NEW.type = 'income'
        BEGIN
            SELECT RAISE(ABORT, 'income rejected');
        END
        "#,
    )
    .execute(&state.db_pool)
    .await
    .unwrap();

    let result = state
        .transaction_service
        .create(transfer_input(bank.id, cash.id, 4200))
        .await;
    assert!(result.is_err());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(state.account_service.get(bank.id).await.unwrap().balance, Money::ZERO);
}
