// src/db/dashboard_repo.rs

use sqlx::{Acquire, Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::{
        dashboard::{DashboardSummary, RecentTransaction},
        money::Money,
    },
};

#[derive(Clone, Default)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_summary<'e, E>(&self, executor: E) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        // Uma transação só de leitura: todos os números saem do mesmo snapshot.
        let mut tx = executor.begin().await?;

        let count = |table: &'static str| format!("SELECT COUNT(*) FROM {}", table);

        let total_accounts: i64 = sqlx::query_scalar(&count("accounts")).fetch_one(&mut *tx).await?;
        let total_contacts: i64 = sqlx::query_scalar(&count("contacts")).fetch_one(&mut *tx).await?;
        let total_bills: i64 = sqlx::query_scalar(&count("bills")).fetch_one(&mut *tx).await?;
        let total_invoices: i64 = sqlx::query_scalar(&count("invoices")).fetch_one(&mut *tx).await?;
        let total_payouts: i64 = sqlx::query_scalar(&count("payouts")).fetch_one(&mut *tx).await?;
        let total_transactions: i64 =
            sqlx::query_scalar(&count("transactions")).fetch_one(&mut *tx).await?;

        // A. Em aberto a pagar
        let bills_payable: Money = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(b.amount - COALESCE((
                SELECT SUM(l.amount)
                FROM allocation_links l
                WHERE l.document_type = 'bill' AND l.document_id = b.id
            ), 0)), 0)
            FROM bills b
            WHERE b.status NOT IN ('paid', 'cancelled')
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // B. Em aberto a receber
        let invoices_receivable: Money = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(i.amount - COALESCE((
                SELECT SUM(l.amount)
                FROM allocation_links l
                WHERE l.document_type = 'invoice' AND l.document_id = i.id
            ), 0)), 0)
            FROM invoices i
            WHERE i.status NOT IN ('paid', 'received', 'cancelled')
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // C. Repasses
        let payouts_received: Money =
            sqlx::query_scalar("SELECT COALESCE(SUM(final_payout_amt), 0) FROM payouts")
                .fetch_one(&mut *tx)
                .await?;

        let overdue_bills: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bills WHERE status = 'overdue'")
                .fetch_one(&mut *tx)
                .await?;
        let overdue_invoices: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE status = 'overdue'")
                .fetch_one(&mut *tx)
                .await?;

        // D. Últimas 5 movimentações
        let recent_transactions = sqlx::query_as::<_, RecentTransaction>(
            r#"
            SELECT t.id, t.type, t.amount, t.transaction_date, t.description,
                   a.name AS account_name
            FROM transactions t
            LEFT JOIN accounts a ON a.id = t.account_id
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            total_accounts,
            total_contacts,
            total_bills,
            total_invoices,
            total_payouts,
            total_transactions,
            bills_payable,
            invoices_receivable,
            payouts_received,
            overdue_bills,
            overdue_invoices,
            recent_transactions,
        })
    }
}
