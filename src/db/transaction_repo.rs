// src/db/transaction_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    db::{map_fk_violation, push_condition},
    models::{
        money::Money,
        transaction::{Transaction, TransactionFilter, TransactionType},
    },
};

const SELECT_TRANSACTION: &str = r#"
    SELECT t.*, t.amount - t.allocated AS unallocated
    FROM (
        SELECT tx.id, tx.account_id, tx.type, tx.amount, tx.transaction_date, tx.description,
               tx.reference, tx.transfer_account_id, tx.contact_id, tx.created_at, tx.updated_at,
               a.name AS account_name,
               ta.name AS transfer_account_name,
               ct.name AS contact_name,
               COALESCE((
                   SELECT SUM(l.amount) FROM allocation_links l WHERE l.transaction_id = tx.id
               ), 0) AS allocated
        FROM transactions tx
        LEFT JOIN accounts a ON a.id = tx.account_id
        LEFT JOIN accounts ta ON ta.id = tx.transfer_account_id
        LEFT JOIN contacts ct ON ct.id = tx.contact_id
    ) AS t
"#;

const UNKNOWN_REFERENCE: &str = "account_id, transfer_account_id or contact_id does not exist";

/// Colunas gravadas de uma movimentação (uma perna, no caso de transferência).
#[derive(Debug, Clone)]
pub struct NewTransaction<'a> {
    pub account_id: i64,
    pub kind: TransactionType,
    pub amount: Money,
    pub transaction_date: Option<NaiveDate>,
    pub description: Option<&'a str>,
    pub reference: Option<&'a str>,
    pub transfer_account_id: Option<i64>,
    pub contact_id: Option<i64>,
}

#[derive(Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_TRANSACTION);
        let mut has_where = false;

        if let Some(kind) = filter.kind.as_deref().filter(|s| !s.is_empty()) {
            push_condition(&mut qb, &mut has_where);
            qb.push("t.type = ").push_bind(kind.to_string());
        }
        if let Some(account_id) = filter.account_id {
            push_condition(&mut qb, &mut has_where);
            qb.push("t.account_id = ").push_bind(account_id);
        }
        if let Some(contact_id) = filter.contact_id {
            push_condition(&mut qb, &mut has_where);
            qb.push("t.contact_id = ").push_bind(contact_id);
        }
        if let Some(reference) = filter.reference.as_deref().filter(|s| !s.is_empty()) {
            push_condition(&mut qb, &mut has_where);
            qb.push("t.reference = ").push_bind(reference.to_string());
        }
        if let Some(from) = filter.from {
            push_condition(&mut qb, &mut has_where);
            qb.push("t.transaction_date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            push_condition(&mut qb, &mut has_where);
            qb.push("t.transaction_date <= ").push_bind(to);
        }

        qb.push(" ORDER BY t.created_at DESC, t.id DESC");

        let transactions = qb
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?;
        Ok(transactions)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Transaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{} WHERE t.id = ?", SELECT_TRANSACTION);
        let transaction = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(transaction)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        row: &NewTransaction<'_>,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (
                account_id, type, amount, transaction_date, description, reference,
                transfer_account_id, contact_id, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.account_id)
        .bind(row.kind)
        .bind(row.amount)
        .bind(row.transaction_date)
        .bind(row.description)
        .bind(row.reference)
        .bind(row.transfer_account_id)
        .bind(row.contact_id)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await
        .map_err(|e| map_fk_violation(e, UNKNOWN_REFERENCE))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        row: &NewTransaction<'_>,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET account_id = ?, type = ?, amount = ?, transaction_date = ?, description = ?,
                reference = ?, transfer_account_id = ?, contact_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(row.account_id)
        .bind(row.kind)
        .bind(row.amount)
        .bind(row.transaction_date)
        .bind(row.description)
        .bind(row.reference)
        .bind(row.transfer_account_id)
        .bind(row.contact_id)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| map_fk_violation(e, UNKNOWN_REFERENCE))?;

        Ok(result.rows_affected())
    }

    /// Segunda fase da transferência: grava a referência derivada do id.
    pub async fn set_reference<'e, E>(
        &self,
        executor: E,
        id: i64,
        reference: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE transactions SET reference = ? WHERE id = ?")
            .bind(reference)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // As alocações caem junto (ON DELETE CASCADE).
    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
