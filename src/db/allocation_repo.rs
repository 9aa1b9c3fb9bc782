// src/db/allocation_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::{
        allocation::{AllocationLink, Capacity, DocumentLink, DocumentType},
        money::Money,
    },
};

// Tabela e coluna de valor alocável de cada tipo de documento.
fn document_source(document_type: DocumentType) -> (&'static str, &'static str) {
    match document_type {
        DocumentType::Bill => ("bills", "amount"),
        DocumentType::Invoice => ("invoices", "amount"),
        DocumentType::Payout => ("payouts", "final_payout_amt"),
    }
}

#[derive(Clone)]
pub struct AllocationRepository {
    pool: SqlitePool,
}

impl AllocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CAPACIDADE (tetos de alocação)
    // =========================================================================

    pub async fn transaction_capacity<'e, E>(
        &self,
        executor: E,
        transaction_id: i64,
    ) -> Result<Option<Capacity>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let capacity = sqlx::query_as::<_, Capacity>(
            r#"
            SELECT t.amount,
                   COALESCE((
                       SELECT SUM(l.amount) FROM allocation_links l WHERE l.transaction_id = t.id
                   ), 0) AS allocated
            FROM transactions t
            WHERE t.id = ?
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(executor)
        .await?;

        Ok(capacity)
    }

    /// `None` quando o documento não existe.
    pub async fn document_capacity<'e, E>(
        &self,
        executor: E,
        document_type: DocumentType,
        document_id: i64,
    ) -> Result<Option<Capacity>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let (table, amount_column) = document_source(document_type);
        let sql = format!(
            r#"
            SELECT d.{amount_column} AS amount,
                   COALESCE((
                       SELECT SUM(l.amount)
                       FROM allocation_links l
                       WHERE l.document_type = ? AND l.document_id = d.id
                   ), 0) AS allocated
            FROM {table} d
            WHERE d.id = ?
            "#
        );

        let capacity = sqlx::query_as::<_, Capacity>(&sql)
            .bind(document_type)
            .bind(document_id)
            .fetch_optional(executor)
            .await?;

        Ok(capacity)
    }

    // =========================================================================
    //  VÍNCULOS
    // =========================================================================

    pub async fn create<'e, E>(
        &self,
        executor: E,
        transaction_id: i64,
        document_type: DocumentType,
        document_id: i64,
        amount: Money,
        now: DateTime<Utc>,
    ) -> Result<AllocationLink, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO allocation_links (transaction_id, document_type, document_id, amount, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction_id)
        .bind(document_type)
        .bind(document_id)
        .bind(amount)
        .bind(now)
        .execute(executor)
        .await?;

        Ok(AllocationLink {
            id: result.last_insert_rowid(),
            transaction_id,
            document_type,
            document_id,
            amount,
            created_at: now,
        })
    }

    /// Busca um vínculo só se ele pertencer à movimentação informada.
    pub async fn find<'e, E>(
        &self,
        executor: E,
        transaction_id: i64,
        link_id: i64,
    ) -> Result<Option<AllocationLink>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let link = sqlx::query_as::<_, AllocationLink>(
            r#"
            SELECT id, transaction_id, document_type, document_id, amount, created_at
            FROM allocation_links
            WHERE id = ? AND transaction_id = ?
            "#,
        )
        .bind(link_id)
        .bind(transaction_id)
        .fetch_optional(executor)
        .await?;

        Ok(link)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        transaction_id: i64,
        link_id: i64,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM allocation_links WHERE id = ? AND transaction_id = ?")
            .bind(link_id)
            .bind(transaction_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_for_document<'e, E>(
        &self,
        executor: E,
        document_type: DocumentType,
        document_id: i64,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "DELETE FROM allocation_links WHERE document_type = ? AND document_id = ?",
        )
        .bind(document_type)
        .bind(document_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_for_transaction<'e, E>(
        &self,
        executor: E,
        transaction_id: i64,
    ) -> Result<Vec<AllocationLink>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let links = sqlx::query_as::<_, AllocationLink>(
            r#"
            SELECT id, transaction_id, document_type, document_id, amount, created_at
            FROM allocation_links
            WHERE transaction_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(transaction_id)
        .fetch_all(executor)
        .await?;

        Ok(links)
    }

    /// Vínculos vistos do lado do documento, com dados da movimentação e da conta.
    pub async fn list_for_document(
        &self,
        document_type: DocumentType,
        document_id: i64,
    ) -> Result<Vec<DocumentLink>, AppError> {
        let links = sqlx::query_as::<_, DocumentLink>(
            r#"
            SELECT l.id, l.transaction_id, l.amount, l.created_at,
                   t.transaction_date, t.description, t.reference,
                   a.name AS account_name
            FROM allocation_links l
            JOIN transactions t ON t.id = l.transaction_id
            LEFT JOIN accounts a ON a.id = t.account_id
            WHERE l.document_type = ? AND l.document_id = ?
            ORDER BY l.created_at ASC, l.id ASC
            "#,
        )
        .bind(document_type)
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }
}
