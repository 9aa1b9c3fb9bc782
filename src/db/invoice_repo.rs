// src/db/invoice_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    db::{like_pattern, map_fk_violation, push_condition},
    models::invoice::{Invoice, InvoiceFilter, InvoiceInput, InvoiceStatus},
};

const SELECT_INVOICE: &str = r#"
    SELECT i.*, i.amount - i.allocated AS unallocated
    FROM (
        SELECT iv.id, iv.contact_id, iv.invoice_number, iv.issue_date, iv.due_date, iv.amount,
               iv.status, iv.file_url, iv.notes, iv.created_at, iv.updated_at,
               ct.name AS contact_name,
               COALESCE((
                   SELECT SUM(l.amount)
                   FROM allocation_links l
                   WHERE l.document_type = 'invoice' AND l.document_id = iv.id
               ), 0) AS allocated
        FROM invoices iv
        LEFT JOIN contacts ct ON ct.id = iv.contact_id
    ) AS i
"#;

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_INVOICE);
        let mut has_where = false;

        if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
            push_condition(&mut qb, &mut has_where);
            qb.push("i.status = ").push_bind(status.to_string());
        }
        if let Some(contact_id) = filter.contact_id {
            push_condition(&mut qb, &mut has_where);
            qb.push("i.contact_id = ").push_bind(contact_id);
        }
        if let Some(from) = filter.from {
            push_condition(&mut qb, &mut has_where);
            qb.push("i.issue_date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            push_condition(&mut qb, &mut has_where);
            qb.push("i.issue_date <= ").push_bind(to);
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = like_pattern(search);
            push_condition(&mut qb, &mut has_where);
            qb.push("(i.invoice_number LIKE ")
                .push_bind(pattern.clone())
                .push(" OR i.notes LIKE ")
                .push_bind(pattern.clone())
                .push(" OR i.contact_name LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY i.created_at DESC, i.id DESC");

        let invoices = qb.build_query_as::<Invoice>().fetch_all(&self.pool).await?;
        Ok(invoices)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{} WHERE i.id = ?", SELECT_INVOICE);
        let invoice = sqlx::query_as::<_, Invoice>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(invoice)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &InvoiceInput,
        status: InvoiceStatus,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO invoices (
                contact_id, invoice_number, issue_date, due_date, amount,
                status, file_url, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.contact_id)
        .bind(&input.invoice_number)
        .bind(input.issue_date)
        .bind(input.due_date)
        .bind(input.amount)
        .bind(status)
        .bind(&input.file_url)
        .bind(&input.notes)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await
        .map_err(|e| map_fk_violation(e, "contact_id does not exist"))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        input: &InvoiceInput,
        status: InvoiceStatus,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET contact_id = ?, invoice_number = ?, issue_date = ?, due_date = ?, amount = ?,
                status = ?, file_url = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.contact_id)
        .bind(&input.invoice_number)
        .bind(input.issue_date)
        .bind(input.due_date)
        .bind(input.amount)
        .bind(status)
        .bind(&input.file_url)
        .bind(&input.notes)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| map_fk_violation(e, "contact_id does not exist"))?;

        Ok(result.rows_affected())
    }

    /// Mesma regra das bills: status e updated_at apenas.
    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: i64,
        status: InvoiceStatus,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE invoices SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
