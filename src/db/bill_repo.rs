// src/db/bill_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    db::{like_pattern, map_fk_violation, push_condition},
    models::bill::{Bill, BillFilter, BillInput, BillStatus},
};

const SELECT_BILL: &str = r#"
    SELECT b.*, b.amount - b.allocated AS unallocated
    FROM (
        SELECT bl.id, bl.contact_id, bl.bill_number, bl.issue_date, bl.due_date, bl.amount,
               bl.status, bl.file_url, bl.notes, bl.created_at, bl.updated_at,
               ct.name AS contact_name,
               COALESCE((
                   SELECT SUM(l.amount)
                   FROM allocation_links l
                   WHERE l.document_type = 'bill' AND l.document_id = bl.id
               ), 0) AS allocated
        FROM bills bl
        LEFT JOIN contacts ct ON ct.id = bl.contact_id
    ) AS b
"#;

#[derive(Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &BillFilter) -> Result<Vec<Bill>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_BILL);
        let mut has_where = false;

        if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
            push_condition(&mut qb, &mut has_where);
            qb.push("b.status = ").push_bind(status.to_string());
        }
        if let Some(contact_id) = filter.contact_id {
            push_condition(&mut qb, &mut has_where);
            qb.push("b.contact_id = ").push_bind(contact_id);
        }
        if let Some(from) = filter.from {
            push_condition(&mut qb, &mut has_where);
            qb.push("b.issue_date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            push_condition(&mut qb, &mut has_where);
            qb.push("b.issue_date <= ").push_bind(to);
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = like_pattern(search);
            push_condition(&mut qb, &mut has_where);
            qb.push("(b.bill_number LIKE ")
                .push_bind(pattern.clone())
                .push(" OR b.notes LIKE ")
                .push_bind(pattern.clone())
                .push(" OR b.contact_name LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY b.created_at DESC, b.id DESC");

        let bills = qb.build_query_as::<Bill>().fetch_all(&self.pool).await?;
        Ok(bills)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Bill>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{} WHERE b.id = ?", SELECT_BILL);
        let bill = sqlx::query_as::<_, Bill>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(bill)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &BillInput,
        status: BillStatus,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO bills (
                contact_id, bill_number, issue_date, due_date, amount,
                status, file_url, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.contact_id)
        .bind(&input.bill_number)
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
        input: &BillInput,
        status: BillStatus,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE bills
            SET contact_id = ?, bill_number = ?, issue_date = ?, due_date = ?, amount = ?,
                status = ?, file_url = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.contact_id)
        .bind(&input.bill_number)
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

    /// Usado pela reconciliação: só mexe em status e updated_at.
    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: i64,
        status: BillStatus,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE bills SET status = ?, updated_at = ? WHERE id = ?")
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
        let result = sqlx::query("DELETE FROM bills WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
