// src/db/contact_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    db::{like_pattern, push_condition},
    models::contact::{Contact, ContactFilter, ContactType},
};

// Fornecedor olha as bills, cliente olha as invoices. O SELECT externo só
// acrescenta o saldo em cima dos totais.
const SELECT_CONTACT: &str = r#"
    SELECT c.*, c.total_amount - c.allocated_amount AS balance
    FROM (
        SELECT ct.id, ct.name, ct.type, ct.email, ct.phone, ct.created_at, ct.updated_at,
               CASE ct.type
                   WHEN 'vendor' THEN COALESCE((
                       SELECT SUM(b.amount) FROM bills b WHERE b.contact_id = ct.id
                   ), 0)
                   ELSE COALESCE((
                       SELECT SUM(i.amount) FROM invoices i WHERE i.contact_id = ct.id
                   ), 0)
               END AS total_amount,
               CASE ct.type
                   WHEN 'vendor' THEN COALESCE((
                       SELECT SUM(l.amount)
                       FROM allocation_links l
                       JOIN bills b ON l.document_type = 'bill' AND l.document_id = b.id
                       WHERE b.contact_id = ct.id
                   ), 0)
                   ELSE COALESCE((
                       SELECT SUM(l.amount)
                       FROM allocation_links l
                       JOIN invoices i ON l.document_type = 'invoice' AND l.document_id = i.id
                       WHERE i.contact_id = ct.id
                   ), 0)
               END AS allocated_amount
        FROM contacts ct
    ) AS c
"#;

#[derive(Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &ContactFilter) -> Result<Vec<Contact>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_CONTACT);
        let mut has_where = false;

        if let Some(kind) = filter.kind.as_deref().filter(|s| !s.is_empty()) {
            push_condition(&mut qb, &mut has_where);
            qb.push("c.type = ").push_bind(kind.to_string());
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = like_pattern(search);
            push_condition(&mut qb, &mut has_where);
            qb.push("(c.name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.email LIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.phone LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY c.name ASC, c.id ASC");

        let contacts = qb.build_query_as::<Contact>().fetch_all(&self.pool).await?;
        Ok(contacts)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Contact>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{} WHERE c.id = ?", SELECT_CONTACT);
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(contact)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        kind: ContactType,
        email: Option<&str>,
        phone: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO contacts (name, type, email, phone, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(email)
        .bind(phone)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        kind: ContactType,
        email: Option<&str>,
        phone: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET name = ?, type = ?, email = ?, phone = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(email)
        .bind(phone)
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
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
