// src/db/account_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    db::{like_pattern, map_fk_violation, push_condition},
    models::{
        account::{Account, AccountFilter, AccountType},
        money::Money,
    },
};

// Saldo = abertura + entradas - saídas, sempre calculado na hora.
const SELECT_ACCOUNT: &str = r#"
    SELECT a.id, a.name, a.type, a.opening_balance, a.created_at, a.updated_at,
           a.opening_balance + COALESCE((
               SELECT SUM(CASE t.type
                              WHEN 'income' THEN t.amount
                              WHEN 'expense' THEN -t.amount
                              ELSE 0
                          END)
               FROM transactions t
               WHERE t.account_id = a.id
           ), 0) AS balance
    FROM accounts a
"#;

#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_ACCOUNT);
        let mut has_where = false;

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            push_condition(&mut qb, &mut has_where);
            qb.push("a.name LIKE ").push_bind(like_pattern(search));
        }

        qb.push(" ORDER BY a.name ASC, a.id ASC");

        let accounts = qb.build_query_as::<Account>().fetch_all(&self.pool).await?;
        Ok(accounts)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Account>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{} WHERE a.id = ?", SELECT_ACCOUNT);
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(account)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        kind: AccountType,
        opening_balance: Money,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (name, type, opening_balance, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(opening_balance)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Retorna quantas linhas foram alteradas (0 = não existe).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        kind: AccountType,
        opening_balance: Money,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET name = ?, type = ?, opening_balance = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(opening_balance)
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
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| map_fk_violation(e, "account still has transactions"))?;

        Ok(result.rows_affected())
    }
}
