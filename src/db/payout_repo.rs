// src/db/payout_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    db::{like_pattern, push_condition},
    models::payout::{Payout, PayoutFilter, PayoutInput, Platform},
};

const SELECT_PAYOUT: &str = r#"
    SELECT p.*, p.final_payout_amt - p.allocated AS unallocated
    FROM (
        SELECT po.id, po.outlet_name, po.platform, po.period_start, po.period_end,
               po.settlement_date, po.total_orders, po.gross_sales_amt,
               po.restaurant_discount_amt, po.platform_commission_amt, po.taxes_tcs_tds_amt,
               po.marketing_ads_amt, po.final_payout_amt, po.utr_number, po.created_at,
               COALESCE((
                   SELECT SUM(l.amount)
                   FROM allocation_links l
                   WHERE l.document_type = 'payout' AND l.document_id = po.id
               ), 0) AS allocated
        FROM payouts po
    ) AS p
"#;

#[derive(Clone)]
pub struct PayoutRepository {
    pool: SqlitePool,
}

impl PayoutRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &PayoutFilter) -> Result<Vec<Payout>, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_PAYOUT);
        let mut has_where = false;

        if let Some(platform) = filter.platform.as_deref().filter(|s| !s.is_empty()) {
            push_condition(&mut qb, &mut has_where);
            qb.push("p.platform = ").push_bind(platform.to_lowercase());
        }
        if let Some(outlet) = filter.outlet_name.as_deref().filter(|s| !s.is_empty()) {
            push_condition(&mut qb, &mut has_where);
            qb.push("p.outlet_name LIKE ").push_bind(like_pattern(outlet));
        }
        if let Some(from) = filter.from {
            push_condition(&mut qb, &mut has_where);
            qb.push("p.settlement_date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            push_condition(&mut qb, &mut has_where);
            qb.push("p.settlement_date <= ").push_bind(to);
        }

        qb.push(" ORDER BY p.settlement_date DESC, p.created_at DESC, p.id DESC");

        let payouts = qb.build_query_as::<Payout>().fetch_all(&self.pool).await?;
        Ok(payouts)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Payout>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{} WHERE p.id = ?", SELECT_PAYOUT);
        let payout = sqlx::query_as::<_, Payout>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(payout)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &PayoutInput,
        platform: Platform,
        now: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO payouts (
                outlet_name, platform, period_start, period_end, settlement_date,
                total_orders, gross_sales_amt, restaurant_discount_amt,
                platform_commission_amt, taxes_tcs_tds_amt, marketing_ads_amt,
                final_payout_amt, utr_number, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.outlet_name)
        .bind(platform)
        .bind(input.period_start)
        .bind(input.period_end)
        .bind(input.settlement_date)
        .bind(input.total_orders)
        .bind(input.gross_sales_amt)
        .bind(input.restaurant_discount_amt)
        .bind(input.platform_commission_amt)
        .bind(input.taxes_tcs_tds_amt)
        .bind(input.marketing_ads_amt)
        .bind(input.final_payout_amt)
        .bind(&input.utr_number)
        .bind(now)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    // Payout não tem updated_at: o registro é o extrato da plataforma.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        input: &PayoutInput,
        platform: Platform,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE payouts
            SET outlet_name = ?, platform = ?, period_start = ?, period_end = ?,
                settlement_date = ?, total_orders = ?, gross_sales_amt = ?,
                restaurant_discount_amt = ?, platform_commission_amt = ?,
                taxes_tcs_tds_amt = ?, marketing_ads_amt = ?, final_payout_amt = ?,
                utr_number = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.outlet_name)
        .bind(platform)
        .bind(input.period_start)
        .bind(input.period_end)
        .bind(input.settlement_date)
        .bind(input.total_orders)
        .bind(input.gross_sales_amt)
        .bind(input.restaurant_discount_amt)
        .bind(input.platform_commission_amt)
        .bind(input.taxes_tcs_tds_amt)
        .bind(input.marketing_ads_amt)
        .bind(input.final_payout_amt)
        .bind(&input.utr_number)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM payouts WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
