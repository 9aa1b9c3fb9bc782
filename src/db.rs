// src/db.rs

use sqlx::{migrate::Migrator, QueryBuilder, Sqlite, SqlitePool, Transaction};

use crate::common::error::AppError;

pub mod account_repo;
pub use account_repo::AccountRepository;
pub mod contact_repo;
pub use contact_repo::ContactRepository;
pub mod bill_repo;
pub use bill_repo::BillRepository;
pub mod invoice_repo;
pub use invoice_repo::InvoiceRepository;
pub mod payout_repo;
pub use payout_repo::PayoutRepository;
pub mod transaction_repo;
pub use transaction_repo::TransactionRepository;
pub mod allocation_repo;
pub use allocation_repo::AllocationRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;

/// Migrações embutidas no binário (pasta ./migrations).
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Transação de escrita. `BEGIN IMMEDIATE` pega o lock de escrita logo no
/// início: um segundo escritor espera o `busy_timeout` e depois lê os saldos
/// já atualizados, em vez de falhar com um snapshot velho.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, AppError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Abre o WHERE na primeira condição e encadeia as seguintes com AND.
pub(crate) fn push_condition(qb: &mut QueryBuilder<'_, Sqlite>, has_where: &mut bool) {
    if *has_where {
        qb.push(" AND ");
    } else {
        qb.push(" WHERE ");
        *has_where = true;
    }
}

/// Padrão `%termo%` para buscas com LIKE.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}

/// Violação de chave estrangeira vira erro de entrada (400); o resto segue
/// como erro de banco.
pub(crate) fn map_fk_violation(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidInput(message.to_string());
        }
    }
    err.into()
}
