// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::{
    common::clock::{Clock, SystemClock},
    db::{
        AccountRepository, AllocationRepository, BillRepository, ContactRepository,
        DashboardRepository, InvoiceRepository, PayoutRepository, TransactionRepository,
    },
    services::{
        AccountService, BillService, ContactService, DashboardService, InvoiceService,
        LedgerService, PayoutService, TransactionService,
    },
};

/// Configuração lida do ambiente (e do .env, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub busy_timeout: Duration,
    pub request_timeout: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/accounting.db".to_string()),
            max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            busy_timeout: Duration::from_secs(env_or("DB_BUSY_TIMEOUT_SECS", 5)?),
            request_timeout: Duration::from_secs(env_or("REQUEST_TIMEOUT_SECS", 30)?),
            port: env_or("PORT", 8080)?,
        })
    }
}

// Variável ausente usa o padrão; presente mas inválida é erro de inicialização.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} tem um valor inválido: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Abre o pool do SQLite, criando o arquivo (e a pasta) se preciso.
pub async fn connect(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("DATABASE_URL inválida: {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("não foi possível criar {}", parent.display()))?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await?; // <-- Se falhar, retorna um Err em vez de dar panic

    Ok(pool)
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub request_timeout: Duration,
    pub account_service: AccountService,
    pub contact_service: ContactService,
    pub bill_service: BillService,
    pub invoice_service: InvoiceService,
    pub payout_service: PayoutService,
    pub transaction_service: TransactionService,
    pub ledger_service: LedgerService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = connect(config).await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, Arc::new(SystemClock), config.request_timeout))
    }

    /// Monta o gráfico de dependências sobre um pool já aberto.
    pub fn from_pool(db_pool: SqlitePool, clock: Arc<dyn Clock>, request_timeout: Duration) -> Self {
        // --- Repositórios ---
        let account_repo = AccountRepository::new(db_pool.clone());
        let contact_repo = ContactRepository::new(db_pool.clone());
        let bill_repo = BillRepository::new(db_pool.clone());
        let invoice_repo = InvoiceRepository::new(db_pool.clone());
        let payout_repo = PayoutRepository::new(db_pool.clone());
        let transaction_repo = TransactionRepository::new(db_pool.clone());
        let allocation_repo = AllocationRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new();

        // --- Serviços ---
        let ledger_service = LedgerService::new(
            db_pool.clone(),
            allocation_repo.clone(),
            bill_repo.clone(),
            invoice_repo.clone(),
            clock.clone(),
        );

        Self {
            account_service: AccountService::new(db_pool.clone(), account_repo, clock.clone()),
            contact_service: ContactService::new(db_pool.clone(), contact_repo, clock.clone()),
            bill_service: BillService::new(
                db_pool.clone(),
                bill_repo,
                allocation_repo.clone(),
                clock.clone(),
            ),
            invoice_service: InvoiceService::new(
                db_pool.clone(),
                invoice_repo,
                allocation_repo.clone(),
                clock.clone(),
            ),
            payout_service: PayoutService::new(
                db_pool.clone(),
                payout_repo,
                allocation_repo.clone(),
                clock.clone(),
            ),
            transaction_service: TransactionService::new(
                db_pool.clone(),
                transaction_repo,
                allocation_repo,
                ledger_service.clone(),
                clock,
            ),
            ledger_service,
            dashboard_service: DashboardService::new(db_pool.clone(), dashboard_repo),
            request_timeout,
            db_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_falls_back_to_default() {
        assert_eq!(env_or::<u16>("ACCOUNTING_TEST_UNSET_PORT", 8080).unwrap(), 8080);
    }
}
