// src/services/account_service.rs

use std::sync::Arc;

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        error::{AppError, EntityKind},
    },
    db::AccountRepository,
    models::account::{Account, AccountFilter, AccountInput},
};

#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
    repo: AccountRepository,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    pub fn new(pool: SqlitePool, repo: AccountRepository, clock: Arc<dyn Clock>) -> Self {
        Self { pool, repo, clock }
    }

    pub async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Account, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Account))
    }

    pub async fn create(&self, input: AccountInput) -> Result<Account, AppError> {
        input.validate()?;
        let kind = input
            .account_type()
            .ok_or_else(|| AppError::InvalidInput("invalid account type".into()))?;

        let id = self
            .repo
            .create(&self.pool, &input.name, kind, input.opening_balance, self.clock.now())
            .await?;

        tracing::debug!(account_id = id, "account created");
        self.get(id).await
    }

    pub async fn update(&self, id: i64, input: AccountInput) -> Result<Account, AppError> {
        input.validate()?;
        let kind = input
            .account_type()
            .ok_or_else(|| AppError::InvalidInput("invalid account type".into()))?;

        let updated = self
            .repo
            .update(&self.pool, id, &input.name, kind, input.opening_balance, self.clock.now())
            .await?;
        if updated == 0 {
            return Err(AppError::NotFound(EntityKind::Account));
        }

        self.get(id).await
    }

    /// Falha com 400 se a conta ainda tiver movimentações.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repo.delete(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(EntityKind::Account));
        }
        Ok(())
    }
}
