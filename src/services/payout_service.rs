// src/services/payout_service.rs

use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        error::{AppError, EntityKind},
    },
    db::{begin_write, AllocationRepository, PayoutRepository},
    services::ledger_service::ensure_covers_allocations,
    models::{
        allocation::DocumentType,
        payout::{Payout, PayoutFilter, PayoutInput, Platform},
    },
};

#[derive(Clone)]
pub struct PayoutService {
    pool: SqlitePool,
    repo: PayoutRepository,
    allocation_repo: AllocationRepository,
    clock: Arc<dyn Clock>,
}

impl PayoutService {
    pub fn new(
        pool: SqlitePool,
        repo: PayoutRepository,
        allocation_repo: AllocationRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { pool, repo, allocation_repo, clock }
    }

    pub async fn list(&self, filter: &PayoutFilter) -> Result<Vec<Payout>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Payout, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Payout))
    }

    pub async fn create(&self, input: PayoutInput) -> Result<Payout, AppError> {
        let platform = validated_platform(&input)?;

        let id = self
            .repo
            .create(&self.pool, &input, platform, self.clock.now())
            .await?;

        tracing::debug!(payout_id = id, platform = ?platform, "payout recorded");
        self.get(id).await
    }

    pub async fn update(&self, id: i64, input: PayoutInput) -> Result<Payout, AppError> {
        let platform = validated_platform(&input)?;

        let mut tx = begin_write(&self.pool).await?;

        let capacity = self
            .allocation_repo
            .document_capacity(&mut *tx, DocumentType::Payout, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Payout))?;
        ensure_covers_allocations(input.final_payout_amt, &capacity)?;

        self.repo.update(&mut *tx, id, &input, platform).await?;

        tx.commit().await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = begin_write(&self.pool).await?;

        self.allocation_repo
            .delete_for_document(&mut *tx, DocumentType::Payout, id)
            .await?;

        let deleted = self.repo.delete(&mut *tx, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(EntityKind::Payout));
        }

        tx.commit().await?;
        Ok(())
    }
}

// A plataforma chega em qualquer caixa e é gravada em minúsculas.
fn validated_platform(input: &PayoutInput) -> Result<Platform, AppError> {
    input.validate()?;
    input
        .platform()
        .ok_or_else(|| AppError::InvalidInput("platform must be swiggy or zomato".into()))
}
