// src/services/bill_service.rs

use std::sync::Arc;

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        error::{AppError, EntityKind},
    },
    db::{begin_write, AllocationRepository, BillRepository},
    services::ledger_service::ensure_covers_allocations,
    models::{
        allocation::DocumentType,
        bill::{Bill, BillFilter, BillInput, BillStatus},
    },
};

#[derive(Clone)]
pub struct BillService {
    pool: SqlitePool,
    repo: BillRepository,
    allocation_repo: AllocationRepository,
    clock: Arc<dyn Clock>,
}

impl BillService {
    pub fn new(
        pool: SqlitePool,
        repo: BillRepository,
        allocation_repo: AllocationRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { pool, repo, allocation_repo, clock }
    }

    pub async fn list(&self, filter: &BillFilter) -> Result<Vec<Bill>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Bill, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Bill))
    }

    pub async fn create(&self, input: BillInput) -> Result<Bill, AppError> {
        let status = validated_status(&input)?;

        let id = self
            .repo
            .create(&self.pool, &input, status, self.clock.now())
            .await?;

        tracing::debug!(bill_id = id, amount = %input.amount, "bill created");
        self.get(id).await
    }

    /// Substitui o registro inteiro, inclusive o status informado. O valor
    /// novo precisa cobrir o que já foi alocado contra a bill.
    pub async fn update(&self, id: i64, input: BillInput) -> Result<Bill, AppError> {
        let status = validated_status(&input)?;

        let mut tx = begin_write(&self.pool).await?;

        let capacity = self
            .allocation_repo
            .document_capacity(&mut *tx, DocumentType::Bill, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Bill))?;
        ensure_covers_allocations(input.amount, &capacity)?;

        self.repo
            .update(&mut *tx, id, &input, status, self.clock.now())
            .await?;

        tx.commit().await?;

        self.get(id).await
    }

    /// Apaga a bill e as alocações feitas contra ela, liberando o saldo das
    /// movimentações.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = begin_write(&self.pool).await?;

        let released = self
            .allocation_repo
            .delete_for_document(&mut *tx, DocumentType::Bill, id)
            .await?;

        let deleted = self.repo.delete(&mut *tx, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(EntityKind::Bill));
        }

        tx.commit().await?;

        if released > 0 {
            tracing::debug!(bill_id = id, released, "bill deleted with its allocations");
        }
        Ok(())
    }
}

fn validated_status(input: &BillInput) -> Result<BillStatus, AppError> {
    input.validate()?;
    input
        .bill_status()
        .ok_or_else(|| AppError::InvalidInput("invalid bill status".into()))
}
