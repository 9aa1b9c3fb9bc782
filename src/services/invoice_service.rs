// src/services/invoice_service.rs

use std::sync::Arc;

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        error::{AppError, EntityKind},
    },
    db::{begin_write, AllocationRepository, InvoiceRepository},
    services::ledger_service::ensure_covers_allocations,
    models::{
        allocation::DocumentType,
        invoice::{Invoice, InvoiceFilter, InvoiceInput, InvoiceStatus},
    },
};

#[derive(Clone)]
pub struct InvoiceService {
    pool: SqlitePool,
    repo: InvoiceRepository,
    allocation_repo: AllocationRepository,
    clock: Arc<dyn Clock>,
}

impl InvoiceService {
    pub fn new(
        pool: SqlitePool,
        repo: InvoiceRepository,
        allocation_repo: AllocationRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { pool, repo, allocation_repo, clock }
    }

    pub async fn list(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Invoice, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Invoice))
    }

    pub async fn create(&self, input: InvoiceInput) -> Result<Invoice, AppError> {
        let status = validated_status(&input)?;

        let id = self
            .repo
            .create(&self.pool, &input, status, self.clock.now())
            .await?;

        tracing::debug!(invoice_id = id, amount = %input.amount, "invoice created");
        self.get(id).await
    }

    pub async fn update(&self, id: i64, input: InvoiceInput) -> Result<Invoice, AppError> {
        let status = validated_status(&input)?;

        let mut tx = begin_write(&self.pool).await?;

        let capacity = self
            .allocation_repo
            .document_capacity(&mut *tx, DocumentType::Invoice, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Invoice))?;
        ensure_covers_allocations(input.amount, &capacity)?;

        self.repo
            .update(&mut *tx, id, &input, status, self.clock.now())
            .await?;

        tx.commit().await?;

        self.get(id).await
    }

    // Mesma regra das bills: os vínculos saem junto.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = begin_write(&self.pool).await?;

        let released = self
            .allocation_repo
            .delete_for_document(&mut *tx, DocumentType::Invoice, id)
            .await?;

        let deleted = self.repo.delete(&mut *tx, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(EntityKind::Invoice));
        }

        tx.commit().await?;

        if released > 0 {
            tracing::debug!(invoice_id = id, released, "invoice deleted with its allocations");
        }
        Ok(())
    }
}

fn validated_status(input: &InvoiceInput) -> Result<InvoiceStatus, AppError> {
    input.validate()?;
    input
        .invoice_status()
        .ok_or_else(|| AppError::InvalidInput("invalid invoice status".into()))
}
