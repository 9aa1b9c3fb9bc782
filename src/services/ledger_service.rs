// src/services/ledger_service.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        error::{AppError, CapacitySide, EntityKind},
    },
    db::{begin_write, AllocationRepository, BillRepository, InvoiceRepository},
    models::{
        allocation::{AllocationLink, Capacity, DocumentLink, DocumentType, LinkInput},
        money::Money,
    },
    services::reconciliation::{settled_status, ReconciledStatus},
};

/// Livro de alocações: aplica (e desfaz) partes de uma movimentação contra
/// bills, invoices e payouts, respeitando os dois tetos.
#[derive(Clone)]
pub struct LedgerService {
    pool: SqlitePool,
    allocation_repo: AllocationRepository,
    bill_repo: BillRepository,
    invoice_repo: InvoiceRepository,
    clock: Arc<dyn Clock>,
}

impl LedgerService {
    pub fn new(
        pool: SqlitePool,
        allocation_repo: AllocationRepository,
        bill_repo: BillRepository,
        invoice_repo: InvoiceRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { pool, allocation_repo, bill_repo, invoice_repo, clock }
    }

    // =========================================================================
    //  LINK / UNLINK
    // =========================================================================

    pub async fn link(
        &self,
        transaction_id: i64,
        input: LinkInput,
    ) -> Result<AllocationLink, AppError> {
        if !input.amount.is_positive() {
            return Err(AppError::InvalidInput("amount must be positive".into()));
        }
        let document_type = input.document_type().ok_or_else(|| {
            AppError::InvalidInput("document_type must be one of: bill, invoice, payout".into())
        })?;
        input.validate()?;

        let mut tx = begin_write(&self.pool).await?;

        // 1. Teto da movimentação
        let transaction = self
            .allocation_repo
            .transaction_capacity(&mut *tx, transaction_id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Transaction))?;

        if input.amount > transaction.unallocated() {
            return Err(AppError::CapacityExceeded {
                side: CapacitySide::Transaction,
                available: transaction.unallocated(),
                requested: input.amount,
            });
        }

        // 2. Teto do documento
        let document = self
            .allocation_repo
            .document_capacity(&mut *tx, document_type, input.document_id)
            .await?
            .ok_or(AppError::NotFound(document_type.into()))?;

        if input.amount > document.unallocated() {
            return Err(AppError::CapacityExceeded {
                side: CapacitySide::Document(document_type),
                available: document.unallocated(),
                requested: input.amount,
            });
        }

        // 3. Grava o vínculo
        let link = self
            .allocation_repo
            .create(
                &mut *tx,
                transaction_id,
                document_type,
                input.document_id,
                input.amount,
                self.clock.now(),
            )
            .await?;

        tx.commit().await?;

        tracing::debug!(
            link_id = link.id,
            transaction_id,
            document = %document_type,
            document_id = input.document_id,
            amount = %input.amount,
            "allocation linked"
        );

        self.reconcile_best_effort(document_type, input.document_id).await;

        Ok(link)
    }

    pub async fn unlink(&self, transaction_id: i64, link_id: i64) -> Result<(), AppError> {
        let mut tx = begin_write(&self.pool).await?;

        let existing = self
            .allocation_repo
            .find(&mut *tx, transaction_id, link_id)
            .await?;

        let deleted = self
            .allocation_repo
            .delete(&mut *tx, transaction_id, link_id)
            .await?;
        if deleted == 0 {
            return Err(AppError::NotFound(EntityKind::Link));
        }

        tx.commit().await?;

        tracing::debug!(link_id, transaction_id, "allocation unlinked");

        if let Some(link) = existing {
            self.reconcile_best_effort(link.document_type, link.document_id).await;
        }

        Ok(())
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    /// Vínculos da movimentação, do mais antigo ao mais novo. Movimentação
    /// inexistente devolve lista vazia.
    pub async fn list_links(&self, transaction_id: i64) -> Result<Vec<AllocationLink>, AppError> {
        self.allocation_repo
            .list_for_transaction(&self.pool, transaction_id)
            .await
    }

    pub async fn links_for_document(
        &self,
        document_type: DocumentType,
        document_id: i64,
    ) -> Result<Vec<DocumentLink>, AppError> {
        self.allocation_repo
            .document_capacity(&self.pool, document_type, document_id)
            .await?
            .ok_or(AppError::NotFound(document_type.into()))?;

        self.allocation_repo
            .list_for_document(document_type, document_id)
            .await
    }

    // =========================================================================
    //  RECONCILIAÇÃO DE STATUS
    // =========================================================================

    /// Recalcula e grava o status do documento a partir das alocações atuais.
    /// Devolve `None` para payouts e para documentos que não existem mais.
    pub async fn reconcile(
        &self,
        document_type: DocumentType,
        document_id: i64,
    ) -> Result<Option<ReconciledStatus>, AppError> {
        if document_type == DocumentType::Payout {
            return Ok(None);
        }

        let mut tx = begin_write(&self.pool).await?;

        let Some(capacity) = self
            .allocation_repo
            .document_capacity(&mut *tx, document_type, document_id)
            .await?
        else {
            return Ok(None);
        };

        let status = settled_status(document_type, capacity);
        let now = self.clock.now();
        match status {
            Some(ReconciledStatus::Bill(status)) => {
                self.bill_repo.set_status(&mut *tx, document_id, status, now).await?;
            }
            Some(ReconciledStatus::Invoice(status)) => {
                self.invoice_repo.set_status(&mut *tx, document_id, status, now).await?;
            }
            None => {}
        }

        tx.commit().await?;
        Ok(status)
    }

    /// Reconcilia vários documentos (ex: os que perderam vínculos quando uma
    /// movimentação foi apagada). Cada documento aparece uma vez só.
    pub async fn reconcile_all<I>(&self, documents: I)
    where
        I: IntoIterator<Item = (DocumentType, i64)>,
    {
        let unique: BTreeSet<(DocumentType, i64)> = documents.into_iter().collect();

        for (document_type, document_id) in unique {
            self.reconcile_best_effort(document_type, document_id).await;
        }
    }

    // O vínculo já foi gravado; uma falha aqui só é registrada.
    async fn reconcile_best_effort(&self, document_type: DocumentType, document_id: i64) {
        if let Err(err) = self.reconcile(document_type, document_id).await {
            tracing::warn!(
                document = %document_type,
                document_id,
                error = %err,
                "failed to reconcile document status"
            );
        }
    }
}

/// Um valor novo (edição de documento ou movimentação) não pode ficar abaixo
/// do que já foi alocado contra ele.
pub(crate) fn ensure_covers_allocations(
    amount: Money,
    capacity: &Capacity,
) -> Result<(), AppError> {
    if amount < capacity.allocated {
        return Err(AppError::InvalidInput(format!(
            "amount {} is below the {} already allocated; unlink first",
            amount, capacity.allocated
        )));
    }
    Ok(())
}
