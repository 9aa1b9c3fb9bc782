// src/services/transaction_service.rs

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    common::{
        clock::Clock,
        error::{AppError, EntityKind},
    },
    db::{begin_write, transaction_repo::NewTransaction, AllocationRepository, TransactionRepository},
    models::transaction::{Transaction, TransactionFilter, TransactionInput, TransactionType},
    services::ledger_service::{ensure_covers_allocations, LedgerService},
};

#[derive(Clone)]
pub struct TransactionService {
    pool: SqlitePool,
    repo: TransactionRepository,
    allocation_repo: AllocationRepository,
    ledger: LedgerService,
    clock: Arc<dyn Clock>,
}

impl TransactionService {
    pub fn new(
        pool: SqlitePool,
        repo: TransactionRepository,
        allocation_repo: AllocationRepository,
        ledger: LedgerService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { pool, repo, allocation_repo, ledger, clock }
    }

    pub async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Transaction, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Transaction))
    }

    /// Entrada ou saída simples; transferência vira o par de pernas.
    pub async fn create(&self, input: TransactionInput) -> Result<Transaction, AppError> {
        let kind = validated_type(&input)?;
        if kind == TransactionType::Transfer {
            return self.compose_transfer(&input).await;
        }

        let row = row_from_input(&input, kind);
        let id = self.repo.create(&self.pool, &row, self.clock.now()).await?;

        tracing::debug!(transaction_id = id, kind = ?kind, amount = %input.amount, "transaction created");
        self.get(id).await
    }

    /// Grava a transferência como duas movimentações numa única transação de
    /// banco: saída na origem e entrada no destino, com a mesma referência.
    /// Sem referência informada, usa `TRF-<id da saída>`.
    ///
    /// Devolve a perna de saída.
    pub async fn compose_transfer(&self, input: &TransactionInput) -> Result<Transaction, AppError> {
        input.validate_all()?;
        let destination = input.transfer_account_id.ok_or_else(|| {
            AppError::InvalidInput("transfer_account_id is required for transfers".into())
        })?;
        let supplied_reference = input.reference.as_deref().filter(|r| !r.is_empty());
        let now = self.clock.now();

        let mut tx = begin_write(&self.pool).await?;

        // 1. Saída na conta de origem
        let expense = NewTransaction {
            account_id: input.account_id,
            kind: TransactionType::Expense,
            amount: input.amount,
            transaction_date: input.transaction_date,
            description: input.description.as_deref(),
            reference: supplied_reference,
            transfer_account_id: Some(destination),
            contact_id: input.contact_id,
        };
        let expense_id = self.repo.create(&mut *tx, &expense, now).await?;

        // 2. Referência derivada do id recém-gerado
        let reference = match supplied_reference {
            Some(reference) => reference.to_string(),
            None => {
                let reference = format!("TRF-{}", expense_id);
                self.repo.set_reference(&mut *tx, expense_id, &reference).await?;
                reference
            }
        };

        // 3. Entrada na conta de destino
        let income = NewTransaction {
            account_id: destination,
            kind: TransactionType::Income,
            reference: Some(&reference),
            transfer_account_id: Some(input.account_id),
            ..expense
        };
        let income_id = self.repo.create(&mut *tx, &income, now).await?;

        tx.commit().await?;

        tracing::debug!(
            expense_id,
            income_id,
            reference = %reference,
            amount = %input.amount,
            "transfer composed"
        );

        self.get(expense_id).await
    }

    /// Substituição simples da linha. Uma transferência editada aqui não
    /// mexe na outra perna. O valor novo não pode ficar abaixo do já alocado.
    pub async fn update(&self, id: i64, input: TransactionInput) -> Result<Transaction, AppError> {
        let kind = validated_type(&input)?;

        let row = row_from_input(&input, kind);

        let mut tx = begin_write(&self.pool).await?;

        let capacity = self
            .allocation_repo
            .transaction_capacity(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Transaction))?;
        ensure_covers_allocations(input.amount, &capacity)?;

        self.repo.update(&mut *tx, id, &row, self.clock.now()).await?;

        tx.commit().await?;

        self.get(id).await
    }

    /// Apaga a movimentação (as alocações caem em cascata) e reconcilia os
    /// documentos que perderam vínculo. A outra perna de uma transferência
    /// permanece.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = begin_write(&self.pool).await?;

        let links = self.allocation_repo.list_for_transaction(&mut *tx, id).await?;

        let deleted = self.repo.delete(&mut *tx, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(EntityKind::Transaction));
        }

        tx.commit().await?;

        self.ledger
            .reconcile_all(links.into_iter().map(|l| (l.document_type, l.document_id)))
            .await;

        Ok(())
    }
}

fn validated_type(input: &TransactionInput) -> Result<TransactionType, AppError> {
    input.validate_all()?;
    input
        .transaction_type()
        .ok_or_else(|| AppError::InvalidInput("invalid transaction type".into()))
}

fn row_from_input(input: &TransactionInput, kind: TransactionType) -> NewTransaction<'_> {
    NewTransaction {
        account_id: input.account_id,
        kind,
        amount: input.amount,
        transaction_date: input.transaction_date,
        description: input.description.as_deref(),
        reference: input.reference.as_deref(),
        transfer_account_id: input.transfer_account_id,
        contact_id: input.contact_id,
    }
}
