// src/services/reconciliation.rs

use crate::models::{
    allocation::{Capacity, DocumentType},
    bill::BillStatus,
    invoice::InvoiceStatus,
};

/// Status que um documento deve ter dado o quanto já foi alocado contra ele.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciledStatus {
    Bill(BillStatus),
    Invoice(InvoiceStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settlement {
    Open,
    Partial,
    Settled,
}

fn settlement(capacity: Capacity) -> Settlement {
    if !capacity.amount.is_positive() || !capacity.allocated.is_positive() {
        Settlement::Open
    } else if capacity.allocated < capacity.amount {
        Settlement::Partial
    } else {
        Settlement::Settled
    }
}

/// Regra de quitação. Payout não tem status, então devolve `None`.
///
/// O resultado sobrescreve qualquer status manual (ex: `cancelled`, `sent`).
pub fn settled_status(document_type: DocumentType, capacity: Capacity) -> Option<ReconciledStatus> {
    let state = settlement(capacity);
    match document_type {
        DocumentType::Bill => Some(ReconciledStatus::Bill(match state {
            Settlement::Open => BillStatus::Draft,
            Settlement::Partial => BillStatus::Partial,
            Settlement::Settled => BillStatus::Paid,
        })),
        DocumentType::Invoice => Some(ReconciledStatus::Invoice(match state {
            Settlement::Open => InvoiceStatus::Draft,
            Settlement::Partial => InvoiceStatus::Partial,
            Settlement::Settled => InvoiceStatus::Received,
        })),
        DocumentType::Payout => None,
    }
}
