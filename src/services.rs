pub mod account_service;
pub mod bill_service;
pub mod contact_service;
pub mod dashboard_service;
pub mod invoice_service;
pub mod ledger_service;
pub mod payout_service;
pub mod reconciliation;
pub mod transaction_service;

pub use account_service::AccountService;
pub use bill_service::BillService;
pub use contact_service::ContactService;
pub use dashboard_service::DashboardService;
pub use invoice_service::InvoiceService;
pub use ledger_service::LedgerService;
pub use payout_service::PayoutService;
pub use transaction_service::TransactionService;
