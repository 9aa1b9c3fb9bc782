pub mod accounts;
pub mod bills;
pub mod contacts;
pub mod dashboard;
pub mod invoices;
pub mod payouts;
pub mod transactions;
