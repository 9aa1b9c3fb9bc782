pub mod account;
pub mod allocation;
pub mod bill;
pub mod contact;
pub mod dashboard;
pub mod invoice;
pub mod money;
pub mod payout;
pub mod transaction;
