// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounting API",
        description = "Contas, contatos, bills, invoices, repasses e o livro de alocações."
    ),
    paths(
        // --- Accounts ---
        handlers::accounts::list_accounts,
        handlers::accounts::get_account,
        handlers::accounts::create_account,
        handlers::accounts::update_account,
        handlers::accounts::delete_account,

        // --- Contacts ---
        handlers::contacts::list_contacts,
        handlers::contacts::get_contact,
        handlers::contacts::create_contact,
        handlers::contacts::update_contact,
        handlers::contacts::delete_contact,

        // --- Bills ---
        handlers::bills::list_bills,
        handlers::bills::get_bill,
        handlers::bills::create_bill,
        handlers::bills::update_bill,
        handlers::bills::delete_bill,
        handlers::bills::list_bill_links,

        // --- Invoices ---
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::create_invoice,
        handlers::invoices::update_invoice,
        handlers::invoices::delete_invoice,
        handlers::invoices::list_invoice_links,

        // --- Payouts ---
        handlers::payouts::list_payouts,
        handlers::payouts::get_payout,
        handlers::payouts::create_payout,
        handlers::payouts::update_payout,
        handlers::payouts::delete_payout,
        handlers::payouts::list_payout_links,

        // --- Transactions + alocações ---
        handlers::transactions::list_transactions,
        handlers::transactions::get_transaction,
        handlers::transactions::create_transaction,
        handlers::transactions::update_transaction,
        handlers::transactions::delete_transaction,
        handlers::transactions::list_links,
        handlers::transactions::create_link,
        handlers::transactions::delete_link,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            models::money::Money,

            // --- Accounts / Contacts ---
            models::account::AccountType,
            models::account::Account,
            models::account::AccountInput,
            models::contact::ContactType,
            models::contact::Contact,
            models::contact::ContactInput,

            // --- Documents ---
            models::bill::BillStatus,
            models::bill::Bill,
            models::bill::BillInput,
            models::invoice::InvoiceStatus,
            models::invoice::Invoice,
            models::invoice::InvoiceInput,
            models::payout::Platform,
            models::payout::Payout,
            models::payout::PayoutInput,

            // --- Transactions / Ledger ---
            models::transaction::TransactionType,
            models::transaction::Transaction,
            models::transaction::TransactionInput,
            models::allocation::DocumentType,
            models::allocation::AllocationLink,
            models::allocation::DocumentLink,
            models::allocation::LinkInput,

            // --- DASHBOARD ---
            models::dashboard::DashboardSummary,
            models::dashboard::RecentTransaction,
        )
    ),
    tags(
        (name = "Accounts", description = "Contas bancárias, caixa e cartões"),
        (name = "Contacts", description = "Fornecedores e clientes"),
        (name = "Bills", description = "Contas a pagar"),
        (name = "Invoices", description = "Contas a receber"),
        (name = "Payouts", description = "Repasses Swiggy / Zomato"),
        (name = "Transactions", description = "Movimentações, transferências e alocações"),
        (name = "Dashboard", description = "Indicadores gerenciais")
    )
)]
pub struct ApiDoc;
