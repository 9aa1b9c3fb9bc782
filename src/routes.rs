// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::request_timeout::request_timeout};

/// Monta o router completo: API v1, health check e Swagger.
pub fn app(app_state: AppState) -> Router {
    let api = Router::new()
        // --- accounts ---
        .route(
            "/accounts",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route(
            "/accounts/{id}",
            get(handlers::accounts::get_account)
                .put(handlers::accounts::update_account)
                .delete(handlers::accounts::delete_account),
        )
        // --- contacts ---
        .route(
            "/contacts",
            get(handlers::contacts::list_contacts).post(handlers::contacts::create_contact),
        )
        .route(
            "/contacts/{id}",
            get(handlers::contacts::get_contact)
                .put(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        )
        // --- bills ---
        .route("/bills", get(handlers::bills::list_bills).post(handlers::bills::create_bill))
        .route(
            "/bills/{id}",
            get(handlers::bills::get_bill)
                .put(handlers::bills::update_bill)
                .delete(handlers::bills::delete_bill),
        )
        .route("/bills/{id}/links", get(handlers::bills::list_bill_links))
        // --- invoices ---
        .route(
            "/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(handlers::invoices::get_invoice)
                .put(handlers::invoices::update_invoice)
                .delete(handlers::invoices::delete_invoice),
        )
        .route("/invoices/{id}/links", get(handlers::invoices::list_invoice_links))
        // --- payouts ---
        .route("/payouts", get(handlers::payouts::list_payouts).post(handlers::payouts::create_payout))
        .route(
            "/payouts/{id}",
            get(handlers::payouts::get_payout)
                .put(handlers::payouts::update_payout)
                .delete(handlers::payouts::delete_payout),
        )
        .route("/payouts/{id}/links", get(handlers::payouts::list_payout_links))
        // --- transactions ---
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(handlers::transactions::get_transaction)
                .put(handlers::transactions::update_transaction)
                .delete(handlers::transactions::delete_transaction),
        )
        .route(
            "/transactions/{id}/links",
            get(handlers::transactions::list_links).post(handlers::transactions::create_link),
        )
        .route(
            "/transactions/{id}/links/{link_id}",
            delete(handlers::transactions::delete_link),
        )
        .route("/dashboard", get(handlers::dashboard::get_summary))
        // Prazo por requisição em toda a API
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            request_timeout,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/v1", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
