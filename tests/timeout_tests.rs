mod common;

use std::time::Duration;

use axum::{extract::State, middleware as axum_middleware, routing::get, Router};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

use accounting::{
    common::error::AppError,
    config::AppState,
    middleware::request_timeout::request_timeout,
    models::account::AccountFilter,
};
use common::*;

// Grava uma conta dentro de uma transação e demora para fazer o commit.
async fn slow_write(State(app_state): State<AppState>) -> Result<&'static str, AppError> {
    let mut tx = app_state.db_pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO accounts (name, type, opening_balance, created_at, updated_at)
        VALUES ('Half written', 'bank', 0, '2025-01-15T10:30:00Z', '2025-01-15T10:30:00Z')
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tokio::time::sleep(Duration::from_secs(5)).await;

    tx.commit().await?;
    Ok("committed")
}

async fn fast() -> &'static str {
    "fast"
}

async fn serve(app_state: AppState) -> std::net::SocketAddr {
    let app = Router::new()
        .route("/slow", get(slow_write))
        .route("/fast", get(fast))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), request_timeout))
        .with_state(app_state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn get_raw(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn deadline_answers_504_and_rolls_back_the_open_write() {
    let state = app_state_with_timeout(Duration::from_millis(100)).await;
    let addr = serve(state.clone()).await;

    let response = get_raw(addr, "/slow").await;
    assert!(response.starts_with("HTTP/1.1 504"), "{response}");
    assert!(response.contains("request timed out"));

    let accounts = state.account_service.list(&AccountFilter::default()).await.unwrap();
    assert!(accounts.is_empty());
}

#[tokio::test]
async fn requests_within_the_deadline_pass_through() {
    let state = app_state_with_timeout(Duration::from_millis(500)).await;
    let addr = serve(state).await;

    let response = get_raw(addr, "/fast").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with("fast"));
}
