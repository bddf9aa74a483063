//! Shared helpers for tests.

use std::net::SocketAddr;

use axum::{Router, http::StatusCode, routing::get};

/// Serve `body` at `/1.txt` with the given status on an ephemeral loopback
/// port and return the full URL.
pub async fn serve_source(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/1.txt", get(move || async move { (status, body) }));

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/1.txt")
}
