//! Throwaway HTTP servers for poking at the client's HTTP layer by hand.

use axum::Router;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::{info, warn};
use std::net::{Ipv4Addr, SocketAddr};

pub mod echo;
pub mod server500;

pub const DEFAULT_PORT: u16 = 8000;

/// Binds `0.0.0.0:<port>` and serves `router` until Ctrl-C.
pub async fn serve(router: Router, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting server at localhost:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// HTML error page in the shape of the classic `BaseHTTPRequestHandler` one.
pub fn default_error_body(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE HTML>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {}</p>
        <p>Message: {}.</p>
        <p>Error code explanation: {} - {}.</p>
    </body>
</html>
"#,
        status.as_u16(),
        message,
        status.as_u16(),
        explanation(status)
    )
}

fn explanation(status: StatusCode) -> &'static str {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => "Server got itself in trouble",
        StatusCode::NOT_IMPLEMENTED => "Server does not support this operation",
        _ => status.canonical_reason().unwrap_or("Unknown"),
    }
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/html;charset=utf-8")],
        default_error_body(status, message),
    )
        .into_response()
}

pub fn unsupported_method(method: &Method) -> Response {
    error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ('{}')", method),
    )
}
