use crate::server::unsupported_method;
use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use log::info;

pub const THANKS: &str = "Thanks";

/// Answers `200 Thanks` to GET and POST on any path, logging what came in.
/// Bodies of any size are accepted.
pub fn router() -> Router {
    Router::new()
        .fallback(echo)
        .layer(DefaultBodyLimit::disable())
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    if method != Method::GET && method != Method::POST {
        return unsupported_method(&method);
    }

    info!("{} {}", method, uri);
    for (name, value) in &headers {
        info!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    }
    info!("{:?}", String::from_utf8_lossy(&body));

    (StatusCode::OK, THANKS).into_response()
}
