use crate::server::{error_response, unsupported_method};
use axum::Router;
use axum::http::{Method, StatusCode};
use axum::response::Response;
use log::debug;

/// Answers `500` to GET, POST and PUT on any path.
pub fn router() -> Router {
    Router::new().fallback(fail)
}

async fn fail(method: Method) -> Response {
    if method != Method::GET && method != Method::POST && method != Method::PUT {
        return unsupported_method(&method);
    }
    debug!("{} -> 500", method);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn status_for(method: &str, uri: &str, body: &'static str) -> StatusCode {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .unwrap();
        router().oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_put_is_500_regardless_of_body() {
        assert_eq!(status_for("PUT", "/", "").await, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_for("PUT", "/", "{\"ok\": true}").await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_get_and_post_are_500_on_any_path() {
        assert_eq!(status_for("GET", "/", "").await, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_for("POST", "/accounts/x/messages", "x").await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_delete_not_implemented() {
        assert_eq!(status_for("DELETE", "/", "").await, StatusCode::NOT_IMPLEMENTED);
    }
}
