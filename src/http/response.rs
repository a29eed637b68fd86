//! HTTP response building module
//!
//! Provides builders for the service's response shapes, decoupled from
//! specific business logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;

use crate::config::HttpConfig;

/// Build a 200 JSON response from a serializable document
///
/// A serialization failure discards the document and falls through to the
/// 500 path; no partial body is ever emitted.
pub fn json_response<T: Serialize>(doc: &T, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(doc) {
        Ok(json) => json,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return internal_error();
        }
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            internal_error()
        })
}

/// Build a 200 plain-text response
pub fn plain_text(content: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            internal_error()
        })
}

/// Build 400 Bad Request response
pub fn bad_request(message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(400)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            internal_error()
        })
}

/// Build 404 Not Found response with a caller-chosen body
pub fn not_found(message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            internal_error()
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, POST, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            internal_error()
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, POST, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        internal_error()
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            internal_error()
        })
}

/// Build 500 Internal Server Error response
pub fn internal_error() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from("Internal server error\n")));
    *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config(enable_cors: bool) -> HttpConfig {
        HttpConfig {
            server_name: "kjv-server/0.1".to_string(),
            enable_cors,
            max_body_size: 65_536,
        }
    }

    #[test]
    fn test_json_response_headers() {
        let doc = serde_json::json!({"book": 1});
        let response = json_response(&doc, &http_config(false));
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_json_response_cors_header() {
        let doc = serde_json::json!({"book": 1});
        let response = json_response(&doc, &http_config(true));
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn test_not_found_keeps_caller_body() {
        let response = not_found("Verse not found\n");
        assert_eq!(response.status(), 404);
    }

    #[test]
    fn test_options_without_cors_has_no_cors_headers() {
        let response = build_options_response(false);
        assert_eq!(response.status(), 204);
        assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_internal_error_status() {
        assert_eq!(internal_error().status(), 500);
    }
}
