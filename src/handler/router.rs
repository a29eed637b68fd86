//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, and dispatch to the verse handlers.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::RouteHandler;

use super::kjv;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    let response = dispatch(req, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(remote_addr.ip().to_string(), method, path);
        entry.query = query;
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method, path, and the route table
async fn dispatch(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(req.method(), state.config.http.enable_cors) {
        return resp;
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    // 3. Match the path against the route table; first match wins
    let path = req.uri().path().to_string();
    let Some(handler) = state.routes.find(&path).map(|route| route.handler) else {
        return http::not_found("Not found\n");
    };

    match handler {
        RouteHandler::Verse => kjv::get_verse(req, state).await,
        RouteHandler::Chapter => kjv::get_chapter(req, state).await,
        RouteHandler::Passage => kjv::get_passage(req, state).await,
        RouteHandler::VersePath => kjv::get_verse_by_path(&path, state),
        RouteHandler::RouteList => kjv::list_routes(state),
    }
}

/// Check HTTP method and return appropriate response for non-GET/POST methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::POST => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    let exact = response.body().size_hint().exact().unwrap_or(0);
    usize::try_from(exact).unwrap_or(usize::MAX)
}
