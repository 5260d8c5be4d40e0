//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: static routes, endpoint dispatch,
//! the 404 payload, the error boundary and access logging.

use hyper::body::Body;
use hyper::header::{HeaderValue, CONTENT_TYPE, SERVER, USER_AGENT};
use hyper::{Method, Request, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::{regex_test, static_files, status};
use crate::config::AppState;
use crate::error::{AppError, BoxError};
use crate::http::html::render_error_page;
use crate::http::response::JSONP_CONTENT_TYPE;
use crate::http::{self, format_response, HttpResponse};
use crate::logger::{self, AccessLogEntry};

/// Payload for any path without a handler
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFound {
    pub success: bool,
    pub code: &'static str,
    pub status_code: u16,
    pub message: String,
}

impl NotFound {
    pub fn new(path: &str) -> Self {
        Self {
            success: false,
            code: "ENOTFOUND",
            status_code: 404,
            message: format!("Not Found: {path}"),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Never fails: every `AppError` is rendered as the HTML diagnostic page.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let version = req.version();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    logger::log_debug(&format!(
        "{method} {path} from {peer_addr} content-type={}",
        req.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
    ));

    let mut response = match route_request(req, &state).await {
        Ok(resp) => resp,
        Err(err) => {
            logger::log_error(&format!("{method} {path}: {}", crate::error::error_chain(&err).join(": ")));
            render_error(&err, &method, &path, &state)
        }
    };

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = format!("{version:?}").trim_start_matches("HTTP/").to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.user_agent = user_agent;
        entry.jsonp = response.headers().get(CONTENT_TYPE).is_some_and(|v| v == JSONP_CONTENT_TYPE);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path; static routes only answer GET and HEAD
pub async fn route_request<B>(req: Request<B>, state: &AppState) -> Result<HttpResponse, AppError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    if matches!(*req.method(), Method::GET | Method::HEAD) {
        if let Some(asset) = state.assets.get(&path) {
            return Ok(static_files::serve_asset(asset, *req.method() == Method::HEAD));
        }
    }

    match path.as_str() {
        "/status.json" => format_response(
            query.as_deref(),
            &status::status_info(&state.config.build),
            StatusCode::OK,
        ),
        "/test.json" => {
            let output = regex_test::handle_test(req, state).await?;
            format_response(query.as_deref(), &output, StatusCode::OK)
        }
        _ => format_response(query.as_deref(), &NotFound::new(&path), not_found_status(state)),
    }
}

const fn not_found_status(state: &AppState) -> StatusCode {
    if state.config.http.strict_status {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

/// Error boundary: render the diagnostic page
fn render_error(err: &AppError, method: &Method, path: &str, state: &AppState) -> HttpResponse {
    let status = if state.config.http.strict_status {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    let page = render_error_page(err, method.as_str(), path, state.verbose_errors());
    http::build_error_page_response(page, status)
}
