//! HTTP response building module
//!
//! Builders for every response shape the server emits. None of them panic:
//! a builder failure is logged and replaced with a bare fallback response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub type HttpResponse = Response<Full<Bytes>>;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";
pub const JSONP_CONTENT_TYPE: &str = "application/javascript";

/// Build native JSON response with permissive CORS headers
pub fn build_json_response(json: String, status: StatusCode) -> HttpResponse {
    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, GET")
        .header("Access-Control-Max-Age", "604800")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build JSONP response: `callback(json)`
pub fn build_jsonp_response(callback: &str, json: &str, status: StatusCode) -> HttpResponse {
    Response::builder()
        .status(status)
        .header("Content-Type", JSONP_CONTENT_TYPE)
        .body(Full::new(Bytes::from(format!("{callback}({json})"))))
        .unwrap_or_else(|e| {
            log_build_error("JSONP", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the HTML diagnostic page response
pub fn build_error_page_response(html: String, status: StatusCode) -> HttpResponse {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from(html)))
        .unwrap_or_else(|e| {
            log_build_error("error page", &e);
            Response::new(Full::new(Bytes::from("Internal Server Error")))
        })
}

/// Build response for a preloaded static asset
pub fn build_static_response(data: Bytes, content_type: &str, is_head: bool) -> HttpResponse {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("static", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {kind} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_has_cors() {
        let resp = build_json_response("{}".to_string(), StatusCode::OK);
        let h = resp.headers();
        assert_eq!(h["Access-Control-Allow-Origin"], "*");
        assert_eq!(h["Access-Control-Allow-Methods"], "POST, GET");
        assert_eq!(h["Access-Control-Max-Age"], "604800");
    }

    #[test]
    fn test_jsonp_response_has_no_cors() {
        let resp = build_jsonp_response("cb", "{}", StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], JSONP_CONTENT_TYPE);
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_static_head_has_empty_body_but_length() {
        let resp = build_static_response(Bytes::from_static(b"abc"), "text/plain", true);
        assert_eq!(resp.headers()["Content-Length"], "3");
    }
}
