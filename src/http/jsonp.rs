//! JSON / JSONP response formatting
//!
//! Any result object leaves the server through `format_response`. A valid
//! `callback` query parameter turns the body into a script call, anything else
//! gets plain JSON with CORS headers.

use hyper::StatusCode;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use super::form::FormFields;
use super::response::{build_json_response, build_jsonp_response, HttpResponse};
use crate::error::AppError;

static CALLBACK_PATTERN: OnceLock<Regex> = OnceLock::new();

fn callback_pattern() -> &'static Regex {
    CALLBACK_PATTERN.get_or_init(|| {
        Regex::new(r"^[$A-Za-z_][0-9A-Za-z_$]*$").expect("callback pattern is a valid regex")
    })
}

/// Whether `name` is a bare script identifier usable as a JSONP callback
pub fn is_valid_callback(name: &str) -> bool {
    callback_pattern().is_match(name)
}

/// Extract the `callback` query parameter if it is a valid identifier
pub fn callback_from_query(query: Option<&str>) -> Option<String> {
    FormFields::from_query(query)
        .first("callback")
        .filter(|cb| is_valid_callback(cb))
        .map(ToString::to_string)
}

/// Serialize `data` and wrap it as JSON or JSONP depending on the request query
pub fn format_response<T: Serialize>(
    query: Option<&str>,
    data: &T,
    status: StatusCode,
) -> Result<HttpResponse, AppError> {
    let json = serde_json::to_string(data).map_err(AppError::Serialize)?;
    Ok(match callback_from_query(query) {
        Some(callback) => build_jsonp_response(&callback, &json, status),
        None => build_json_response(json, status),
    })
}
