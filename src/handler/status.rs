//! `/status.json` handler

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::BuildConfig;

const NOT_SET: &str = "(not set)";

/// Diagnostic payload returned by `/status.json`
#[derive(Debug, Serialize)]
pub struct StatusInfo {
    pub success: bool,
    pub tech: String,
    pub lastmod: String,
    pub commit: String,
    pub timestamp: String,
    pub version: &'static str,
    pub revision: &'static str,
    #[serde(rename = "process.arch")]
    pub arch: &'static str,
    #[serde(rename = "process.platform")]
    pub platform: &'static str,
}

/// Build the status payload; reads the wall clock, never fails
pub fn status_info(build: &BuildConfig) -> StatusInfo {
    StatusInfo {
        success: true,
        tech: format!("Rust {}", rust_version()),
        lastmod: build.lastmod.clone().unwrap_or_else(|| NOT_SET.to_string()),
        commit: build.commit.clone().unwrap_or_else(|| NOT_SET.to_string()),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: env!("CARGO_PKG_VERSION"),
        revision: option_env!("BUILD_REVISION").unwrap_or(NOT_SET),
        arch: std::env::consts::ARCH,
        platform: std::env::consts::OS,
    }
}

fn rust_version() -> &'static str {
    match env!("CARGO_PKG_RUST_VERSION") {
        "" => "(unknown)",
        v => v,
    }
}
