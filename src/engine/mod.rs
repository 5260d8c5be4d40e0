//! Regex evaluation engine
//!
//! Defines the `TestInput` / `TestOutput` value types exchanged with an
//! evaluator, and the `Evaluator` trait the test handler delegates to.

mod regex_engine;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use regex_engine::RegexEvaluator;

/// Engine identifier used when a request does not name one
pub const DEFAULT_ENGINE: &str = "rust";

/// Canonical test request, built fresh for every call to `/test.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestInput {
    pub engine: String,
    pub regex: String,
    pub replacement: String,
    pub options: Vec<String>,
    pub inputs: Vec<String>,
    /// Engine-specific extra arguments (JSON requests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<String>>,
}

impl Default for TestInput {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            regex: String::new(),
            replacement: String::new(),
            options: Vec::new(),
            inputs: Vec::new(),
            extras: None,
        }
    }
}

/// Result of evaluating a `TestInput`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutput {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TestOutput {
    pub const fn success(html: String) -> Self {
        Self {
            success: true,
            html: Some(html),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            html: None,
            message: Some(message.into()),
        }
    }
}

/// Error raised by an evaluator. Not caught by the test handler.
#[derive(Debug)]
pub struct EvalError {
    message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

/// Something that can run a regex test
///
/// Handled failures (bad pattern, nothing to test) are returned as
/// `Ok(TestOutput { success: false, .. })`. `Err` is reserved for faults the
/// evaluator itself cannot describe as a result.
pub trait Evaluator: Send + Sync {
    fn run_test(&self, input: &TestInput) -> Result<TestOutput, EvalError>;
}
