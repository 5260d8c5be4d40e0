//! Application error types
//!
//! Every failure that is not handled inside a handler ends up as an `AppError`
//! and is rendered by the top-level boundary in `handler::router`.

use std::fmt;

use crate::engine::EvalError;

/// Boxed error returned by body collection
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum AppError {
    /// Request body could not be read (I/O failure or size limit exceeded)
    Body(BoxError),
    /// `application/json` body is not a valid `TestInput`
    InvalidJson(serde_json::Error),
    /// Form-encoded body is not valid UTF-8
    InvalidForm(std::str::Utf8Error),
    /// Form body in an encoding that is not read (`multipart/form-data`)
    UnsupportedForm(String),
    /// Result object could not be serialized
    Serialize(serde_json::Error),
    /// The evaluator raised an error
    Evaluator(EvalError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(_) => write!(f, "failed to read request body"),
            Self::InvalidJson(_) => write!(f, "invalid JSON request body"),
            Self::InvalidForm(_) => write!(f, "invalid form-encoded request body"),
            Self::UnsupportedForm(media_type) => {
                write!(f, "unsupported form encoding {media_type}, use application/x-www-form-urlencoded")
            }
            Self::Serialize(_) => write!(f, "failed to serialize response"),
            Self::Evaluator(_) => write!(f, "evaluator failed"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Body(e) => Some(e.as_ref()),
            Self::InvalidJson(e) | Self::Serialize(e) => Some(e),
            Self::InvalidForm(e) => Some(e),
            Self::Evaluator(e) => Some(e),
            Self::UnsupportedForm(_) => None,
        }
    }
}

impl From<EvalError> for AppError {
    fn from(e: EvalError) -> Self {
        Self::Evaluator(e)
    }
}

/// Collect the messages of an error and all of its sources, outermost first
pub fn error_chain(err: &dyn std::error::Error) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        chain.push(cause.to_string());
        current = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_includes_json_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::InvalidJson(cause);
        let chain = error_chain(&err);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0], "invalid JSON request body");
        assert!(chain[1].contains("EOF"));
    }

    #[test]
    fn test_eval_error_converts() {
        let err: AppError = EvalError::new("boom").into();
        assert!(matches!(err, AppError::Evaluator(_)));
        assert_eq!(error_chain(&err), vec!["evaluator failed", "boom"]);
    }

    #[test]
    fn test_unsupported_form_names_media_type() {
        let err = AppError::UnsupportedForm("multipart/form-data".to_string());
        let chain = error_chain(&err);
        assert_eq!(chain.len(), 1);
        assert!(chain[0].starts_with("unsupported form encoding multipart/form-data"));
    }
}
