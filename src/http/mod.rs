//! HTTP protocol layer module
//!
//! Response builders, JSON/JSONP formatting, form decoding and HTML helpers,
//! independent of which handler produced the result.

pub mod form;
pub mod html;
pub mod jsonp;
pub mod mime;
pub mod response;

pub use form::FormFields;
pub use jsonp::format_response;
pub use response::{build_error_page_response, build_static_response, HttpResponse};
