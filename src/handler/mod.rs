//! Request handler module
//!
//! Route dispatch plus the `/status.json` and `/test.json` endpoints and the
//! preloaded static assets.

pub mod router;
pub mod static_files;
pub mod status;

// Re-export main entry point
pub use router::handle_request;
