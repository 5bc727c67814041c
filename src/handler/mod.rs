//! Request handler module
//!
//! Routes requests to the static page assets or the analysis endpoint.

pub mod analyze;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
