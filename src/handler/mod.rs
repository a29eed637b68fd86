//! Request handler module
//!
//! Request dispatch and the verse lookup handlers.

mod kjv;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
