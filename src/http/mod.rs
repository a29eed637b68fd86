//! HTTP protocol layer module
//!
//! Response builders decoupled from the verse handlers.

pub mod response;

// Re-export commonly used builders
pub use response::{
    bad_request, build_405_response, build_413_response, build_options_response, internal_error,
    json_response, not_found, plain_text,
};
