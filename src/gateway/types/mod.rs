//! Gateway types module
//!
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`error_codes`]: Standard error code constants

pub mod response;

pub use response::{ApiResponse, error_codes};
