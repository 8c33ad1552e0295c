//! # Agora Shared
//!
//! Wire types of the HTTP API: request and response DTOs plus the
//! standard response envelopes.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
