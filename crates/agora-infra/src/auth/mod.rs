//! Authentication implementations.

mod basic;
mod static_credentials;

pub use basic::parse_basic_header;
pub use static_credentials::StaticCredentialStore;
