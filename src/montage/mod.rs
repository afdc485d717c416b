//! Montage GraphQL protocol client.
//!
//! Builds session mutations, ships them over HTTP, and interprets what comes
//! back.

pub mod client;
pub mod request;
pub mod response;
pub mod types;

pub use client::{HttpTransport, Transport};
pub use request::{build, Endpoint, DEFAULT_ENDPOINT};
pub use response::interpret;
pub use types::*;
