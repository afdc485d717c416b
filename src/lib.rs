//! montage-cli - session commands for Montage
//!
//! This crate starts, extends, and takes breaks from Montage focus sessions
//! by sending GraphQL mutations to a running Montage server.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod montage;
pub mod output;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::MontageError;
pub use montage::{HttpTransport, SessionCommand};
