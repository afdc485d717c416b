//! Command implementations for montage-cli.

mod completions;
mod config;
pub mod session;

pub use completions::completions;
pub use config::config;
pub use session::{execute, run, session_form, Host, Outcome, Prefill, SessionContext};
