//! Configuration management for montage-cli.
//!
//! This module handles loading and saving configuration from `~/.montage-cli/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, DescribeTaskBy, GeneralConfig, ServerConfig, SessionConfig};
