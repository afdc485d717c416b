//! The `config` command.

use crate::cli::args::ConfigCommands;
use crate::config::{Config, Paths};
use crate::error::MontageError;

/// Execute a config subcommand against `paths`, returning what to print.
///
/// # Errors
///
/// Returns an error if the config file can't be read, parsed, or written,
/// or if `init` would overwrite an existing file without `force`.
pub fn config(paths: &Paths, command: &ConfigCommands) -> Result<String, MontageError> {
    match command {
        ConfigCommands::Show => Config::load_from_path(&paths.config_file)?.to_yaml(),
        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(MontageError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    paths.config_file.display()
                )));
            }

            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            Ok(format!("Wrote {}", paths.config_file.display()))
        }
    }
}
