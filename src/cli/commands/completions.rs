//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::MontageError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script isn't valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, MontageError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "montage-cli", &mut buf);
    String::from_utf8(buf).map_err(|e| MontageError::Script(format!("completion script is not UTF-8: {e}")))
}
