//! Reporting results to the user.
//!
//! Every command ends in exactly one `Notice`: a confirmation built from the
//! interpreted session, or a failure built from the error that stopped it.

mod desktop;
mod json;
mod pretty;

use serde::Serialize;
use tracing::warn;

use crate::cli::args::OutputFormat;
use crate::core::format_clock;
use crate::error::MontageError;
use crate::montage::{SessionCommand, SessionReport};

pub use desktop::DesktopNotifier;
pub use json::*;
pub use pretty::*;

/// A message for the user's notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub ok: bool,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionReport>,
}

fn quoted(description: Option<&str>) -> Option<String> {
    description
        .filter(|d| !d.trim().is_empty())
        .map(|d| format!("\"{d}\""))
}

impl Notice {
    /// Confirmation for a finished command.
    #[must_use]
    pub fn success(report: &SessionReport) -> Self {
        let until = report
            .ends_at
            .as_ref()
            .map(format_clock)
            .unwrap_or_default();
        let minutes = report.minutes.unwrap_or_default();
        let description = quoted(report.description.as_deref());

        let (title, message) = match report.command {
            SessionCommand::Start => (
                "Started session",
                format!(
                    "Started {} for {minutes} minutes, until {until}",
                    description.unwrap_or_else(|| "session".to_string())
                ),
            ),
            SessionCommand::Break => (
                "Started break",
                match description {
                    Some(d) => format!("Started break {d} for {minutes} minutes, until {until}"),
                    None => format!("Started break for {minutes} minutes, until {until}"),
                },
            ),
            SessionCommand::Extend | SessionCommand::ExtendTo => (
                "Extended session",
                format!(
                    "Extended {} until {until}",
                    description.unwrap_or_else(|| "session".to_string())
                ),
            ),
            SessionCommand::Status if report.ends_at.is_none() => {
                ("No session", "No session running".to_string())
            }
            SessionCommand::Status => {
                let kind = report.kind.map(|k| format!(" ({k})")).unwrap_or_default();
                let left = report
                    .remaining_minutes
                    .map(|r| format!(", {r} minutes left"))
                    .unwrap_or_default();
                (
                    "Current session",
                    format!(
                        "{}{kind}, {minutes} minutes{left}, until {until}",
                        description.unwrap_or_else(|| "Session".to_string())
                    ),
                )
            }
        };

        Self {
            ok: true,
            title: title.to_string(),
            message,
            session: Some(report.clone()),
        }
    }

    /// Failure notice; the body is the error's own text.
    #[must_use]
    pub fn failure(cmd: SessionCommand, err: &MontageError) -> Self {
        Self {
            ok: false,
            title: cmd.failure_title(),
            message: err.to_string(),
            session: None,
        }
    }
}

/// A surface that can show a notice without blocking on the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Show `notice`.
    ///
    /// # Errors
    ///
    /// Returns an error if the notice couldn't be delivered.
    fn notify(&self, notice: &Notice) -> Result<(), MontageError>;
}

/// Writes notices to the terminal in the chosen output format.
///
/// Pretty failures go to stderr; everything else goes to stdout.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    pub format: OutputFormat,
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), MontageError> {
        let text = format_notice(notice, self.format)?;
        if notice.ok || self.format == OutputFormat::Json {
            println!("{text}");
        } else {
            eprintln!("{text}");
        }
        Ok(())
    }
}

/// Fans a notice out to several surfaces.
///
/// The first surface is the primary one and its failure is returned. Later
/// surfaces are best effort.
pub struct Notifiers(pub Vec<Box<dyn Notifier>>);

impl Notifier for Notifiers {
    fn notify(&self, notice: &Notice) -> Result<(), MontageError> {
        let mut surfaces = self.0.iter();

        if let Some(primary) = surfaces.next() {
            primary.notify(notice)?;
        }

        for extra in surfaces {
            if let Err(e) = extra.notify(notice) {
                warn!(error = %e, "could not deliver notification");
            }
        }

        Ok(())
    }
}

/// Format a notice for the given output format.
///
/// # Errors
///
/// Returns `MontageError::Protocol` if JSON serialization fails.
pub fn format_notice(notice: &Notice, format: OutputFormat) -> Result<String, MontageError> {
    match format {
        OutputFormat::Pretty => Ok(format_notice_pretty(notice)),
        OutputFormat::Json => format_notice_json(notice),
    }
}
