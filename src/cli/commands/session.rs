//! Session command flow.
//!
//! Each command runs the same straight line: collect input, build the
//! request, send it, interpret the response, report. `run` is the one place
//! where failures are caught, logged and shown.

use chrono::Local;
use tracing::{debug, error, info};

use crate::config::SessionConfig;
use crate::error::MontageError;
use crate::host::{Form, FormPresenter, FormValues, Selection, SelectionSource};
use crate::montage::{self, Endpoint, SessionCommand, SessionReport, Transport, UserInput};
use crate::output::{Notice, Notifier};

/// Capabilities a session command runs against.
pub struct Host<'a> {
    pub form: &'a dyn FormPresenter,
    pub selection: &'a dyn SelectionSource,
    pub notifier: &'a dyn Notifier,
}

/// Settings a session command needs.
pub struct SessionContext<'a> {
    pub endpoint: &'a str,
    pub defaults: &'a SessionConfig,
}

/// Values given on the command line, used as form defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefill {
    pub description: Option<String>,
    pub minutes: Option<String>,
    pub target: Option<String>,
}

impl Prefill {
    /// Whether every field of `cmd`'s form already has a value.
    #[must_use]
    pub const fn is_complete_for(&self, cmd: SessionCommand) -> bool {
        match cmd {
            SessionCommand::Start | SessionCommand::Break => {
                self.description.is_some() && self.minutes.is_some()
            }
            SessionCommand::Extend => self.minutes.is_some(),
            SessionCommand::ExtendTo => self.target.is_some(),
            SessionCommand::Status => true,
        }
    }
}

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reported,
    Cancelled,
    Failed,
}

/// The form shown for `cmd`, or `None` if it takes no input.
#[must_use]
pub fn session_form(
    cmd: SessionCommand,
    prefill: &Prefill,
    selection: &Selection,
    defaults: &SessionConfig,
) -> Option<Form> {
    match cmd {
        SessionCommand::Start => {
            let suggestion = selection.suggestion(defaults.describe_task_by);
            let description = prefill.description.clone().or(suggestion.description);
            let minutes = prefill
                .minutes
                .clone()
                .or(suggestion.minutes)
                .unwrap_or_else(|| defaults.task_minutes.to_string());

            Some(
                Form::new("Start a session", "Start")
                    .field("description", "Description", description)
                    .field("minutes", "Minutes", Some(minutes)),
            )
        }
        SessionCommand::Break => {
            let description = prefill
                .description
                .clone()
                .unwrap_or_else(|| defaults.break_description.clone());
            let minutes = prefill
                .minutes
                .clone()
                .unwrap_or_else(|| defaults.break_minutes.to_string());

            Some(
                Form::new("Take a break", "Start")
                    .field("description", "Description", Some(description))
                    .field("minutes", "Minutes", Some(minutes)),
            )
        }
        SessionCommand::Extend => {
            let minutes = prefill
                .minutes
                .clone()
                .unwrap_or_else(|| defaults.extend_minutes.to_string());

            Some(Form::new("Extend session", "Extend").field("minutes", "Minutes", Some(minutes)))
        }
        SessionCommand::ExtendTo => Some(
            Form::new("Extend session", "Extend").field("target", "Until (HH:MM)", prefill.target.clone()),
        ),
        SessionCommand::Status => None,
    }
}

fn user_input(values: &FormValues) -> UserInput {
    UserInput {
        description: values.get("description").map(ToString::to_string),
        minutes: values.get("minutes").map(ToString::to_string),
        target: values.get("target").map(ToString::to_string),
    }
}

/// Run a command up to, but not including, reporting.
///
/// Returns `Ok(None)` when the user cancelled the form; nothing was sent.
///
/// # Errors
///
/// Any failure from any stage, unchanged.
pub async fn execute<T: Transport>(
    cmd: SessionCommand,
    prefill: &Prefill,
    ctx: &SessionContext<'_>,
    host: &Host<'_>,
    transport: &T,
) -> Result<Option<SessionReport>, MontageError> {
    let selection = if cmd == SessionCommand::Start {
        let selection = host.selection.current()?;
        if !selection.is_empty() && !selection.is_applicable() {
            return Err(MontageError::Selection(
                "select exactly one task, one tag, or one project to start a session".to_string(),
            ));
        }
        selection
    } else {
        Selection::default()
    };

    let input = match session_form(cmd, prefill, &selection, ctx.defaults) {
        Some(form) => match host.form.present(&form)? {
            Some(values) => user_input(&values),
            None => {
                debug!(command = %cmd, "form cancelled");
                return Ok(None);
            }
        },
        None => UserInput::default(),
    };

    let endpoint = Endpoint::parse(ctx.endpoint)?;
    let envelope = montage::build(cmd, &input, Local::now())?;
    let body = transport.send(&endpoint, &envelope, &cmd.failure_title()).await?;
    let report = montage::interpret(cmd, &body, &input)?;

    Ok(Some(report))
}

/// Run a command and report its result through the host's notifier.
///
/// Failures are logged and shown exactly once, here.
pub async fn run<T: Transport>(
    cmd: SessionCommand,
    prefill: &Prefill,
    ctx: &SessionContext<'_>,
    host: &Host<'_>,
    transport: &T,
) -> Outcome {
    let (notice, outcome) = match execute(cmd, prefill, ctx, host, transport).await {
        Ok(Some(report)) => {
            info!(command = %cmd, ?report, "session command finished");
            (Notice::success(&report), Outcome::Reported)
        }
        Ok(None) => return Outcome::Cancelled,
        Err(err) => {
            error!(command = %cmd, error = %err, "session command failed");
            (Notice::failure(cmd, &err), Outcome::Failed)
        }
    };

    if let Err(e) = host.notifier.notify(&notice) {
        error!(error = %e, "could not show result");
        return Outcome::Failed;
    }

    outcome
}
