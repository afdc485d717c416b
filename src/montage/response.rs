//! Response interpretation.
//!
//! Pulls the operation's result out of the GraphQL envelope and converts its
//! ISO-8601 fields into minutes and wall-clock times.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::core::{parse_end_time, parse_iso_duration, rounded_minutes};
use crate::error::MontageError;
use crate::montage::types::{
    CurrentSession, ExtendedSession, SessionCommand, SessionReport, StartedSession, UserInput,
};

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Find `data.<operation>` in a response body.
///
/// The returned value may be JSON `null` when the operation itself resolved
/// to null.
///
/// # Errors
///
/// `MontageError::EmptyResponse` for an empty or `null` body,
/// `MontageError::Protocol` for anything that isn't a GraphQL envelope
/// holding the operation.
pub fn result_object(body: &str, operation: &str) -> Result<Value, MontageError> {
    if body.trim().is_empty() {
        return Err(MontageError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Err(MontageError::EmptyResponse);
    }

    let envelope: GraphQlEnvelope = serde_json::from_value(value)?;

    let result = envelope
        .data
        .as_ref()
        .and_then(|data| data.get(operation))
        .cloned();

    if !envelope.errors.is_empty() && result.as_ref().map_or(true, Value::is_null) {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(MontageError::Protocol(messages.join("; ")));
    }

    result.ok_or_else(|| MontageError::Protocol(format!("response had no data.{operation}")))
}

fn non_null<T: DeserializeOwned>(value: Value, operation: &str) -> Result<T, MontageError> {
    if value.is_null() {
        return Err(MontageError::Protocol(format!("data.{operation} was null")));
    }
    Ok(serde_json::from_value(value)?)
}

/// Interpret a response body for `cmd`.
///
/// `input` fills in what the response leaves out, like the description of a
/// break.
///
/// # Errors
///
/// Everything `result_object` returns, plus `MontageError::Format` when a
/// duration or timestamp doesn't parse.
pub fn interpret(cmd: SessionCommand, body: &str, input: &UserInput) -> Result<SessionReport, MontageError> {
    let operation = cmd.operation();
    let value = result_object(body, operation)?;

    match cmd {
        SessionCommand::Start | SessionCommand::Break => {
            let session: StartedSession = non_null(value, operation)?;
            let duration = parse_iso_duration(&session.duration)?;

            Ok(SessionReport {
                command: cmd,
                description: session.description.or_else(|| input.description.clone()),
                kind: cmd.kind(),
                minutes: Some(rounded_minutes(duration)?),
                remaining_minutes: None,
                ends_at: Some(parse_end_time(&session.projected_end_time)?),
            })
        }
        SessionCommand::Extend | SessionCommand::ExtendTo => {
            let session: ExtendedSession = non_null(value, operation)?;

            Ok(SessionReport {
                command: cmd,
                description: session.description,
                kind: None,
                minutes: None,
                remaining_minutes: None,
                ends_at: Some(parse_end_time(&session.projected_end_time)?),
            })
        }
        SessionCommand::Status => {
            let Some(session) = serde_json::from_value::<Option<CurrentSession>>(value)? else {
                return Ok(SessionReport {
                    command: cmd,
                    description: None,
                    kind: None,
                    minutes: None,
                    remaining_minutes: None,
                    ends_at: None,
                });
            };

            let remaining_minutes = session
                .remaining_time
                .as_deref()
                .map(|remaining| parse_iso_duration(remaining).and_then(rounded_minutes))
                .transpose()?;

            Ok(SessionReport {
                command: cmd,
                description: Some(session.description),
                kind: Some(session.kind),
                minutes: Some(rounded_minutes(parse_iso_duration(&session.duration)?)?),
                remaining_minutes,
                ends_at: Some(parse_end_time(&session.projected_end_time)?),
            })
        }
    }
}
