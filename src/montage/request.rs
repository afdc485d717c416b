//! Request building.
//!
//! Turns a command and the user's input into the JSON body Montage expects.

use chrono::{DateTime, Local};
use serde_json::json;
use url::Url;

use crate::core::{minutes_literal, parse_target};
use crate::error::MontageError;
use crate::montage::types::{MutationEnvelope, SessionCommand, UserInput};

/// Where Montage listens unless told otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4774/graphql";

/// A parsed, usable GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Parse an endpoint, insisting on an http(s) URL with a host.
    ///
    /// # Errors
    ///
    /// Returns `MontageError::Configuration` if the string can't be used to
    /// reach a server.
    pub fn parse(raw: &str) -> Result<Self, MontageError> {
        let reject = |reason: String| MontageError::Configuration {
            endpoint: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw.trim()).map_err(|e| reject(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(reject(format!("unsupported scheme '{}'", url.scheme())));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(reject("no host".to_string()));
        }

        Ok(Self(url))
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn required<'a>(value: Option<&'a String>, field: &str, cmd: SessionCommand) -> Result<&'a str, MontageError> {
    value
        .map(String::as_str)
        .ok_or_else(|| MontageError::Format(format!("{cmd} needs a {field}")))
}

/// Build the envelope for `cmd`.
///
/// Minutes go into the duration literal untouched; `now` anchors bare
/// `HH:MM` targets for `extend --to`.
///
/// # Errors
///
/// Returns `MontageError::Format` if a field the command needs is missing,
/// or if an `extend --to` target isn't a time.
pub fn build(cmd: SessionCommand, input: &UserInput, now: DateTime<Local>) -> Result<MutationEnvelope, MontageError> {
    let variables = match cmd {
        SessionCommand::Start | SessionCommand::Break => {
            let description = input.description.as_deref().unwrap_or_default();
            let minutes = required(input.minutes.as_ref(), "number of minutes", cmd)?;
            json!({
                "description": description,
                "kind": cmd.kind(),
                "duration": minutes_literal(minutes),
            })
        }
        SessionCommand::Extend => {
            let minutes = required(input.minutes.as_ref(), "number of minutes", cmd)?;
            json!({ "duration": minutes_literal(minutes) })
        }
        SessionCommand::ExtendTo => {
            let target = parse_target(required(input.target.as_ref(), "target time", cmd)?, now)?;
            json!({ "target": target.to_rfc3339() })
        }
        SessionCommand::Status => json!({}),
    };

    Ok(MutationEnvelope {
        query: cmd.document().to_string(),
        variables,
    })
}
