//! Error types for montage-cli.
//!
//! Every stage of a session command returns `Result<_, MontageError>` and
//! propagates failures unchanged; `cli::commands::session::run` is the single
//! place that logs and reports them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MontageError {
    /// The configured endpoint could not be turned into a network address.
    #[error("could not parse the URL for the Montage API ({endpoint}): {reason}")]
    Configuration { endpoint: String, reason: String },

    /// The request never produced a response.
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a failure status and no JSON to interpret.
    #[error("{context}: server returned HTTP {status}")]
    HttpStatus { context: String, status: u16 },

    /// The call succeeded at the network layer but carried no body.
    #[error("body was empty. Did the request succeed?")]
    EmptyResponse,

    /// The body was not the GraphQL envelope we expected.
    #[error("unexpected response from Montage: {0}")]
    Protocol(String),

    /// A duration or timestamp did not match its expected format.
    #[error("{0}")]
    Format(String),

    /// The current selection can't seed a session.
    #[error("{0}")]
    Selection(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("script failed: {0}")]
    Script(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MontageError {
    /// Build an error from the stderr of a failed `osascript` run.
    #[must_use]
    pub fn from_stderr(stderr: &str) -> Self {
        let message = stderr.trim();

        if message.contains("Application isn't running") || message.contains("(-600)") {
            Self::Selection("OmniFocus is not running".to_string())
        } else if message.contains("Not authorized") || message.contains("(-1743)") {
            Self::Selection(
                "not allowed to control OmniFocus. Grant access under System Settings > Privacy & Security > Automation"
                    .to_string(),
            )
        } else {
            Self::Script(message.to_string())
        }
    }

    /// Whether the failure happened before or during the network call.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::HttpStatus { .. })
    }
}

impl From<serde_json::Error> for MontageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stderr_not_running() {
        let err = MontageError::from_stderr("execution error: Application isn't running. (-600)");
        assert!(matches!(err, MontageError::Selection(_)));
        assert_eq!(err.to_string(), "OmniFocus is not running");
    }

    #[test]
    fn test_from_stderr_permission() {
        let err = MontageError::from_stderr("execution error: Not authorized to send Apple events (-1743)");
        assert!(matches!(err, MontageError::Selection(_)));
    }

    #[test]
    fn test_from_stderr_other() {
        let err = MontageError::from_stderr("  syntax error  \n");
        match err {
            MontageError::Script(msg) => assert_eq!(msg, "syntax error"),
            other => panic!("expected script error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_response_is_not_transport() {
        assert!(!MontageError::EmptyResponse.is_transport());
        assert!(MontageError::HttpStatus {
            context: "x".to_string(),
            status: 502
        }
        .is_transport());
    }

    #[test]
    fn test_configuration_message() {
        let err = MontageError::Configuration {
            endpoint: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.to_string().starts_with("could not parse the URL for the Montage API"));
    }
}
