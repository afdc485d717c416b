use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// What kind of session the service is running.
///
/// Only `Task` and `Break` are ever sent; the others show up in `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    Task,
    Break,
    Meeting,
    Offline,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Break => write!(f, "break"),
            Self::Meeting => write!(f, "meeting"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// A single command a user can send to Montage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionCommand {
    /// Start a task session.
    Start,
    /// Start a break.
    Break,
    /// Add minutes to the current session.
    Extend,
    /// Move the current session's end to a fixed time.
    ExtendTo,
    /// Look at the current session.
    Status,
}

const START_DOCUMENT: &str = "mutation StartMutation($description: String!, $kind: Kind!, $duration: Duration) { start(description: $description, kind: $kind, duration: $duration) { description duration projectedEndTime } }";

const BREAK_DOCUMENT: &str = "mutation StartMutation($description: String!, $kind: Kind!, $duration: Duration) { start(description: $description, kind: $kind, duration: $duration) { duration projectedEndTime } }";

const EXTEND_BY_DOCUMENT: &str = "mutation ExtendByMutation($duration: Duration!) { extendBy(duration: $duration) { projectedEndTime } }";

const EXTEND_TO_DOCUMENT: &str = "mutation ExtendToMutation($target: DateTime!) { extendTo(target: $target) { description projectedEndTime } }";

const CURRENT_SESSION_DOCUMENT: &str = "query CurrentSessionQuery { currentSession { description kind duration projectedEndTime remainingTime } }";

impl SessionCommand {
    /// Name of the field under `data` that holds the result.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Start | Self::Break => "start",
            Self::Extend => "extendBy",
            Self::ExtendTo => "extendTo",
            Self::Status => "currentSession",
        }
    }

    /// The GraphQL document sent for this command.
    #[must_use]
    pub const fn document(&self) -> &'static str {
        match self {
            Self::Start => START_DOCUMENT,
            Self::Break => BREAK_DOCUMENT,
            Self::Extend => EXTEND_BY_DOCUMENT,
            Self::ExtendTo => EXTEND_TO_DOCUMENT,
            Self::Status => CURRENT_SESSION_DOCUMENT,
        }
    }

    /// The `kind` tag, for commands that start a session.
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        match self {
            Self::Start => Some(Kind::Task),
            Self::Break => Some(Kind::Break),
            Self::Extend | Self::ExtendTo | Self::Status => None,
        }
    }

    /// Title used when the command fails.
    #[must_use]
    pub fn failure_title(&self) -> String {
        let verb = match self {
            Self::Start | Self::Break => "starting",
            Self::Extend | Self::ExtendTo => "extending",
            Self::Status => "checking",
        };
        format!("Problem {verb} session in Montage")
    }
}

impl std::fmt::Display for SessionCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Break => write!(f, "break"),
            Self::Extend => write!(f, "extend"),
            Self::ExtendTo => write!(f, "extend-to"),
            Self::Status => write!(f, "status"),
        }
    }
}

/// Values collected from the user for one command.
///
/// `minutes` is kept as the raw string the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub description: Option<String>,
    pub minutes: Option<String>,
    pub target: Option<String>,
}

/// The outbound request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationEnvelope {
    pub query: String,
    pub variables: serde_json::Value,
}

/// `start` result. Breaks don't ask for the description back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedSession {
    #[serde(default)]
    pub description: Option<String>,
    pub duration: String,
    pub projected_end_time: String,
}

/// `extendBy` / `extendTo` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedSession {
    #[serde(default)]
    pub description: Option<String>,
    pub projected_end_time: String,
}

/// `currentSession` result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSession {
    pub description: String,
    pub kind: Kind,
    pub duration: String,
    pub projected_end_time: String,
    #[serde(default)]
    pub remaining_time: Option<String>,
}

/// A response turned into display units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub command: SessionCommand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    /// Planned length, rounded to whole minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_minutes: Option<i64>,
    /// Local wall-clock end. `None` only when no session is running.
    pub ends_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_format() {
        assert_eq!(serde_json::to_string(&Kind::Task).unwrap(), "\"TASK\"");
        assert_eq!(serde_json::to_string(&Kind::Break).unwrap(), "\"BREAK\"");
        let kind: Kind = serde_json::from_str("\"BREAK\"").unwrap();
        assert_eq!(kind, Kind::Break);
    }

    #[test]
    fn test_command_kinds() {
        assert_eq!(SessionCommand::Start.kind(), Some(Kind::Task));
        assert_eq!(SessionCommand::Break.kind(), Some(Kind::Break));
        assert_eq!(SessionCommand::Extend.kind(), None);
        assert_eq!(SessionCommand::ExtendTo.kind(), None);
    }

    #[test]
    fn test_operations_match_documents() {
        for cmd in [
            SessionCommand::Start,
            SessionCommand::Break,
            SessionCommand::Extend,
            SessionCommand::ExtendTo,
            SessionCommand::Status,
        ] {
            let needle = format!("{{ {}", cmd.operation());
            assert!(cmd.document().contains(&needle), "{cmd} document lacks {needle}");
        }
    }

    #[test]
    fn test_break_does_not_select_description() {
        assert!(!SessionCommand::Break.document().contains("{ description"));
        assert!(SessionCommand::Start.document().contains("{ description duration projectedEndTime }"));
    }

    #[test]
    fn test_failure_titles() {
        assert_eq!(SessionCommand::Start.failure_title(), "Problem starting session in Montage");
        assert_eq!(SessionCommand::Extend.failure_title(), "Problem extending session in Montage");
    }
}
