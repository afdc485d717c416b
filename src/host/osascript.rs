use std::process::Command;

use serde::de::DeserializeOwned;

use crate::error::MontageError;

/// Run a JXA script and parse its JSON result.
pub fn execute<T: DeserializeOwned>(script: &str) -> Result<T, MontageError> {
    let stdout = run(script)?;
    let trimmed = stdout.trim();

    if trimmed.is_empty() {
        return Err(MontageError::Script("script produced no output".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| MontageError::Script(format!("unexpected script output: {e}")))
}

/// Run a JXA script that returns nothing.
pub fn execute_void(script: &str) -> Result<(), MontageError> {
    run(script).map(|_| ())
}

fn run(script: &str) -> Result<String, MontageError> {
    let output = Command::new("osascript")
        .arg("-l")
        .arg("JavaScript")
        .arg("-e")
        .arg(script)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MontageError::from_stderr(&stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Quote a string as a JavaScript literal.
pub fn js_string(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes() {
        let cases = [
            ("hello", "'hello'"),
            ("it's", "'it\\'s'"),
            ("back\\slash", "'back\\\\slash'"),
            ("line1\nline2\tend", "'line1\\nline2\\tend'"),
        ];
        for (input, expected) in cases {
            assert_eq!(js_string(input), expected, "escaping {input:?}");
        }
    }

    #[test]
    fn test_notification_text_survives_quotes() {
        let literal = js_string("Started \"Write report\" for 25 minutes");
        assert!(literal.starts_with('\''));
        assert!(literal.contains("\"Write report\""));
    }
}
