//! Modal forms for collecting session input.
//!
//! A form is an ordered list of labeled string fields with optional
//! defaults. Presenting it either yields the entered values or `None` when
//! the user backs out.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::error::MontageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub confirm_label: String,
    pub fields: Vec<FormField>,
}

impl Form {
    #[must_use]
    pub fn new(title: &str, confirm_label: &str) -> Self {
        Self {
            title: title.to_string(),
            confirm_label: confirm_label.to_string(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, name: &str, label: &str, default: Option<String>) -> Self {
        self.fields.push(FormField {
            name: name.to_string(),
            label: label.to_string(),
            default,
        });
        self
    }

    /// Values made of every field's default, blank where there is none.
    #[must_use]
    pub fn defaults(&self) -> FormValues {
        FormValues(
            self.fields
                .iter()
                .map(|f| (f.name.clone(), f.default.clone().unwrap_or_default()))
                .collect(),
        )
    }
}

/// Field name to entered string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }
}

/// Something that can show a form and wait for the user.
#[cfg_attr(test, mockall::automock)]
pub trait FormPresenter {
    /// Show `form`; `Ok(None)` means the user cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the form can't be shown or read.
    fn present(&self, form: &Form) -> Result<Option<FormValues>, MontageError>;
}

/// Prompts for each field on the terminal.
///
/// An empty line keeps the default. End of input (Ctrl-D) cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalForm;

impl FormPresenter for TerminalForm {
    fn present(&self, form: &Form) -> Result<Option<FormValues>, MontageError> {
        let stdin = io::stdin();
        let stderr = io::stderr();
        Ok(prompt_fields(form, &mut stdin.lock(), &mut stderr.lock())?)
    }
}

/// Takes every default without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsForm;

impl FormPresenter for DefaultsForm {
    fn present(&self, form: &Form) -> Result<Option<FormValues>, MontageError> {
        Ok(Some(form.defaults()))
    }
}

/// Run a form over arbitrary input and output streams.
///
/// # Errors
///
/// Returns any IO error from reading or writing.
pub fn prompt_fields<R: BufRead, W: Write>(
    form: &Form,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<FormValues>> {
    writeln!(output, "{} {}", form.title.bold(), "(Ctrl-D to cancel)".dimmed())?;

    let mut values = FormValues::default();
    for field in &form.fields {
        match &field.default {
            Some(default) if !default.is_empty() => write!(output, "  {} [{}]: ", field.label, default.cyan())?,
            _ => write!(output, "  {}: ", field.label)?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        let entered = line.trim();
        let value = if entered.is_empty() {
            field.default.clone().unwrap_or_default()
        } else {
            entered.to_string()
        };
        values.insert(&field.name, &value);
    }

    writeln!(output, "{}", form.confirm_label.green())?;
    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn start_form() -> Form {
        Form::new("Start a session", "Start")
            .field("description", "Description", Some("Write report".to_string()))
            .field("minutes", "Minutes", Some("25".to_string()))
    }

    #[test]
    fn test_blank_lines_keep_defaults() {
        let mut input = Cursor::new("\n\n");
        let mut output = Vec::new();

        let values = prompt_fields(&start_form(), &mut input, &mut output).unwrap().unwrap();

        assert_eq!(values.get("description"), Some("Write report"));
        assert_eq!(values.get("minutes"), Some("25"));
    }

    #[test]
    fn test_entered_values_override() {
        let mut input = Cursor::new("  Review PRs  \n45\n");
        let mut output = Vec::new();

        let values = prompt_fields(&start_form(), &mut input, &mut output).unwrap().unwrap();

        assert_eq!(values.get("description"), Some("Review PRs"));
        assert_eq!(values.get("minutes"), Some("45"));
    }

    #[test]
    fn test_eof_cancels() {
        let mut input = Cursor::new("Review PRs\n");
        let mut output = Vec::new();

        let values = prompt_fields(&start_form(), &mut input, &mut output).unwrap();
        assert!(values.is_none());
    }

    #[test]
    fn test_prompts_show_labels() {
        let mut input = Cursor::new("\n\n");
        let mut output = Vec::new();
        prompt_fields(&start_form(), &mut input, &mut output).unwrap();

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Start a session"));
        assert!(shown.contains("Description"));
        assert!(shown.contains("Minutes"));
    }

    #[test]
    fn test_field_without_default() {
        let form = Form::new("Start a session", "Start").field("description", "Description", None);
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();

        let values = prompt_fields(&form, &mut input, &mut output).unwrap().unwrap();
        assert_eq!(values.get("description"), Some(""));
    }

    #[test]
    fn test_defaults_form() {
        let values = DefaultsForm.present(&start_form()).unwrap().unwrap();
        assert_eq!(values.get("minutes"), Some("25"));
        assert_eq!(values.get("missing"), None);
    }
}
