//! Capabilities supplied by whatever hosts a session command.
//!
//! Forms collect input, selection sources seed defaults. Both are traits so
//! the command flow can run against a terminal, OmniFocus, or a test double.

pub mod form;
pub mod osascript;
pub mod selection;

pub use form::{DefaultsForm, Form, FormField, FormPresenter, FormValues, TerminalForm};
pub use selection::{
    FixedSelection, OmniFocusSelection, SelectedProject, SelectedTag, SelectedTask, Selection,
    SelectionSource, Suggestion,
};
