//! The user's current selection of tasks, tags and projects.
//!
//! A selection only seeds the defaults of the start form; nothing is written
//! back to it.

use serde::{Deserialize, Serialize};

use crate::config::DescribeTaskBy;
use crate::error::MontageError;
use crate::host::osascript;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTask {
    pub name: String,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub containing_project: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTag {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProject {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub tasks: Vec<SelectedTask>,
    #[serde(default)]
    pub tags: Vec<SelectedTag>,
    #[serde(default)]
    pub projects: Vec<SelectedProject>,
}

/// Defaults proposed to the user before they see the start form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub description: Option<String>,
    pub minutes: Option<String>,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.tags.is_empty() && self.projects.is_empty()
    }

    /// A selection can seed a session when it is exactly one task, one tag,
    /// or one project. Mixed or multiple selections can't.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        self.tasks.len() + self.tags.len() + self.projects.len() == 1
    }

    /// Derive form defaults from the selection.
    #[must_use]
    pub fn suggestion(&self, describe_by: DescribeTaskBy) -> Suggestion {
        if let Some(task) = self.tasks.first() {
            let description = match (describe_by, &task.containing_project) {
                (DescribeTaskBy::Project, Some(project)) => project.clone(),
                _ => task.name.clone(),
            };
            return Suggestion {
                description: Some(description),
                minutes: task.estimated_minutes.map(|m| m.to_string()),
            };
        }

        let description = self
            .tags
            .first()
            .map(|tag| tag.name.clone())
            .or_else(|| self.projects.first().map(|project| project.name.clone()));

        Suggestion {
            description,
            minutes: None,
        }
    }
}

/// Where the current selection comes from.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionSource {
    /// Read the current selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection can't be read.
    fn current(&self) -> Result<Selection, MontageError>;
}

/// A selection given up front, e.g. from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct FixedSelection(pub Selection);

impl SelectionSource for FixedSelection {
    fn current(&self) -> Result<Selection, MontageError> {
        Ok(self.0.clone())
    }
}

/// Reads the selection of OmniFocus's front window.
///
/// Uses the content area's selection, falling back to the sidebar so a
/// selected tag or project counts too.
#[derive(Debug, Clone, Copy, Default)]
pub struct OmniFocusSelection;

const OMNIFOCUS_SELECTION_SCRIPT: &str = r#"(() => {
    const of = Application('OmniFocus');
    const win = of.defaultDocument.documentWindows[0];
    let trees = win.content.selectedTrees.value();
    if (!trees || trees.length === 0) {
        trees = win.sidebar.selectedTrees.value();
    }

    const out = { tasks: [], tags: [], projects: [] };
    (trees || []).forEach(item => {
        let cls = '';
        try { cls = item.class(); } catch(e) {}

        if (cls === 'project') {
            out.projects.push({ name: item.name() });
        } else if (cls === 'tag' || cls === 'context') {
            out.tags.push({ name: item.name() });
        } else if (cls === 'task' || cls === 'inboxTask' || cls === 'flattenedTask') {
            let estimatedMinutes = null;
            try { estimatedMinutes = item.estimatedMinutes(); } catch(e) {}

            let containingProject = null;
            try {
                const p = item.containingProject();
                if (p) containingProject = p.name();
            } catch(e) {}

            out.tasks.push({
                name: item.name(),
                estimatedMinutes: estimatedMinutes || null,
                containingProject: containingProject
            });
        }
    });
    return JSON.stringify(out);
})()"#;

impl SelectionSource for OmniFocusSelection {
    fn current(&self) -> Result<Selection, MontageError> {
        osascript::execute(OMNIFOCUS_SELECTION_SCRIPT)
    }
}
