use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::host::{SelectedProject, SelectedTag, SelectedTask, Selection};

#[derive(Parser)]
#[command(name = "montage-cli")]
#[command(about = "Start, extend, and take breaks from Montage focus sessions")]
#[command(long_about = "montage-cli - Montage session commands

Talks to a running Montage server over GraphQL to start a focused session,
take a break, or stretch the current session a little longer.

QUICK START:
  montage-cli start \"Write report\" -m 25    Start a 25 minute session
  montage-cli break                        Take a break (prompts for details)
  montage-cli extend -m 10                 Add 10 minutes to the current session
  montage-cli status                       Show the current session

Each command asks for its details with a short form. Press Enter to keep a
default, Ctrl-D to cancel. Pass --yes to take the defaults without asking.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Montage GraphQL endpoint
    #[arg(long, env = "MONTAGE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Log filter (e.g. warn, debug, montage_cli=trace). MONTAGE_LOG wins if set
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Accept form defaults without prompting
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a focus session
    ///
    /// Prompts for a description and a length in minutes. A selected task,
    /// tag, or project (from flags or from OmniFocus) suggests the defaults.
    ///
    /// # Examples
    ///
    ///   montage-cli start
    ///   montage-cli start "Write report" -m 50
    ///   montage-cli start --task "Write report" --estimate 25
    ///   montage-cli start --omnifocus
    #[command(alias = "s")]
    Start(StartArgs),

    /// Take a break between sessions
    ///
    /// # Examples
    ///
    ///   montage-cli break
    ///   montage-cli break "Walk" -m 15
    #[command(alias = "b")]
    Break(BreakArgs),

    /// Add time to the current session
    ///
    /// # Examples
    ///
    ///   montage-cli extend -m 10
    ///   montage-cli extend --to 17:30
    #[command(alias = "e")]
    Extend(ExtendArgs),

    /// Show the current session
    Status,

    /// Inspect or create the config file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   montage-cli completions zsh > ~/.zsh/completions/_montage-cli
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// What you're working on (default for the form)
    pub description: Option<String>,

    /// How long to work, in minutes (default for the form)
    #[arg(short, long)]
    pub minutes: Option<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// The selection that seeds `start`'s defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Selected task name (repeat for several)
    #[arg(long = "task", value_name = "NAME")]
    pub tasks: Vec<String>,

    /// Estimated minutes of the selected task
    #[arg(long, requires = "tasks")]
    pub estimate: Option<u32>,

    /// Project containing the selected task
    #[arg(long, value_name = "PROJECT", requires = "tasks")]
    pub in_project: Option<String>,

    /// Selected tag (repeat for several)
    #[arg(long = "tag", value_name = "NAME")]
    pub tags: Vec<String>,

    /// Selected project (repeat for several)
    #[arg(long = "project", value_name = "NAME")]
    pub projects: Vec<String>,

    /// Read the selection from OmniFocus's front window instead
    #[arg(long, conflicts_with_all = ["tasks", "tags", "projects"])]
    pub omnifocus: bool,
}

impl SelectionArgs {
    /// The selection described by the flags.
    ///
    /// `--estimate` and `--in-project` describe the first task.
    #[must_use]
    pub fn to_selection(&self) -> Selection {
        let tasks = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, name)| SelectedTask {
                name: name.clone(),
                estimated_minutes: if i == 0 { self.estimate } else { None },
                containing_project: if i == 0 { self.in_project.clone() } else { None },
            })
            .collect();

        Selection {
            tasks,
            tags: self.tags.iter().map(|name| SelectedTag { name: name.clone() }).collect(),
            projects: self
                .projects
                .iter()
                .map(|name| SelectedProject { name: name.clone() })
                .collect(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct BreakArgs {
    /// What the break is for (default for the form)
    pub description: Option<String>,

    /// Break length in minutes (default for the form)
    #[arg(short, long)]
    pub minutes: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExtendArgs {
    /// Minutes to add (default for the form)
    #[arg(short, long, conflicts_with = "to")]
    pub minutes: Option<String>,

    /// New end time instead: HH:MM today, or an RFC 3339 timestamp
    #[arg(long, value_name = "TIME")]
    pub to: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print where the config file lives
    Path,
    /// Write a config file with every default filled in
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
