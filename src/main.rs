use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use montage_cli::cli::args::{BreakArgs, Cli, Commands, ExtendArgs, StartArgs};
use montage_cli::cli::commands::{self, Host, Outcome, Prefill, SessionContext};
use montage_cli::config::{ColorSetting, Config, Paths};
use montage_cli::host::{DefaultsForm, FixedSelection, FormPresenter, OmniFocusSelection, SelectionSource, TerminalForm};
use montage_cli::montage::{HttpTransport, SessionCommand};
use montage_cli::output::{DesktopNotifier, Notifier, Notifiers, TerminalNotifier};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn no_selection() -> Box<dyn SelectionSource> {
    Box::new(FixedSelection::default())
}

fn init_tracing(cli: &Cli, config: &Config) {
    let filter = EnvFilter::try_from_env("MONTAGE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_deref().unwrap_or(&config.general.log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    init_tracing(&cli, &config);

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {},
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let endpoint = cli.endpoint.clone().unwrap_or_else(|| config.server.endpoint.clone());
    let accept_defaults = cli.yes;

    let (cmd, prefill, selection): (SessionCommand, Prefill, Box<dyn SelectionSource>) = match cli.command {
        Commands::Start(StartArgs {
            description,
            minutes,
            selection,
        }) => {
            let source: Box<dyn SelectionSource> = if selection.omnifocus {
                Box::new(OmniFocusSelection)
            } else {
                Box::new(FixedSelection(selection.to_selection()))
            };
            let prefill = Prefill {
                description,
                minutes,
                target: None,
            };
            (SessionCommand::Start, prefill, source)
        }
        Commands::Break(BreakArgs { description, minutes }) => {
            let prefill = Prefill {
                description,
                minutes,
                target: None,
            };
            (SessionCommand::Break, prefill, no_selection())
        }
        Commands::Extend(ExtendArgs { to: Some(target), .. }) => {
            let prefill = Prefill {
                target: Some(target),
                ..Prefill::default()
            };
            (SessionCommand::ExtendTo, prefill, no_selection())
        }
        Commands::Extend(ExtendArgs { minutes, to: None }) => {
            let prefill = Prefill {
                minutes,
                ..Prefill::default()
            };
            (SessionCommand::Extend, prefill, no_selection())
        }
        Commands::Status => (SessionCommand::Status, Prefill::default(), no_selection()),
        Commands::Config(args) => {
            let paths = Paths::new()?;
            println!("{}", commands::config(&paths, &args.command)?);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Completions { shell } => {
            print!("{}", commands::completions(shell)?);
            return Ok(ExitCode::SUCCESS);
        }
    };

    let form: &dyn FormPresenter = if accept_defaults || prefill.is_complete_for(cmd) {
        &DefaultsForm
    } else {
        &TerminalForm
    };

    let mut surfaces: Vec<Box<dyn Notifier>> = vec![Box::new(TerminalNotifier { format })];
    if config.general.desktop_notifications {
        surfaces.push(Box::new(DesktopNotifier));
    }
    let notifier = Notifiers(surfaces);

    let host = Host {
        form,
        selection: selection.as_ref(),
        notifier: &notifier,
    };
    let ctx = SessionContext {
        endpoint: &endpoint,
        defaults: &config.session,
    };

    let outcome = commands::run(cmd, &prefill, &ctx, &host, &HttpTransport::new()).await;

    Ok(match outcome {
        Outcome::Reported | Outcome::Cancelled => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}
