use std::path::PathBuf;
use clap::{Parser, Subcommand};
use anyhow::{Context, Result};
use log::{debug, warn};
use crate::cli::output::{format_command, format_task_table, is_tty};
use crate::cli::prompt::TerminalPrompter;
use crate::config::Settings;
use crate::dispatch::Dispatcher;
use crate::exec::{Executor, ProcessExecutor};
use crate::models::{ActionFields, ActionKind, ActionRequest, Outcome};
use crate::snapshot::{SnapshotStore, DEFAULT_WINDOW};

#[derive(Parser)]
#[command(name = "twb")]
#[command(about = "Timewarrior bridge - start, stop, track and fix tracked time")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Config file (defaults to ~/.twbridge/rc)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Print the tracker commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start tracking a task
    Start {
        /// Start time (HH:MM), defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Task description
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },
    /// Start tracking the meeting on the calendar right now
    Meeting,
    /// Record a finished task
    Track {
        /// Start time (HH:MM)
        start: String,
        /// Stop time (HH:MM)
        stop: String,
        /// Day the task happened (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Task description
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },
    /// Stop tracking
    Stop {
        /// Stop time (HH:MM), defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Change the start or end time of a task
    Modify {
        /// Row from the task list (defaults to the most recent task)
        #[arg(long)]
        row: Option<usize>,
        /// New start time (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// New end time (HH:MM)
        #[arg(long)]
        end: Option<String>,
    },
    /// Rename a task
    Rename {
        /// Row from the task list (defaults to the most recent task)
        #[arg(long)]
        row: Option<usize>,
        /// New description; prompts when omitted
        #[arg(long)]
        to: Option<String>,
    },
    /// Resume a task
    Continue {
        /// Row from the task list (defaults to the most recent task)
        #[arg(long)]
        row: Option<usize>,
    },
    /// Delete a task
    Delete {
        /// Row from the task list (defaults to the most recent task)
        #[arg(long)]
        row: Option<usize>,
    },
    /// Show details of a task
    Details {
        /// Row from the task list (defaults to the most recent task)
        #[arg(long)]
        row: Option<usize>,
    },
    /// Track one of today's calendar entries
    CalendarTrack {
        /// Entry number; prompts when omitted
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Move the latest task's start to the current meeting's start
    FixStart,
    /// Show today's tasks
    #[command(visible_alias = "list")]
    Refresh,
    /// Show what is being tracked right now
    Status,
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Join description words (e.g., ["Write", "spec"] -> "Write spec")
fn join_description(words: Vec<String>) -> String {
    words.join(" ").trim().to_string()
}

impl Commands {
    /// Translate a subcommand into the front-end-neutral request.
    /// Returns `None` for commands that are not actions.
    pub fn to_request(&self) -> Option<ActionRequest> {
        let (kind, fields) = match self {
            Commands::Start { at, description } => (
                ActionKind::Start,
                ActionFields {
                    start_time: text(at.clone()),
                    description: join_description(description.clone()),
                    ..ActionFields::default()
                },
            ),
            Commands::Meeting => (ActionKind::StartMeeting, ActionFields::default()),
            Commands::Track { start, stop, date, description } => (
                ActionKind::Track,
                ActionFields {
                    date: text(date.clone()),
                    start_time: start.clone(),
                    stop_time: stop.clone(),
                    description: join_description(description.clone()),
                    selected_row: None,
                },
            ),
            Commands::Stop { at } => (
                ActionKind::Stop,
                ActionFields { stop_time: text(at.clone()), ..ActionFields::default() },
            ),
            Commands::Modify { row, start, end } => (
                ActionKind::Modify,
                ActionFields {
                    start_time: text(start.clone()),
                    stop_time: text(end.clone()),
                    selected_row: *row,
                    ..ActionFields::default()
                },
            ),
            Commands::Rename { row, .. } => (
                ActionKind::Rename,
                ActionFields { selected_row: *row, ..ActionFields::default() },
            ),
            Commands::Continue { row } => (
                ActionKind::Continue,
                ActionFields { selected_row: *row, ..ActionFields::default() },
            ),
            Commands::Delete { row } => (
                ActionKind::Delete,
                ActionFields { selected_row: *row, ..ActionFields::default() },
            ),
            Commands::Details { row } => (
                ActionKind::Details,
                ActionFields { selected_row: *row, ..ActionFields::default() },
            ),
            Commands::CalendarTrack { .. } => (ActionKind::CalendarTrack, ActionFields::default()),
            Commands::FixStart => (ActionKind::FixStart, ActionFields::default()),
            Commands::Refresh => (ActionKind::Refresh, ActionFields::default()),
            Commands::Status => return None,
        };
        Some(ActionRequest::new(kind, fields))
    }
}

fn init_logging(settings: &Settings) {
    let env = env_logger::Env::default().default_filter_or(settings.log_level.as_str());
    let _ = env_logger::Builder::from_env(env).try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&settings);
    debug!("settings: {:?}", settings);

    let executor = ProcessExecutor::new(settings.timeout());

    let Some(request) = cli.command.to_request() else {
        let active = SnapshotStore::new(&executor, settings.tracker_command.clone()).active_timer()?;
        println!("Current Tracking: {}", active);
        return Ok(());
    };

    let mut prompter = TerminalPrompter::stdio();
    if let Commands::Rename { to, .. } = &cli.command {
        prompter = prompter.with_rename_to(to.clone());
    }
    if let Commands::CalendarTrack { pick } = &cli.command {
        prompter = prompter.with_pick(*pick);
    }

    let dispatcher = Dispatcher::new(&executor, &settings);
    let outcome = dispatcher.dispatch(&request, &mut prompter)?;

    if cli.dry_run {
        print_dry_run(&outcome);
        return Ok(());
    }

    let output = dispatcher.execute(&outcome)?;
    println!("{}", outcome.status);
    if !output.trim().is_empty() {
        println!("{}", output.trim_end());
    }
    if let Some(details) = &outcome.details {
        println!("{}", details);
        return Ok(());
    }

    print_current_state(&executor, &settings);
    Ok(())
}

fn print_dry_run(outcome: &Outcome) {
    for argv in &outcome.commands {
        println!("{}", format_command(argv));
    }
    println!("{}", outcome.status);
    if let Some(details) = &outcome.details {
        println!("{}", details);
    }
}

/// Re-read the tracker after a change. A failure here does not undo the
/// action, so it is reported and otherwise ignored.
fn print_current_state(executor: &dyn Executor, settings: &Settings) {
    let store = SnapshotStore::new(executor, settings.tracker_command.clone());
    match store.refresh(DEFAULT_WINDOW) {
        Ok(snapshot) => println!("\n{}", format_task_table(&snapshot, is_tty())),
        Err(e) => warn!("Could not refresh task list: {}", e),
    }
    match store.active_timer() {
        Ok(active) => println!("\nCurrent Tracking: {}", active),
        Err(e) => warn!("Could not read active tracking: {}", e),
    }
}
