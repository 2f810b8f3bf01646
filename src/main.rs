mod app;
mod breakdown;
mod config;
mod domain;
mod feedback;
mod input;
mod logging;
mod notifications;
mod overdue;
mod persistence;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use breakdown::{BreakdownDispatcher, BreakdownReceiver, GeminiClient};
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{filter_tasks, format_due_local, parse_due_date, status_line, FilterMode, Task};
use persistence::{load_state, FileStore, Persister};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use store::TaskStore;

#[derive(Parser)]
#[command(name = "buddy")]
#[command(about = "A to-do list that cheers you on, roasts you, and breaks big tasks down", long_about = None)]
struct Cli {
    /// Directory holding saved tasks and the log file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "buddy=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print saved tasks
    List {
        #[arg(short, long, value_enum, default_value_t = FilterMode::All)]
        filter: FilterMode,
    },
    /// Add a task without opening the UI
    Add {
        title: String,
        /// Due date: "YYYY-MM-DD HH:MM", "YYYY-MM-DD" or "HH:MM"
        #[arg(short, long)]
        due: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::discover(cli.data_dir)?;
    logging::init_tracing(&config.log_file(), cli.log_level.as_deref())?;
    tracing::info!(data_dir = %config.data_dir().display(), "starting buddy");

    match cli.command {
        Some(Commands::List { filter }) => {
            let storage = FileStore::open(config.data_dir())?;
            let state = load_state(&storage);
            print!("{}", format_task_list(&state.tasks, filter));
            Ok(())
        }
        Some(Commands::Add { title, due }) => {
            let due = parse_due_date(due.as_deref().unwrap_or_default())?;

            let mut persister = Persister::new(Box::new(FileStore::open(config.data_dir())?));
            let saved = persister.load();
            let mut store = TaskStore::new(saved.tasks);
            if store.add_task(&title, due).is_none() {
                anyhow::bail!("Task title cannot be empty");
            }
            persister.sync(store.tasks(), store.revision(), saved.locale, saved.theme)?;
            println!("Added: {}", title.trim());
            Ok(())
        }
        None => {
            // Run the normal TUI application
            run_tui(&config)
        }
    }
}

/// Plain-text rendering of the task list for the `list` subcommand
fn format_task_list(tasks: &[Task], filter: FilterMode) -> String {
    let mut out = String::new();
    for task in filter_tasks(tasks, filter) {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        out.push_str(&format!("{} {}", checkbox, task.title));
        if let Some(due) = task.due_date {
            let prefix = if task.is_overdue(Utc::now()) { "overdue " } else { "" };
            out.push_str(&format!("  ({}{})", prefix, format_due_local(due)));
        }
        out.push('\n');
        for subtask in &task.subtasks {
            let checkbox = if subtask.completed { "[x]" } else { "[ ]" };
            out.push_str(&format!("    {} {}\n", checkbox, subtask.title));
        }
    }
    out.push_str(&status_line(tasks));
    out.push('\n');
    out
}

fn run_tui(config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let client = GeminiClient::new(&config.breakdown)?;
    if config.breakdown.api_key.is_none() {
        tracing::warn!("no API key set, breakdown requests will fail");
    }
    let (dispatcher, results) = BreakdownDispatcher::new(Arc::new(client), runtime.handle().clone());

    let storage = FileStore::open(config.data_dir())?;
    let mut app = AppState::new(Persister::new(Box::new(storage)));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &dispatcher, results);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        tracing::error!(error = %e, "failed to save on exit");
        eprintln!("Error saving state: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {}", err);
    }

    tracing::info!("exiting");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    dispatcher: &BreakdownDispatcher,
    mut results: BreakdownReceiver,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        for request in app.take_breakdown_requests() {
            dispatcher.dispatch(request);
        }
        while let Ok(finished) = results.try_recv() {
            app.apply_breakdown(finished);
        }

        // Feedback, overdue checks, autosave
        app.tick(Instant::now(), Utc::now());

        if app.feedback.take_bell() {
            let backend = terminal.backend_mut();
            write!(backend, "\x07")?;
            backend.flush()?;
        }
    }
}
