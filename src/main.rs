// Gritty: Time-Travel Grid Interpreter

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gritty::interpreter::constants::DEFAULT_VIEWER_STEP_LIMIT;
use gritty::ui::App;
use gritty::{Grid, Interpreter, RunConfig, RuntimeError};

#[derive(Parser)]
#[command(name = "gritty")]
#[command(about = "Run and replay programs in a two-dimensional stack language", long_about = None)]
struct Cli {
    /// Program file; each line is one grid row
    file: PathBuf,

    /// Stop after this many steps (programs without `E` never halt)
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Run without the viewer and write the output to stdout
    #[arg(long)]
    headless: bool,

    /// Memory cap for recorded history, in MiB
    #[arg(long, value_name = "MIB", default_value_t = 256)]
    snapshot_limit_mb: usize,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read '{}'", cli.file.display()))?;
    let grid = Grid::from_source(&source);
    info!(
        file = %cli.file.display(),
        rows = grid.height(),
        cols = grid.width(),
        "program loaded"
    );

    if cli.headless {
        run_headless(grid, &cli)
    } else {
        run_viewer(grid, &cli)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Run once and hand the output to stdout
fn run_headless(grid: Grid, cli: &Cli) -> anyhow::Result<ExitCode> {
    let mut config = RunConfig::default();
    if let Some(limit) = cli.max_steps {
        config = config.with_step_limit(limit);
    }

    let mut interpreter = Interpreter::new(grid, config);
    let result = interpreter.run();

    let mut stdout = io::stdout().lock();
    let code = match result {
        Ok(output) => {
            stdout.write_all(output.as_bytes())?;
            ExitCode::SUCCESS
        }
        Err(e @ RuntimeError::StackUnderflow { .. }) => {
            stdout.write_all(interpreter.output().as_str().as_bytes())?;
            error!("{}", e);
            eprintln!("Runtime error: {}", e);
            ExitCode::from(1)
        }
        Err(e @ RuntimeError::StepLimitExceeded { .. }) => {
            stdout.write_all(e.partial_output().unwrap_or_default().as_bytes())?;
            eprintln!("Runtime error: {}", e);
            ExitCode::from(2)
        }
        Err(e) => return Err(e.into()),
    };
    stdout.flush()?;
    Ok(code)
}

/// Run with history recording, then replay it in the TUI
fn run_viewer(grid: Grid, cli: &Cli) -> anyhow::Result<()> {
    let config = RunConfig::default()
        .with_history(true)
        .with_step_limit(cli.max_steps.unwrap_or(DEFAULT_VIEWER_STEP_LIMIT))
        .with_snapshot_memory_limit(cli.snapshot_limit_mb.saturating_mul(1024 * 1024));

    let mut interpreter = Interpreter::new(grid, config);

    eprintln!("Executing program...");
    let run_error = match interpreter.run() {
        Ok(_) => {
            eprintln!("Execution completed successfully.");
            eprintln!("Total snapshots: {}", interpreter.total_snapshots());
            None
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Entering TUI with partial execution history...");
            Some(e)
        }
    };

    // Rewind to the beginning for TUI
    if let Err(e) = interpreter.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter, run_error);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer failed")
}
