//! starcatalog - browse Star Wars films, starships and pilots
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! starcatalog
//!
//! # CLI mode (for automation)
//! starcatalog films
//! starcatalog starships 4 --json
//! starcatalog pilots 4 "Millennium Falcon"
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use starcatalog::app::App;
use starcatalog::cli::{Cli, Command, ExitCode, Output};
use starcatalog::config::Config;
use starcatalog::{commands, logging, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        let config = match &cli.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load(),
        };
        run_tui(config, cli.base_url.as_deref()).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let config = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
        },
        None => Config::load(),
    };
    logging::init_cli_logger(cli.verbose, config.log_filter());

    let mut browser = commands::browser_from(&config, cli.base_url.as_deref());

    match cli.command {
        Some(Command::Films) => commands::films_cmd(&mut browser, &output).await,

        Some(Command::Starships(cmd)) => commands::starships_cmd(cmd, &mut browser, &output).await,

        Some(Command::Pilots(cmd)) => commands::pilots_cmd(cmd, &mut browser, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config, base_url: Option<&str>) -> Result<()> {
    // Logging must not write to the terminal the TUI owns
    if let Some(path) = config.log_file() {
        if let Err(e) = logging::init_file_logger(&path, config.log_filter()) {
            eprintln!("Logging disabled: {:#}", e);
        }
    }

    let browser = commands::browser_from(&config, base_url);
    info!(policy = ?browser.policy(), "starting TUI");

    let mut terminal = init_terminal()?;

    let mut app = App::new(browser);
    app.start();

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        warn!(error = %e, "TUI exited with error");
    }
    result
}

/// Main event loop - handles input, applies finished lookups, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so lookups keep landing between keys
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick();
    }

    Ok(())
}
