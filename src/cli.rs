//! CLI - Command Line Interface for starcatalog
//!
//! Every browser lookup is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # List films in episode order
//! starcatalog films --json
//!
//! # Starships of Episode IV, then the pilots of one of them
//! starcatalog starships 4
//! starcatalog pilots 4 "Millennium Falcon"
//! starcatalog pilots 4 3
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Catalog could not be reached or a lookup failed
    NetworkError = 3,
    /// Film or starship not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// starcatalog - browse films, their starships and pilots
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable lookups.
#[derive(Parser, Debug)]
#[command(
    name = "starcatalog",
    version,
    about = "Browse Star Wars films, starships and pilots",
    long_about = "A terminal browser for the Star Wars catalog: pick a film, \
                  see its starships, pick a starship, see its pilots, and \
                  keep a shortlist.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  starcatalog                          Launch interactive TUI\n\
                  starcatalog films --json             List films\n\
                  starcatalog starships 5              Starships of Episode V\n\
                  starcatalog pilots 4 \"x-wing\"        Pilots of a starship"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log lookups at debug level to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API root, overrides config and environment
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List films sorted by episode
    #[command(visible_alias = "f")]
    Films,

    /// Resolve the starship names of a film
    #[command(visible_alias = "s")]
    Starships(StarshipsCmd),

    /// Resolve the pilots of one of a film's starships
    #[command(visible_alias = "p")]
    Pilots(PilotsCmd),
}

/// Starships of the film with the given episode number
#[derive(Args, Debug)]
pub struct StarshipsCmd {
    /// Episode number (e.g. 4 for A New Hope)
    pub episode: u32,
}

/// Pilots of a starship appearing in a film
#[derive(Args, Debug)]
pub struct PilotsCmd {
    /// Episode number of the film
    pub episode: u32,

    /// Starship: 1-based position in the film's list, or its name
    pub starship: String,
}

impl PilotsCmd {
    /// Interpret the starship argument
    pub fn starship_ref(&self) -> StarshipRef {
        match self.starship.trim().parse::<usize>() {
            Ok(0) => StarshipRef::Invalid(self.starship.clone()),
            Ok(position) => StarshipRef::Position(position - 1),
            Err(_) if self.starship.trim().is_empty() => {
                StarshipRef::Invalid(self.starship.clone())
            }
            Err(_) => StarshipRef::Name(self.starship.trim().to_string()),
        }
    }
}

/// Parsed starship argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarshipRef {
    /// 0-based index into the film's starship references
    Position(usize),
    /// Name to match case-insensitively
    Name(String),
    /// Zero or blank
    Invalid(String),
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            success: false,
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        Ok(())
    }

    /// Print plain lines, or `data` wrapped as JSON in JSON mode
    pub fn print_lines<T: Serialize>(&self, data: T, lines: &[String]) -> anyhow::Result<()> {
        if self.json {
            return self.print(data);
        }
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
