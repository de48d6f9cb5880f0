//! Recstore command-line shell
//!
//! ```bash
//! # Interactive prompt (asks for the password first)
//! recstore --data-dir ./data
//!
//! # Run one command and exit
//! recstore -c "show tables;"
//!
//! # Run a script of commands
//! recstore -f setup.sql
//! ```

// Use jemalloc as global allocator
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recstore::types::{DEFAULT_PASSWORD, InsertMode};
use recstore::{Output, Session, StoreConfig};

const PROMPT: &str = ">>> ";
const CONTINUATION_PROMPT: &str = "... ";

/// Recstore command-line interface
#[derive(Parser, Debug)]
#[command(name = "recstore", version, about = "Shell for the recstore record store")]
struct Args {
    /// Directory for save/load snapshot files
    #[arg(short = 'd', long, default_value = "data", env = "RECSTORE_DATA_DIR")]
    data_dir: PathBuf,

    /// Password asked for by the interactive prompt
    #[arg(short = 'W', long, env = "RECSTORE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Skip the password prompt
    #[arg(long, conflicts_with = "password")]
    no_password: bool,

    /// Reject a whole insert when any of its tuples fails
    #[arg(long)]
    strict_insert: bool,

    /// Execute a single command and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Execute commands from file and exit
    #[arg(short = 'f', long, value_name = "FILE", conflicts_with = "command")]
    file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn store_config(&self) -> StoreConfig {
        let password = if self.no_password {
            None
        } else {
            Some(
                self.password
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            )
        };
        let insert_mode = if self.strict_insert {
            InsertMode::Atomic
        } else {
            InsertMode::Partial
        };

        StoreConfig::new(&self.data_dir)
            .with_password(password)
            .with_insert_mode(insert_mode)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut session = Session::new(args.store_config());
    info!(data_dir = %session.config().data_dir.display(), "session started");

    if let Some(command) = &args.command {
        let output = session.execute(command)?;
        print_output(&output);
        Ok(())
    } else if let Some(file) = &args.file {
        run_file(&mut session, file)
    } else {
        run_repl(&mut session)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("recstore=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recstore=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn print_output(output: &Output) {
    if !matches!(output, Output::Exit) {
        println!("{output}");
    }
}

/// Run every command of a script; the first failure stops the script
fn run_file(session: &mut Session, file: &PathBuf) -> Result<()> {
    let script =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    for (lineno, line) in script.lines().enumerate() {
        match session.feed_line(line) {
            None => continue,
            Some(Ok(Output::Exit)) => return Ok(()),
            Some(Ok(output)) => print_output(&output),
            Some(Err(e)) => bail!("{}:{}: {}", file.display(), lineno + 1, e),
        }
    }

    if session.is_pending() {
        bail!("{}: last command is missing its ';'", file.display());
    }
    Ok(())
}

/// Ask for the password without echo; piped input is read as one line
fn password_accepted(config: &StoreConfig) -> Result<bool> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        let attempt = rpassword::prompt_password("Enter password: ")?;
        Ok(config.check_password(attempt.trim()))
    } else {
        Ok(config.authenticate(&mut stdin.lock())?)
    }
}

fn run_repl(session: &mut Session) -> Result<()> {
    if session.config().password.is_some() && !password_accepted(session.config())? {
        bail!("Incorrect password");
    }

    let mut rl = DefaultEditor::new().context("initializing line editor")?;

    loop {
        let prompt = if session.is_pending() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        };

        match rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match session.feed_line(&line) {
                    None => {}
                    Some(Ok(Output::Exit)) => break,
                    Some(Ok(output)) => print_output(&output),
                    Some(Err(e)) => eprintln!("Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => session.discard_pending(),
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
