//! CRM Lite CLI entry point.

use std::process::ExitCode;
use std::rc::Rc;
use std::sync::atomic::Ordering;

use clap::Parser;
use crm::cli::commands;
use crm::cli::{Cli, Commands};
use crm::config::{self, AppConfig};
use crm::error::Error;
use crm::storage::{KeyValueStore, MemoryKv, SqliteKv};
use crm::App;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.silent {
        crm::SILENT.store(true, Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json || !cli.quiet {
                commands::report_error(&e, cli.json);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    // Commands that never touch stored state.
    match &cli.command {
        Commands::Version => return commands::version::execute(cli.json),
        Commands::Completions { shell } => return commands::completions::execute(shell),
        _ => {}
    }

    let kv = open_store(cli)?;
    let mut app = App::open(kv, AppConfig::with_latency_ms(cli.latency_ms)?)?;
    let result = commands::dispatch(&mut app, &cli.command, cli.json);
    app.shutdown();
    result
}

fn open_store(cli: &Cli) -> Result<Rc<dyn KeyValueStore>, Error> {
    if cli.ephemeral {
        return Ok(Rc::new(MemoryKv::new()));
    }
    let path = config::resolve_db_path(cli.db.as_deref())
        .ok_or_else(|| Error::Config("No home directory; pass --db or set CRM_DB".to_string()))?;
    tracing::debug!(path = %path.display(), "Opening store");
    Ok(Rc::new(SqliteKv::open(&path)?))
}
