use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use essay_timer::cli::args::{Cli, Commands};
use essay_timer::cli::commands::{self, Context};
use essay_timer::config::{ColorSetting, Config, Paths};
use essay_timer::core::SystemClock;
use essay_timer::session::SessionEngine;
use essay_timer::storage::{Database, SqliteSessionStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "essay", &mut std::io::stdout());
        return Ok(());
    }

    let paths = Paths::new()?;
    paths.ensure_dirs()?;

    let is_tui = matches!(cli.command, Commands::Tui);
    let log_file = paths.root.join("essay.log");
    init_logging(cli.verbose, is_tui.then_some(log_file.as_path()))?;

    let config = if is_tui {
        Config::load_or_default(&paths.config_file)
    } else {
        Config::load_from_path(&paths.config_file)?
    };
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let db = Database::open(&paths)?;
    let ctx = Context {
        store: SqliteSessionStore::new(db),
        engine: SessionEngine::new(SystemClock, config.catalog),
        format: cli.output.unwrap_or(config.general.default_output),
        overrun: config.display.overrun,
    };

    if is_tui {
        essay_timer::tui::run(&ctx.store, &ctx.engine, &config.display)?;
        return Ok(());
    }

    let output = commands::dispatch(&ctx, cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Log to stderr, or to `essay.log` while the TUI owns the terminal.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default = if verbose { "essay_timer=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}
