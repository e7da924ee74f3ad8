//! Hash-fragment router CLI.
//!
//! Loads the route table from `hashroute.toml` (built-in defaults when the
//! file is missing) and drives the navigation core against an in-memory
//! location, printing route views as JSON.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use hashroute::controller::NavigationController;
use hashroute::exit_codes;
use hashroute::io::config::{DEFAULT_CONFIG_FILE, RouterConfig, load_config, write_config};
use hashroute::io::signal::{DispatchMode, MemorySignal};
use hashroute::logging;
use hashroute::script::{parse_steps, replay};

#[derive(Parser)]
#[command(name = "hashroute", version, about = "Hash-fragment navigation core")]
struct Cli {
    /// Route configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log route transitions to stderr (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default route configuration if missing.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Load the configuration and check the route table.
    Validate,
    /// Print the route view for a raw fragment (e.g. `#about`).
    Resolve {
        #[arg(allow_hyphen_values = true, default_value = "")]
        fragment: String,
    },
    /// Replay navigation steps from an empty fragment, one JSON line per step.
    ///
    /// Steps: navigate:<key>, external:<fragment>, back, forward, flush.
    Replay {
        /// When the environment delivers change notifications.
        #[arg(long, value_enum, default_value_t = Dispatch::Immediate)]
        dispatch: Dispatch,

        #[arg(required = true)]
        steps: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Dispatch {
    Immediate,
    Deferred,
}

impl From<Dispatch> for DispatchMode {
    fn from(value: Dispatch) -> Self {
        match value {
            Dispatch::Immediate => DispatchMode::Immediate,
            Dispatch::Deferred => DispatchMode::Deferred,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Validate => cmd_validate(&cli.config),
        Command::Resolve { fragment } => cmd_resolve(&cli.config, &fragment),
        Command::Replay { dispatch, steps } => cmd_replay(&cli.config, dispatch.into(), &steps),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        info!(path = %path.display(), "config exists, leaving it untouched");
        return Ok(exit_codes::OK);
    }
    write_config(path, &RouterConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    Ok(exit_codes::OK)
}

fn cmd_validate(path: &Path) -> Result<i32> {
    let cfg = load_config(path)?;
    println!("ok: {} routes, default '{}'", cfg.routes.len(), cfg.default);
    Ok(exit_codes::OK)
}

fn cmd_resolve(path: &Path, fragment: &str) -> Result<i32> {
    let table = load_config(path)?.route_table()?;
    let signal = Rc::new(MemorySignal::new(fragment));
    let controller = NavigationController::new(table, signal);
    let view = controller.view();
    print_json(&view)?;
    if view.current.is_not_found() {
        return Ok(exit_codes::NOT_FOUND);
    }
    Ok(exit_codes::OK)
}

fn cmd_replay(path: &Path, mode: DispatchMode, raw_steps: &[String]) -> Result<i32> {
    let table = load_config(path)?.route_table()?;
    let steps = parse_steps(raw_steps)?;
    let signal = Rc::new(MemorySignal::with_mode("", mode));
    let controller = NavigationController::new(table, signal.clone());
    let records = replay(&controller, &signal, &steps)?;
    for record in &records {
        print_json(record)?;
    }
    Ok(exit_codes::OK)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let line = serde_json::to_string(value).context("serialize json")?;
    println!("{line}");
    Ok(())
}
