//! alertwait - ask a question on the terminal and wait for the answer.
//!
//! This binary drives the alert engine end to end: it registers one alert
//! with a confirm and a cancel action in an in-memory store, renders it on
//! the terminal, fires the action picked by the user and prints the awaited
//! resolution.
//!
//! # Usage
//!
//! ```bash
//! alertwait --title "Deploy to production?" --description "Version 1.2.0"
//! ```
//!
//! The process exits with code 0 when the user confirms and 1 when the user
//! cancels, so it can gate shell scripts.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//! - `ALERTWAIT_*` - Configuration overrides, see [`alertwait::config`]

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use alertwait::{
    alerts::{ActionArgs, AlertArgs, AlertFactory},
    config::Config,
    console,
    store::MemoryStore,
};
use anyhow::anyhow;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info};
use tokio::io::{self, BufReader};

/// Kind of alert to display.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Confirm,
    Warning,
    Success,
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to an optional YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Title of the alert.
    #[arg(short, long)]
    title: String,

    /// Description shown below the title.
    #[arg(short, long)]
    description: Option<String>,

    /// Kind of alert.
    #[arg(short, long, value_enum, default_value_t = Kind::Confirm)]
    kind: Kind,

    /// Label of the confirm action.
    #[arg(long)]
    confirm: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Displays the alert and returns whether the user cancelled it.
async fn run(args: Args) -> Result<bool, anyhow::Error> {
    let config = Config::load(args.config.as_deref())
        .map_err(|e| anyhow!("failed to load config file: {}", e))?;
    info!("starting alertwait {}...", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(MemoryStore::new());
    let factory = AlertFactory::new(store.clone(), &config);

    let confirm_label = args.confirm.unwrap_or_else(|| config.labels.confirm.clone());
    let mut alert_args = AlertArgs::new(args.title, move |actions| {
        vec![
            actions.confirm(ActionArgs::new().content(confirm_label)),
            actions.cancel(ActionArgs::new()),
        ]
    })
    .strict(true);
    if let Some(description) = args.description {
        alert_args = alert_args.description(description);
    }

    let handle = match args.kind {
        Kind::Confirm => factory.confirm(alert_args),
        Kind::Warning => factory.warning(alert_args),
        Kind::Success => factory.success(alert_args),
    };

    let alert = store
        .get(handle.id())
        .ok_or_else(|| anyhow!("alert {} was not registered", handle.id()))?;
    let mut stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    let action_id = console::prompt(&alert, &config.labels, &mut stdin, &mut stdout).await?;

    store.trigger(handle.id(), &action_id).await;
    let cancelled = handle.wait().await;
    info!("alert {} resolved, cancelled: {}", handle.id(), cancelled);

    Ok(cancelled)
}
