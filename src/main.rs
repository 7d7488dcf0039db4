//! deskmate - Entry point
//!
//! Usage: deskmate [--data-file <path>] [--config <path>]

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deskmate::cli::Cli;
use deskmate::config::Config;
use deskmate::session::console::Console;
use deskmate::{Session, SessionOptions, Store};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with prompts
    let filter = if cli.verbose {
        EnvFilter::new("deskmate=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);

    // First Ctrl-C is handled at the next prompt; a second one aborts.
    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = interrupt.clone();
    ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        eprintln!("\n⚠️  Interrupted - press Enter to continue");
    })
    .context("failed to set interrupt handler")?;

    let attended = std::io::stdin().is_terminal() && ::console::Term::stdout().is_term();
    let options = SessionOptions {
        pause: attended,
        clear_screen: attended && config.display.clear_screen,
    };

    let console = Console::new(std::io::stdin().lock(), std::io::stdout().lock(), interrupt);
    let store = Store::new(config.storage.data_file.clone());

    let mut session = Session::open(console, store, config.assistant.name.clone(), options);
    let end = session.run().context("terminal session failed")?;
    tracing::debug!(?end, "session finished");

    Ok(())
}
