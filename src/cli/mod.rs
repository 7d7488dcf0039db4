//! CLI module - Command-line arguments
//!
//! The organizer is interactive; arguments only adjust where data lives
//! and how chatty the logs are.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// deskmate - terminal personal organizer
///
/// Tasks, notes, a calculator and the date, kept in one local data file.
#[derive(Parser, Debug, Default)]
#[command(name = "deskmate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, env = "DESKMATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data file path (overrides config)
    #[arg(short, long, env = "DESKMATE_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Assistant name for this session (overrides config)
    #[arg(long)]
    pub assistant_name: Option<String>,
}

impl Cli {
    /// Fold command-line overrides into a loaded config
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.data_file {
            config.storage.data_file = path.clone();
        }
        if let Some(name) = &self.assistant_name {
            let name = name.trim();
            if !name.is_empty() {
                config.assistant.name = name.to_string();
            }
        }
    }
}
