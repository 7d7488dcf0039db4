//! Settings flow - names, data wipe, system info

use std::io::{BufRead, Write};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::console::Console;
use super::{AppState, SessionError};
use crate::core::store::Store;
use crate::core::InputError;

/// Exact (case-sensitive) answer that confirms the data wipe
pub const CLEAR_CONFIRMATION: &str = "DELETE";

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Menu option 7
pub fn run<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    state: &mut AppState,
    store: &Store,
) -> Result<(), SessionError> {
    con.heading("⚙️  ASSISTANT SETTINGS", 40)?;

    let rows = vec![
        SettingRow {
            name: "👤 User",
            value: state.identity.user_name.clone(),
        },
        SettingRow {
            name: "🤖 Assistant name",
            value: state.identity.assistant_name.clone(),
        },
        SettingRow {
            name: "💾 Data file",
            value: store.path().display().to_string(),
        },
        SettingRow {
            name: "📊 Data",
            value: format!("{} tasks, {} notes", state.tasks.len(), state.notes.len()),
        },
    ];
    writeln!(con, "\n{}", Table::new(rows).with(Style::rounded()))?;

    writeln!(con, "\nOptions:")?;
    writeln!(con, "1. Change assistant name")?;
    writeln!(con, "2. Change username")?;
    writeln!(con, "3. Clear all data")?;
    writeln!(con, "4. View system info")?;
    writeln!(con, "5. Back to menu")?;

    match con.prompt("\nSelect option (1-5): ")?.trim() {
        "1" => {
            let name = con.prompt("Enter new assistant name: ")?;
            let name = name.trim();
            if !name.is_empty() {
                state.identity.assistant_name = name.to_string();
                con.success(format!("Assistant name changed to: {}", name))?;
            }
            Ok(())
        }
        "2" => {
            let name = con.prompt("Enter new username: ")?;
            let name = name.trim();
            if !name.is_empty() {
                state.identity.user_name = name.to_string();
                con.success(format!("Username changed to: {}", name))?;
            }
            Ok(())
        }
        "3" => clear_all(con, state, store),
        "4" => system_info(con, store),
        "5" => Ok(()),
        other => con.error(InputError::InvalidChoice {
            input: other.to_string(),
            max: 5,
        }),
    }
}

fn clear_all<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    state: &mut AppState,
    store: &Store,
) -> Result<(), SessionError> {
    let answer = con.prompt(&format!(
        "⚠️  WARNING: This will delete ALL tasks and notes! Type '{}' to confirm: ",
        CLEAR_CONFIRMATION
    ))?;

    if answer != CLEAR_CONFIRMATION {
        return con.error("Cancelled. Data preserved.");
    }

    state.tasks.clear();
    state.notes.clear();
    tracing::info!("all tasks and notes cleared");

    match store.clear() {
        Ok(()) => con.success("All data cleared!"),
        Err(e) => con.warning(format!("Data cleared in memory, but {}", e)),
    }
}

fn system_info<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    store: &Store,
) -> Result<(), SessionError> {
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unknown)".to_string());

    writeln!(con, "\n🖥️  SYSTEM INFORMATION:")?;
    writeln!(con, "deskmate: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        con,
        "Platform: {} ({})",
        std::env::consts::OS,
        std::env::consts::ARCH
    )?;
    writeln!(con, "Current directory: {}", cwd)?;
    writeln!(con, "Data file: {}", store.path().display())?;
    writeln!(con, "Data file size: {} bytes", store.file_size())?;
    Ok(())
}
