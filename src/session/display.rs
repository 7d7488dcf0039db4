//! Screens that only render: banner, main menu, greeting, date and
//! system information.

use std::io::Write;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use colored::Colorize;

use super::AppState;

pub fn banner(out: &mut impl Write) -> std::io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "{}{}", " ".repeat(20), "🤖 PRODUCTIVITY ASSISTANT".bold())?;
    writeln!(
        out,
        "{}Version {}",
        " ".repeat(22),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out, "{}", rule)
}

pub fn main_menu(out: &mut impl Write, state: &AppState) -> std::io::Result<()> {
    let rows = [
        "1. 📝 Add Task",
        "2. ✅ View/Complete Tasks",
        "3. 📒 Add Note",
        "4. 📖 View Notes",
        "5. 🧮 Calculator",
        "6. 📅 Date & Time",
        "7. ⚙️  Settings",
        "8. 💾 Save & Exit",
    ];

    writeln!(out)?;
    writeln!(out, "  ╔══════════════════════════════════════╗")?;
    writeln!(out, "  ║      {}       ║", "🤖 PRODUCTIVITY ASSISTANT".bold())?;
    writeln!(out, "  ╠══════════════════════════════════════╣")?;
    for row in rows {
        writeln!(out, "    {}", row)?;
    }
    writeln!(out, "  ╚══════════════════════════════════════╝")?;
    writeln!(out)?;
    writeln!(out, "  👤 User: {}", state.identity.user_name.cyan())?;
    writeln!(
        out,
        "  📊 Tasks: {} | Notes: {}",
        state.tasks.len(),
        state.notes.len()
    )
}

/// Time-of-day greeting for an hour in `0..24`
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "🌅 Good morning"
    } else if hour < 18 {
        "☀️ Good afternoon"
    } else {
        "🌙 Good evening"
    }
}

/// Whole days from `now` until midnight on the first of next month
pub fn days_until_next_month(now: NaiveDateTime) -> i64 {
    let date = now.date();
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.and_hms_opt(0, 0, 0))
        .map(|first| (first - now).num_days())
        .unwrap_or(0)
}

pub fn date_time(out: &mut impl Write, now: NaiveDateTime) -> std::io::Result<()> {
    let rule = "=".repeat(40);
    writeln!(out, "\n{}\n{}\n{}", rule, "📅 DATE & TIME INFORMATION".bold(), rule)?;
    writeln!(out, "\n📆 Date: {}", now.format("%A, %B %d, %Y"))?;
    writeln!(out, "🕒 Time: {}", now.format("%I:%M:%S %p"))?;
    writeln!(out, "📅 ISO Format: {}", now.format("%Y-%m-%d"))?;
    writeln!(out, "📅 Week Number: {}", now.iso_week().week())?;
    writeln!(out, "📅 Days until next month: {}", days_until_next_month(now))?;
    writeln!(out, "\n{}", rule)
}
