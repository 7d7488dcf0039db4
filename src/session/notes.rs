//! Note flow

use std::io::{BufRead, Write};

use colored::Colorize;

use super::console::Console;
use super::SessionError;
use crate::core::note::NoteRegistry;
use crate::core::InputError;

/// Menu option 3
pub fn add<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    notes: &mut NoteRegistry,
) -> Result<(), SessionError> {
    con.heading("📒 ADD NEW NOTE", 40)?;

    let text = con.prompt("Enter your note: ")?;
    if text.trim().is_empty() {
        return con.error(InputError::EmptyNote);
    }
    let category = con.prompt("Category (Work/Personal/Ideas/etc): ")?;

    match notes.add(&text, &category) {
        Ok(note) => {
            let summary = format!("   ID: {} | Category: {}", note.id, note.category);
            writeln!(con, "\n📝 {}", "Note saved successfully!".green())?;
            writeln!(con, "{}", summary)?;
            Ok(())
        }
        Err(e) => con.error(e),
    }
}

/// Menu option 4
pub fn view<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    notes: &NoteRegistry,
) -> Result<(), SessionError> {
    if notes.is_empty() {
        writeln!(con, "\n📭 No notes found!")?;
        return Ok(());
    }

    con.heading("📖 YOUR NOTES", 50)?;
    for group in notes.group_by_category() {
        writeln!(
            con,
            "\n📁 {} ({} notes):",
            group.label().cyan().bold(),
            group.notes.len()
        )?;
        writeln!(con, "{}", "-".repeat(40))?;
        for note in &group.notes {
            writeln!(con, "\n{}. {}", note.id, note.text)?;
            writeln!(con, "   📅 {}", note.created.format("%Y-%m-%d %H:%M"))?;
        }
    }

    writeln!(con, "\n{}", "=".repeat(50))?;
    writeln!(con, "📊 Total notes: {}", notes.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        Console::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Arc::new(AtomicBool::new(false)),
        )
    }

    #[test]
    fn test_add_with_blank_category() {
        let mut notes = NoteRegistry::default();
        let mut con = console("Pick up parcel\n\n");
        add(&mut con, &mut notes).unwrap();

        let out = String::from_utf8(con.into_output()).unwrap();
        assert!(out.contains("ID: 1 | Category: General"));
        assert_eq!(notes.notes()[0].category, "General");
    }

    #[test]
    fn test_add_blank_note_skips_category_prompt() {
        let mut notes = NoteRegistry::default();
        let mut con = console("\n");
        add(&mut con, &mut notes).unwrap();

        let out = String::from_utf8(con.into_output()).unwrap();
        assert!(out.contains("Note cannot be empty!"));
        assert!(!out.contains("Category ("));
        assert!(notes.is_empty());
    }

    #[test]
    fn test_view_groups_with_uppercased_labels() {
        let mut notes = NoteRegistry::default();
        notes.add("standup", "Work").unwrap();
        notes.add("gym", "Personal").unwrap();
        notes.add("retro", "Work").unwrap();

        let mut con = console("");
        view(&mut con, &notes).unwrap();
        let out = String::from_utf8(con.into_output()).unwrap();

        let work = out.find("📁 WORK (2 notes):").unwrap();
        let personal = out.find("📁 PERSONAL (1 notes):").unwrap();
        assert!(work < personal);
        assert!(out.find("1. standup").unwrap() < out.find("3. retro").unwrap());
        assert!(out.contains("Total notes: 3"));
    }

    #[test]
    fn test_view_empty() {
        let mut con = console("");
        view(&mut con, &NoteRegistry::default()).unwrap();
        let out = String::from_utf8(con.into_output()).unwrap();
        assert!(out.contains("No notes found!"));
    }
}
