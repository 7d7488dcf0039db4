//! Note - categorised free-text notes and their registry

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::time;
use super::InputError;

/// Category used when none is given
pub const DEFAULT_CATEGORY: &str = "General";

/// A single note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,

    #[serde(rename = "note")]
    pub text: String,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(with = "time::minute")]
    pub created: NaiveDateTime,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Notes sharing one category, in insertion order
#[derive(Debug)]
pub struct CategoryGroup<'a> {
    /// Grouping key, exactly as entered on the first note seen
    pub category: &'a str,
    pub notes: Vec<&'a Note>,
}

impl CategoryGroup<'_> {
    /// Display label (uppercased). Two groups can share a label when
    /// their categories differ only by case.
    pub fn label(&self) -> String {
        self.category.to_uppercase()
    }
}

/// Owns the note list
#[derive(Debug, Default, Clone)]
pub struct NoteRegistry {
    notes: Vec<Note>,
}

impl NoteRegistry {
    /// Adopt notes loaded from the data file, ids re-established from
    /// list order
    pub fn from_notes(mut notes: Vec<Note>) -> Self {
        for (index, note) in notes.iter_mut().enumerate() {
            note.id = index as u32 + 1;
        }
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Append a note. Blank text is rejected; a blank category becomes
    /// [`DEFAULT_CATEGORY`].
    pub fn add(&mut self, text: &str, category: &str) -> Result<&Note, InputError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InputError::EmptyNote);
        }

        let category = match category.trim() {
            "" => DEFAULT_CATEGORY,
            c => c,
        };

        let note = Note {
            id: self.notes.len() as u32 + 1,
            text: text.to_string(),
            category: category.to_string(),
            created: time::now_minute(),
        };
        debug!(id = note.id, category = %note.category, "note added");
        self.notes.push(note);

        Ok(&self.notes[self.notes.len() - 1])
    }

    /// Group notes by exact (case-sensitive) category, categories in
    /// first-seen order.
    pub fn group_by_category(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        for note in &self.notes {
            match groups.iter_mut().find(|g| g.category == note.category) {
                Some(group) => group.notes.push(note),
                None => groups.push(CategoryGroup {
                    category: &note.category,
                    notes: vec![note],
                }),
            }
        }
        groups
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }
}
