//! Main menu choices

use crate::core::InputError;

/// Top-level menu entries, numbered 1-8 on screen.
///
/// Each entry runs one flow to completion and returns to the menu,
/// except [`MenuChoice::Exit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTask,
    ManageTasks,
    AddNote,
    ViewNotes,
    Calculator,
    DateTime,
    Settings,
    Exit,
}

impl MenuChoice {
    pub const COUNT: u8 = 8;

    pub fn parse(input: &str) -> Result<Self, InputError> {
        let trimmed = input.trim();
        let choice = match trimmed {
            "1" => MenuChoice::AddTask,
            "2" => MenuChoice::ManageTasks,
            "3" => MenuChoice::AddNote,
            "4" => MenuChoice::ViewNotes,
            "5" => MenuChoice::Calculator,
            "6" => MenuChoice::DateTime,
            "7" => MenuChoice::Settings,
            "8" => MenuChoice::Exit,
            _ => {
                return Err(InputError::InvalidChoice {
                    input: trimmed.to_string(),
                    max: Self::COUNT,
                })
            }
        };
        Ok(choice)
    }
}
