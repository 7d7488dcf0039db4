//! Core module - Data model
//!
//! Contains the registries, the calculator and the data file store.

use thiserror::Error;

pub mod calculator;
pub mod note;
pub mod store;
pub mod task;
pub mod time;

/// Rejected user input. Always recoverable; never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Task cannot be empty!")]
    EmptyDescription,

    #[error("Note cannot be empty!")]
    EmptyNote,

    #[error("Please enter a valid number (got '{0}')")]
    InvalidNumber(String),

    #[error("Invalid choice '{input}'! Please enter 1-{max}")]
    InvalidChoice { input: String, max: u8 },

    #[error("Input is not valid UTF-8")]
    InvalidEncoding,
}
