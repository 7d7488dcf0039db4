//! deskmate - terminal personal organizer
//!
//! A single-user, menu-driven assistant: prioritised tasks, categorised
//! notes, a small calculator and the date, kept in one JSON data file.
//!
//! ## Key Concepts
//!
//! - **Registries**: own tasks and notes; task ids stay a dense `1..N`
//! - **Store**: the whole state is one document, rewritten on every save
//! - **Session**: the menu loop; flows run to completion and return to it

pub mod cli;
pub mod config;
pub mod core;
pub mod session;

pub use core::note::{Note, NoteRegistry};
pub use core::store::{Document, Store};
pub use core::task::{Priority, Task, TaskRegistry};
pub use session::{Session, SessionEnd, SessionOptions};
