//! Session module - The interactive menu loop
//!
//! The [`Session`] owns the application state and the store. It loads the
//! data file once, runs flows from the main menu until the user exits or
//! interrupts, and decides when to save:
//! - on exit (always)
//! - right after the user name is captured on a fresh data file
//! - after an interrupt, if the user says so
//!
//! Flows never crash the loop: anything a flow does not handle itself is
//! reported and control returns to the main menu.

use std::io::{BufRead, Write};

use chrono::{Local, Timelike};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::note::NoteRegistry;
use crate::core::store::{Document, Store, StoreError};
use crate::core::task::TaskRegistry;
use crate::core::InputError;

pub mod calculator;
pub mod console;
pub mod display;
pub mod menu;
pub mod notes;
pub mod settings;
pub mod tasks;

use console::Console;
use menu::MenuChoice;

/// Errors surfacing from a flow
#[derive(Debug, Error)]
pub enum SessionError {
    /// Ctrl-C or end of input
    #[error("interrupted")]
    Interrupted,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Who is talking to whom. Only `user_name` is persisted.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub user_name: String,
    pub assistant_name: String,
}

/// Everything flows operate on
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tasks: TaskRegistry,
    pub notes: NoteRegistry,
    pub identity: Identity,
}

impl AppState {
    pub fn from_document(document: Document, assistant_name: impl Into<String>) -> Self {
        Self {
            tasks: TaskRegistry::from_tasks(document.tasks),
            notes: NoteRegistry::from_notes(document.notes),
            identity: Identity {
                user_name: document.user,
                assistant_name: assistant_name.into(),
            },
        }
    }

    /// Snapshot for saving (`last_saved` is stamped by the store)
    pub fn to_document(&self) -> Document {
        Document {
            tasks: self.tasks.tasks().to_vec(),
            notes: self.notes.notes().to_vec(),
            user: self.identity.user_name.clone(),
            last_saved: None,
        }
    }
}

/// Terminal niceties, only wanted when a person is at the keyboard
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Wait for Enter after each action
    pub pause: bool,
    /// Clear the screen after each pause
    pub clear_screen: bool,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Menu option 8
    Exited { saved: bool },
    /// Ctrl-C or end of input
    Interrupted { saved: bool },
}

enum Transition {
    Continue,
    Exit,
}

pub struct Session<R, W> {
    console: Console<R, W>,
    store: Store,
    state: AppState,
    options: SessionOptions,
    load_warning: Option<StoreError>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Load the data file and prepare a session
    pub fn open(
        console: Console<R, W>,
        store: Store,
        assistant_name: impl Into<String>,
        options: SessionOptions,
    ) -> Self {
        let loaded = store.load();
        Self {
            console,
            state: AppState::from_document(loaded.document, assistant_name),
            store,
            options,
            load_warning: loaded.warning,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Run until exit or interrupt.
    ///
    /// Flow errors are reported and the loop carries on. Interrupts and
    /// terminal failures end the session through the save offer; only an
    /// output that cannot be written to makes this return an error.
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        let started = self.start();
        if let Err(e) = started.or_else(|e| self.recover(e)) {
            return self.end_abruptly(e);
        }

        loop {
            let outcome = match self.step() {
                Ok(Transition::Exit) => return self.exit(),
                Ok(Transition::Continue) => self.pause(),
                Err(e) => self.recover(e).and_then(|()| self.pause()),
            };

            if let Err(e) = outcome.or_else(|e| self.recover(e)) {
                return self.end_abruptly(e);
            }
        }
    }

    /// Report a flow error and return to the menu. Interrupts and I/O
    /// failures are handed back.
    fn recover(&mut self, error: SessionError) -> Result<(), SessionError> {
        match error {
            SessionError::Interrupted | SessionError::Io(_) => Err(error),
            other => {
                warn!(error = %other, "flow failed");
                self.console.error(format!("Unexpected error: {}", other))
            }
        }
    }

    fn end_abruptly(&mut self, error: SessionError) -> Result<SessionEnd, SessionError> {
        if let SessionError::Io(e) = &error {
            warn!(error = %e, "terminal I/O failed");
        }
        self.interrupted()
    }

    fn start(&mut self) -> Result<(), SessionError> {
        self.clear_screen();
        if let Some(warning) = self.load_warning.take() {
            self.console
                .warning(format!("Could not load data: {}", warning))?;
        }
        display::banner(&mut self.console)?;
        self.greet()
    }

    fn greet(&mut self) -> Result<(), SessionError> {
        let greeting = display::greeting(Local::now().hour());

        if self.state.identity.user_name.is_empty() {
            let name = self
                .console
                .prompt(&format!("{}! What's your name? ", greeting))?;
            let name = name.trim();
            if !name.is_empty() {
                self.state.identity.user_name = name.to_string();
                info!("user name captured");
                if !self.save() {
                    self.console.warning("Could not save your name yet.")?;
                }
            }
        }

        writeln!(
            self.console,
            "{}, {}! I'm {}, your personal productivity assistant.",
            greeting, self.state.identity.user_name, self.state.identity.assistant_name
        )?;
        Ok(())
    }

    fn step(&mut self) -> Result<Transition, SessionError> {
        display::main_menu(&mut self.console, &self.state)?;

        let raw = self.console.prompt("\n👉 Enter your choice (1-8): ")?;
        let choice = match MenuChoice::parse(&raw) {
            Ok(choice) => choice,
            Err(e) => {
                self.console.error(e)?;
                return Ok(Transition::Continue);
            }
        };
        debug!(?choice, "menu choice");

        let con = &mut self.console;
        match choice {
            MenuChoice::AddTask => tasks::add(con, &mut self.state.tasks)?,
            MenuChoice::ManageTasks => tasks::manage(con, &mut self.state.tasks)?,
            MenuChoice::AddNote => notes::add(con, &mut self.state.notes)?,
            MenuChoice::ViewNotes => notes::view(con, &self.state.notes)?,
            MenuChoice::Calculator => calculator::run(con)?,
            MenuChoice::DateTime => display::date_time(con, Local::now().naive_local())?,
            MenuChoice::Settings => settings::run(con, &mut self.state, &self.store)?,
            MenuChoice::Exit => return Ok(Transition::Exit),
        }
        Ok(Transition::Continue)
    }

    fn pause(&mut self) -> Result<(), SessionError> {
        if !self.options.pause {
            return Ok(());
        }
        self.console.prompt("\n↵ Press Enter to continue...")?;
        self.clear_screen();
        Ok(())
    }

    fn clear_screen(&self) {
        if self.options.clear_screen {
            // Cosmetic; a terminal that cannot clear just scrolls.
            let _ = ::console::Term::stdout().clear_screen();
        }
    }

    fn save(&mut self) -> bool {
        let mut document = self.state.to_document();
        self.store.save(&mut document)
    }

    fn exit(&mut self) -> Result<SessionEnd, SessionError> {
        let saved = self.save();

        self.console.heading("💾 SAVING DATA...", 40)?;
        if saved {
            self.console
                .success(format!("Data saved to '{}'", self.store.path().display()))?;
            writeln!(
                self.console,
                "📊 Saved: {} tasks, {} notes",
                self.state.tasks.len(),
                self.state.notes.len()
            )?;
        } else {
            self.console.error("Could not save data!")?;
        }

        let rule = "=".repeat(40);
        writeln!(self.console, "\n{}\n👋 Goodbye! See you next time!\n{}", rule, rule)?;
        Ok(SessionEnd::Exited { saved })
    }

    fn interrupted(&mut self) -> Result<SessionEnd, SessionError> {
        info!("session interrupted");
        writeln!(self.console, "\n\n⚠️  Program interrupted!")?;

        let wants_save = self
            .console
            .ask_after_interrupt("Save data before exiting? (y/n): ")?;
        let saved = wants_save && self.save();
        if wants_save {
            if saved {
                self.console.success("Data saved!")?;
            } else {
                self.console.error("Could not save data!")?;
            }
        }

        writeln!(self.console, "\n👋 Goodbye!")?;
        Ok(SessionEnd::Interrupted { saved })
    }
}
