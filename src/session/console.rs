//! Line-oriented terminal I/O with interrupt awareness
//!
//! Every prompt is an interrupt boundary: if the shared flag was raised
//! (Ctrl-C) or stdin hit end of input, the prompt yields
//! [`SessionError::Interrupted`] instead of a line. A line that is not
//! UTF-8 is consumed and rejected as [`InputError::InvalidEncoding`].

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::Colorize;

use super::SessionError;
use crate::core::InputError;

pub struct Console<R, W> {
    input: R,
    output: W,
    interrupt: Arc<AtomicBool>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, interrupt: Arc<AtomicBool>) -> Self {
        Self {
            input,
            output,
            interrupt,
        }
    }

    /// Show `label` and read one line (without its line ending)
    pub fn prompt(&mut self, label: &str) -> Result<String, SessionError> {
        self.check_interrupt()?;
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let Some(line) = self.read_raw_line()? else {
            writeln!(self.output)?;
            return Err(SessionError::Interrupted);
        };

        self.check_interrupt()?;
        Ok(line)
    }

    /// Yes/no question asked after an interrupt.
    ///
    /// Clears the interrupt flag first; anything but `y` (or end of
    /// input) counts as no.
    pub fn ask_after_interrupt(&mut self, label: &str) -> Result<bool, SessionError> {
        self.interrupt.store(false, Ordering::SeqCst);
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let answer = match self.read_raw_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                writeln!(self.output)?;
                String::new()
            }
            Err(_) => String::new(),
        };
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    pub fn success(&mut self, message: impl Display) -> Result<(), SessionError> {
        writeln!(self.output, "{} {}", "✅".green(), message.to_string().green())?;
        Ok(())
    }

    pub fn error(&mut self, message: impl Display) -> Result<(), SessionError> {
        writeln!(self.output, "{} {}", "❌".red(), message.to_string().red())?;
        Ok(())
    }

    pub fn warning(&mut self, message: impl Display) -> Result<(), SessionError> {
        writeln!(self.output, "⚠️  {}", message.to_string().yellow())?;
        Ok(())
    }

    /// Section header framed by rules
    pub fn heading(&mut self, title: &str, width: usize) -> Result<(), SessionError> {
        let rule = "=".repeat(width);
        writeln!(self.output, "\n{}\n{}\n{}", rule, title.bold(), rule)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn check_interrupt(&self) -> Result<(), SessionError> {
        if self.interrupt.load(Ordering::SeqCst) {
            Err(SessionError::Interrupted)
        } else {
            Ok(())
        }
    }

    fn read_raw_line(&mut self) -> Result<Option<String>, SessionError> {
        let mut bytes = Vec::new();
        match self.input.read_until(b'\n', &mut bytes) {
            Ok(0) => return Ok(None),
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                return Err(SessionError::Interrupted)
            }
            Err(e) => return Err(e.into()),
        }

        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }
        let line = String::from_utf8(bytes).map_err(|_| InputError::InvalidEncoding)?;
        Ok(Some(line))
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.output.flush()
    }
}
