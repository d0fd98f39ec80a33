//! Interactive operator input.
//!
//! `Console` wraps any buffered reader and writer so the prompt loops can
//! be driven by stdin/stdout in the binary and by scripted input in tests.

pub mod collector;
pub mod validation;
pub mod weights;

pub use collector::collect_records;
pub use weights::{resolve_weights, WeightResolution};

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Line-oriented prompt reader.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over the given input and output.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print a line.
    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{}", message)
    }

    /// Show a prompt and read one trimmed line. `None` at end of input.
    ///
    /// A line that is not valid UTF-8 is rejected and the prompt repeated.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            write!(self.writer, "{}", prompt)?;
            self.writer.flush()?;

            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                debug!("End of input at prompt {:?}", prompt.trim());
                return Ok(None);
            }

            match std::str::from_utf8(&buf) {
                Ok(line) => return Ok(Some(line.trim().to_string())),
                Err(e) => {
                    debug!("Rejected non-UTF-8 input: {}", e);
                    self.say("Input is not valid text. Try again.")?;
                }
            }
        }
    }

    /// Keep prompting until `parse` accepts the answer.
    ///
    /// Each rejection prints the parser's error and asks again.
    /// Returns `None` if input ends first.
    pub fn prompt_until<T, E, F>(&mut self, prompt: &str, parse: F) -> io::Result<Option<T>>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(None);
            };

            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    debug!("Rejected {:?}: {}", answer, e);
                    self.say(e)?;
                }
            }
        }
    }

    /// Ask a yes/no question. Only `y` / `yes` count as yes.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        Ok(self
            .read_line(prompt)?
            .map(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes")))
    }
}
