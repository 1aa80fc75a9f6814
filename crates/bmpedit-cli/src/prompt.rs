//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};

use bmpedit_core::InvalidInputError;

/// A console bound to an input and an output stream.
///
/// End of input is reported as `Ok(None)` so callers can treat it as a quit.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next non-blank line with surrounding whitespace removed.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    /// Print `prompt` and read the answer.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Ask until `parse` accepts the answer.
    ///
    /// Each rejected line is dropped whole and the prompt repeated after an
    /// `Invalid input!` message.
    pub fn ask_valid<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, InvalidInputError>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    log::debug!("rejected input {line:?}: {err}");
                    writeln!(self.output, "Invalid input! {err}")?;
                }
            }
        }
    }
}
