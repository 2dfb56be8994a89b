//! Line-oriented terminal I/O.

use std::io::{self, BufRead, Write};

/// Prompting front end over any reader and writer, so sessions can be
/// scripted in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// Print `prompt` and read a trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Wait for Enter. Returns false at end of input.
    pub fn pause(&mut self) -> io::Result<bool> {
        Ok(self.ask("Press Enter to continue...")?.is_some())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
