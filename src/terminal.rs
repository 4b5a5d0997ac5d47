//! Captured intrinsic output
//!
//! The interpreter never writes to the process's stdout. Everything `printf`
//! produces is recorded here, grouped by the source line that printed it, and
//! handed to the embedding application afterwards.

use crate::parser::ast::SourceLocation;
use std::io::{self, Write};

/// Output sink for the `printf` intrinsic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Terminal {
    lines: Vec<TerminalLine>,
}

/// Text printed by one source line
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalLine {
    pub text: String,
    pub location: SourceLocation,
}

impl Terminal {
    pub fn new() -> Self {
        Terminal { lines: Vec::new() }
    }

    /// Print without newline
    pub fn print(&mut self, text: &str, location: SourceLocation) {
        log::trace!("print at {}: {:?}", location, text);
        if let Some(last) = self.lines.last_mut() {
            if last.location.line == location.line {
                last.text.push_str(text);
                return;
            }
        }
        self.lines.push(TerminalLine {
            text: text.to_string(),
            location,
        });
    }

    /// Everything printed so far, concatenated
    pub fn output(&self) -> String {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// Output grouped by printing source line
    pub fn lines(&self) -> &[TerminalLine] {
        &self.lines
    }

    /// Output split on newlines, without a trailing empty line
    pub fn output_lines(&self) -> Vec<String> {
        let output = self.output();
        let mut result: Vec<String> = output.split('\n').map(str::to_string).collect();
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write the captured output to `writer` and clear it.
    ///
    /// Lines are removed only once written, so on error the unwritten rest is
    /// still here for a retry.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        let mut written = 0;
        let result = self.lines.iter().try_for_each(|line| -> io::Result<()> {
            writer.write_all(line.text.as_bytes())?;
            written += 1;
            Ok(())
        });
        self.lines.drain(..written);
        result?;
        writer.flush()
    }
}
