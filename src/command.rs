// ShotLog - Serial Command Parsing
//
// Bytes from the console are assembled into lines; a line whose trimmed text
// is `RESET` (any case) becomes a command. Everything else is ignored
// without an acknowledgement.

use crate::config::SERIAL_LINE_MAX;
use crate::events::Command;

pub fn parse_command(line: &str) -> Option<Command> {
    let cmd = line.trim();
    if cmd.eq_ignore_ascii_case("RESET") {
        Some(Command::Reset)
    } else {
        None
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum LineEvent {
    None,
    Complete(String),
    /// Reported once per over-long line; the rest of it is discarded.
    Overflow,
}

pub struct LineReader {
    buf: Vec<u8>,
    overflowed: bool,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(SERIAL_LINE_MAX),
            overflowed: false,
        }
    }

    pub fn push_byte(&mut self, byte: u8) -> LineEvent {
        if byte == b'\n' {
            if self.overflowed {
                self.overflowed = false;
                return LineEvent::None;
            }
            let line = String::from_utf8_lossy(&self.buf).into_owned();
            self.buf.clear();
            return LineEvent::Complete(line);
        }

        if self.overflowed {
            return LineEvent::None;
        }
        if self.buf.len() == SERIAL_LINE_MAX {
            self.buf.clear();
            self.overflowed = true;
            return LineEvent::Overflow;
        }

        self.buf.push(byte);
        LineEvent::None
    }
}
