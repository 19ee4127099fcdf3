// ShotLog - Event Log
//
// Append-only CSV on flash. Every operation opens and closes the file itself;
// no handle survives between calls. Access is expected from the control loop
// thread only.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::events::ShotEvent;

pub const LOG_HEADER: &str = "Timestamp,ShotCount";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open {} for {}", .path.display(), .mode)]
    Open {
        path: PathBuf,
        mode: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one `timestamp,count` line. A failure is logged and the event is
    /// dropped; there is no retry or buffering.
    pub fn append(&self, event: &ShotEvent) {
        match self.try_append(event) {
            Ok(()) => log::info!(
                "Shot recorded: Timestamp: {}, ShotCount: {}",
                event.timestamp_ms,
                event.shot_count
            ),
            Err(e) => log::error!("Dropping shot {}: {}", event, e),
        }
    }

    fn try_append(&self, event: &ShotEvent) -> Result<(), LogError> {
        // A freshly created file gets the header before its first record.
        let mut file = match OpenOptions::new().append(true).create_new(true).open(&self.path) {
            Ok(mut file) => {
                writeln!(file, "{}", LOG_HEADER).map_err(|source| self.write_error(source))?;
                file
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => OpenOptions::new()
                .append(true)
                .open(&self.path)
                .map_err(|source| self.open_error("appending", source))?,
            Err(source) => return Err(self.open_error("appending", source)),
        };

        writeln!(file, "{}", event).map_err(|source| self.write_error(source))
    }

    /// Entire file as text. An unopenable store is an error, never "".
    pub fn read_all(&self) -> Result<String, LogError> {
        let mut file = File::open(&self.path).map_err(|source| self.open_error("reading", source))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|source| LogError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(contents)
    }

    /// Discard all history and leave only the header line.
    pub fn reset(&self) -> Result<(), LogError> {
        let mut file = File::create(&self.path).map_err(|source| self.open_error("resetting", source))?;

        writeln!(file, "{}", LOG_HEADER).map_err(|source| self.write_error(source))?;

        log::info!("File reset: {}", self.path.display());
        Ok(())
    }

    fn open_error(&self, mode: &'static str, source: io::Error) -> LogError {
        LogError::Open {
            path: self.path.clone(),
            mode,
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> LogError {
        LogError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
