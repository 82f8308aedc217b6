//! Append-only log sink.
//!
//! A `LogSink` is plain configuration owned by the surrounding application
//! and handed to whatever wants to narrate its work. Writes are
//! fire-and-forget: a failed append is silently dropped, and a sink built
//! from an empty path is disabled entirely. The matcher never requires one.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct LogSink {
    path: Option<PathBuf>,
}

impl LogSink {
    /// A sink appending to the given file. An empty path yields a disabled
    /// sink, mirroring the "empty path means off" configuration convention.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.as_os_str().is_empty() {
            Self::disabled()
        } else {
            Self { path: Some(path) }
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Truncates the log file. Call once at startup; a no-op when disabled.
    pub fn clear(&self) {
        if let Some(path) = &self.path {
            let _ = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path);
        }
    }

    /// Appends a single line. Failures are silently ignored; no ordering is
    /// guaranteed relative to other writers of the same file.
    pub fn append(&self, line: &str) {
        if let Some(path) = &self.path {
            if let Ok(mut out) = OpenOptions::new().append(true).create(true).open(path) {
                let _ = writeln!(out, "{}", line);
            }
        }
    }
}
