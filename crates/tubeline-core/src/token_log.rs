//! Append-only log of continuation cursors

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One page token per line, in fetch order. Nothing in the pipeline reads
/// it back except an explicit resume.
#[derive(Debug, Clone)]
pub struct PageTokenLog {
    path: PathBuf,
}

impl PageTokenLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `token` if present; no-op otherwise.
    pub fn record(&self, token: Option<&str>) -> io::Result<()> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(());
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{token}")
    }

    /// Last recorded token, `None` if the log is missing or empty.
    pub fn last_token(path: &Path) -> io::Result<Option<String>> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(content
            .lines()
            .map(str::trim)
            .rfind(|l| !l.is_empty())
            .map(String::from))
    }
}
