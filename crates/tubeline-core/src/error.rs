//! Error types for the tabular store

use std::path::PathBuf;

/// A search result lacked one of the fields a row needs.
///
/// `field` is the dotted wire path, e.g. `snippet.thumbnails.default.url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFieldError {
    pub field: &'static str,
}

impl MissingFieldError {
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl std::fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing field `{}`", self.field)
    }
}

impl std::error::Error for MissingFieldError {}

/// Error from reading or rewriting an output store.
#[derive(Debug)]
pub enum StoreError {
    /// The store path does not exist. Reported, never fatal.
    NotFound(PathBuf),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "store not found: {}", path.display()),
            Self::Io(e) => write!(f, "IO: {e}"),
            Self::Csv(e) => write!(f, "CSV: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}
