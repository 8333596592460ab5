//! Append-only CSV sink for extracted rows

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{MissingFieldError, StoreError};
use crate::row::{HEADER, TabularRow};

/// Outcome of one [`CsvSink::append`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendReport {
    pub written: usize,
    pub skipped: usize,
}

impl AppendReport {
    /// The page had no items at all.
    pub fn is_empty(&self) -> bool {
        self.written == 0 && self.skipped == 0
    }
}

/// CSV writer that emits the header exactly once per store.
///
/// Whether the header is already present is decided when the sink is
/// opened: an existing non-empty file is assumed to start with it. The file
/// itself is only created on the first row, so an empty run leaves no store
/// behind.
///
/// An existing store whose last record lacks a line terminator gets one
/// before the first appended row.
pub struct CsvSink {
    path: PathBuf,
    header_written: bool,
    needs_terminator: bool,
    writer: Option<csv::Writer<File>>,
    row_count: usize,
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("path", &self.path)
            .field("header_written", &self.header_written)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl CsvSink {
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let header_written = match fs::metadata(&path) {
            Ok(meta) => meta.len() > 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(e),
        };
        let needs_terminator = header_written && !ends_with_newline(&path)?;
        Ok(Self {
            path,
            header_written,
            needs_terminator,
            writer: None,
            row_count: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended through this sink (header excluded)
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Append extracted rows, skipping items whose extraction failed.
    ///
    /// A failed item never aborts the rest of the batch. Only local write
    /// errors are returned.
    pub fn append<I>(&mut self, rows: I) -> Result<AppendReport, StoreError>
    where
        I: IntoIterator<Item = Result<TabularRow, MissingFieldError>>,
    {
        let mut report = AppendReport::default();
        for row in rows {
            match row {
                Ok(row) => {
                    self.write_row(&row)?;
                    report.written += 1;
                }
                Err(e) => {
                    log::warn!("Skipping item: {e}");
                    report.skipped += 1;
                }
            }
        }

        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        if report.is_empty() {
            log::info!("Nothing is saved. No items were found in the response.");
        }
        Ok(report)
    }

    fn write_row(&mut self, row: &TabularRow) -> Result<(), StoreError> {
        if self.writer.is_none() {
            self.writer = Some(self.open_writer()?);
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.serialize(row)?;
            self.row_count += 1;
        }
        Ok(())
    }

    fn open_writer(&mut self) -> Result<csv::Writer<File>, StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if self.needs_terminator {
            file.write_all(b"\n")?;
            self.needs_terminator = false;
            log::debug!("Terminated last record of {}", self.path.display());
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !self.header_written {
            writer.write_record(HEADER)?;
            self.header_written = true;
            log::debug!("Created store {}", self.path.display());
        }
        Ok(writer)
    }

    /// Flush and release the file handle. A later append reopens it
    /// without repeating the header.
    pub fn close(&mut self) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Flush and close, returning the number of rows appended.
    pub fn finish(mut self) -> io::Result<usize> {
        self.close()?;
        Ok(self.row_count)
    }
}

fn ends_with_newline(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Read every data row of a store (header excluded).
pub(crate) fn read_store(path: &Path) -> Result<Vec<TabularRow>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<TabularRow>, csv::Error>>()?;
    Ok(rows)
}

/// Replace a store's contents with `rows`: header + rows to `<path>.tmp`,
/// then rename over the original. A failed rewrite leaves the original
/// untouched and no `.tmp` behind.
pub(crate) fn rewrite_store(path: &Path, rows: &[TabularRow]) -> Result<(), StoreError> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = write_rows(&tmp_path, rows)
        .and_then(|()| fs::rename(&tmp_path, path).map_err(StoreError::from));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_rows(path: &Path, rows: &[TabularRow]) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
