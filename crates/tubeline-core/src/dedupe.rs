//! Exact-duplicate removal over an output store

use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::StoreError;
use crate::row::TabularRow;
use crate::sink::{read_store, rewrite_store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupeReport {
    pub rows_before: usize,
    pub rows_after: usize,
}

impl DedupeReport {
    pub const fn removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Keep the first occurrence of every distinct row, in input order.
pub fn dedupe_rows(rows: Vec<TabularRow>) -> Vec<TabularRow> {
    let mut seen = FxHashSet::default();
    rows.into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

/// Collapse rows equal in all six fields, rewriting the store in place.
///
/// The header stays as the first line. A missing store is
/// [`StoreError::NotFound`] and is left untouched.
pub fn dedupe(path: &Path) -> Result<DedupeReport, StoreError> {
    let rows = read_store(path)?;
    let rows_before = rows.len();
    let unique = dedupe_rows(rows);
    rewrite_store(path, &unique)?;

    let report = DedupeReport {
        rows_before,
        rows_after: unique.len(),
    };
    log::info!(
        "Deduplicated {}: {} -> {} rows",
        path.display(),
        report.rows_before,
        report.rows_after
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::HEADER;
    use crate::sink::CsvSink;
    use tempfile::TempDir;

    fn row(title: &str, description: &str) -> TabularRow {
        TabularRow {
            title: title.into(),
            description: description.into(),
            channel_title: "ch".into(),
            channel_id: "UC1".into(),
            published_at: "2022-01-01T00:00:00Z".into(),
            default_thumbnail_url: "https://i.ytimg.com/vi/a/default.jpg".into(),
        }
    }

    fn write_store(path: &Path, rows: &[TabularRow]) {
        let mut sink = CsvSink::open(path).unwrap();
        sink.append(rows.iter().cloned().map(Ok)).unwrap();
        sink.finish().unwrap();
    }

    #[test]
    fn collapses_exact_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.csv");
        write_store(&path, &[row("A", "d1"), row("A", "d1"), row("B", "d2")]);

        let report = dedupe(&path).unwrap();
        assert_eq!(report.rows_before, 3);
        assert_eq!(report.rows_after, 2);
        assert_eq!(report.removed(), 1);
        assert_eq!(
            read_store(&path).unwrap(),
            vec![row("A", "d1"), row("B", "d2")]
        );
    }

    #[test]
    fn rows_differing_in_one_field_are_kept() {
        let mut other_channel = row("A", "d1");
        other_channel.channel_id = "UC2".into();
        let rows = dedupe_rows(vec![row("A", "d1"), other_channel.clone()]);
        assert_eq!(rows, vec![row("A", "d1"), other_channel]);
    }

    #[test]
    fn preserves_first_occurrence_order() {
        let rows = dedupe_rows(vec![
            row("C", "3"),
            row("A", "1"),
            row("C", "3"),
            row("B", "2"),
            row("A", "1"),
        ]);
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    #[test]
    fn idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.csv");
        write_store(&path, &[row("A", "d1"), row("B", "d2"), row("A", "d1")]);

        dedupe(&path).unwrap();
        let once = std::fs::read_to_string(&path).unwrap();
        let report = dedupe(&path).unwrap();
        let twice = std::fs::read_to_string(&path).unwrap();

        assert_eq!(once, twice);
        assert_eq!(report.removed(), 0);
    }

    #[test]
    fn header_kept_as_first_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.csv");
        write_store(&path, &[row("A", "d1"), row("A", "d1")]);

        dedupe(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
        assert_eq!(lines.count(), 1);
        assert!(!dir.path().join("store.csv.tmp").exists());
    }

    #[test]
    fn missing_store_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");
        let err = dedupe(&path).unwrap_err();
        assert!(err.is_not_found());
        assert!(!path.exists());
    }
}
