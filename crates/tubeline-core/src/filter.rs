//! Keyword relevance filter over an output store

use std::path::Path;

use crate::error::StoreError;
use crate::row::TabularRow;
use crate::sink::{read_store, rewrite_store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterReport {
    pub rows_before: usize,
    pub rows_after: usize,
}

/// Case-insensitive substring match against title or description.
///
/// Keywords are OR-combined and matched as substrings, so a stem like
/// `аудиокниг` matches `Аудиокнига`, `аудиокниги`, `аудиокнигами`.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    // lowercased, non-empty
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Empty keywords are dropped; a filter with none retains nothing.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lowered: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        lowered.sort_unstable();
        lowered.dedup();
        Self { keywords: lowered }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn field_matches(&self, field: &str) -> bool {
        if field.is_empty() {
            return false;
        }
        let lowered = field.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    pub fn matches(&self, row: &TabularRow) -> bool {
        self.field_matches(&row.title) || self.field_matches(&row.description)
    }

    /// Keep only matching rows, rewriting the store in place.
    pub fn filter_store(&self, path: &Path) -> Result<FilterReport, StoreError> {
        let rows = read_store(path)?;
        let rows_before = rows.len();
        let kept: Vec<TabularRow> = rows.into_iter().filter(|r| self.matches(r)).collect();
        rewrite_store(path, &kept)?;

        let report = FilterReport {
            rows_before,
            rows_after: kept.len(),
        };
        log::info!(
            "Filtered {} by {:?}: {} -> {} rows",
            path.display(),
            self.keywords,
            report.rows_before,
            report.rows_after
        );
        Ok(report)
    }
}
