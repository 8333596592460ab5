//! Tubeline Core - Common infrastructure for video search pipelines
//!
//! This crate provides the source-agnostic pieces: the tabular row model,
//! the CSV sink, deduplication, keyword filtering, page-token logging and
//! the shared HTTP runtime.

pub mod dedupe;
pub mod error;
pub mod filter;
pub mod http;
pub mod logging;
pub mod progress;
pub mod row;
pub mod sink;
pub mod token_log;

// Re-exports for convenience
pub use dedupe::{DedupeReport, dedupe};
pub use error::{MissingFieldError, StoreError};
pub use filter::{FilterReport, KeywordFilter};
pub use http::{HttpError, SHARED_RUNTIME, get_text, http_client};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, fmt_num};
pub use row::{HEADER, TabularRow};
pub use sink::{AppendReport, CsvSink};
pub use token_log::PageTokenLog;
