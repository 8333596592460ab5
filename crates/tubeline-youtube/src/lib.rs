//! Tubeline YouTube - YouTube search pipeline
//!
//! Pages through `search.list` results for a query, appends the snippet
//! fields to a CSV store, then deduplicates and keyword-filters it.
//!
//! # Example
//!
//! ```ignore
//! use tubeline_youtube::{Config, YouTubeClient, run};
//!
//! let client = YouTubeClient::new(api_key);
//! let config = Config::new("аудиокнига шлинк");
//! let summary = run(&client, &config, &progress)?;
//! println!("Kept {:?} rows", summary.rows_after_filter);
//! ```

pub mod api;
pub mod config;
pub mod runner;
pub mod schema;
pub mod state;
pub mod transform;

// Re-exports
pub use api::{SearchClient, SearchError, SearchRequest, YouTubeClient};
pub use config::Config;
pub use runner::{Summary, run};
pub use schema::{ResultPage, SearchResult};
pub use state::{Stage, VideoDuration};
