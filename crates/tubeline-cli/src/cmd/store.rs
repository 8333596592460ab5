//! `tubeline dedupe` / `tubeline filter` - rewrite an existing store

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use tubeline_core::{KeywordFilter, StoreError, dedupe};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct DedupeArgs {
    /// CSV store to deduplicate in place
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// CSV store to filter in place
    pub path: PathBuf,

    /// Comma-separated keywords (default: from config)
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,
}

pub fn run_dedupe(args: DedupeArgs) -> Result<()> {
    report(&args.path, dedupe(&args.path).map(|r| (r.rows_before, r.rows_after)))
}

pub fn run_filter(args: FilterArgs, config: &Config) -> Result<()> {
    let keywords = args
        .keywords
        .unwrap_or_else(|| config.filter.keywords.clone());
    let filter = KeywordFilter::new(&keywords);
    report(
        &args.path,
        filter
            .filter_store(&args.path)
            .map(|r| (r.rows_before, r.rows_after)),
    )
}

/// A missing store is a message, not a failure exit.
fn report(path: &Path, result: Result<(usize, usize), StoreError>) -> Result<()> {
    match result {
        Ok((before, after)) => {
            println!("{}: {before} -> {after} rows", path.display());
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            log::error!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
