//! Main runner for the search pipeline

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tubeline_core::{
    CsvSink, KeywordFilter, PageTokenLog, ProgressContext, StoreError, dedupe, fmt_num,
};

use crate::api::{SearchClient, SearchRequest};
use crate::config::Config;
use crate::schema::ResultPage;
use crate::state::Stage;
use crate::transform::append_page;

/// Pipeline execution summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub pages_requested: usize,
    pub pages_failed: usize,
    /// Pages that delivered zero items (failed pages included)
    pub pages_empty: usize,
    pub rows_written: usize,
    /// Items dropped for a missing field
    pub items_skipped: usize,
    /// `None` when the stage was disabled or found no store
    pub rows_after_dedupe: Option<usize>,
    pub rows_after_filter: Option<usize>,
    pub elapsed: Duration,
}

/// Run `config.max_pages` search → write iterations, then dedupe and
/// filter the store.
///
/// Search failures count as empty pages and never abort the run; only
/// local I/O errors on the store are returned.
pub fn run<C>(client: &C, config: &Config, progress: &ProgressContext) -> Result<Summary>
where
    C: SearchClient + ?Sized,
{
    let start = Instant::now();
    let store = config.output_path.as_path();

    log::info!(
        "Searching {:?}: pages={}, duration={}, language={}, store={}",
        config.query,
        config.max_pages,
        config.duration,
        config.language.as_deref().unwrap_or("-"),
        store.display()
    );

    let mut sink = CsvSink::open(store)
        .with_context(|| format!("Cannot open store {}", store.display()))?;
    let token_log = config.token_log.clone().map(PageTokenLog::new);
    let pb = progress.page_bar(&config.query, config.max_pages);

    let mut summary = Summary::default();
    let mut cursor = config.start_token.clone();
    let mut stage = Stage::Fetching(0);

    loop {
        log::trace!("stage: {}", stage.name());
        stage = match stage {
            Stage::Fetching(index) if index >= config.max_pages => {
                pb.finish_and_clear();
                sink.close()
                    .with_context(|| format!("Cannot flush {}", store.display()))?;
                Stage::Deduplicating
            }
            Stage::Fetching(index) => {
                let request = SearchRequest {
                    query: &config.query,
                    duration: config.duration,
                    language: config.language.as_deref(),
                    page_size: config.page_size,
                    page_token: cursor.as_deref(),
                };
                summary.pages_requested += 1;

                let page = match client.search(&request) {
                    Ok(page) => {
                        if let Some(tokens) = &token_log {
                            if let Err(e) = tokens.record(page.next_page_token.as_deref()) {
                                log::warn!(
                                    "Cannot record page token in {}: {e}",
                                    tokens.path().display()
                                );
                            }
                        }
                        cursor = page.next_page_token.clone();
                        page
                    }
                    Err(e) => {
                        // Keep the carried cursor so the next iteration asks
                        // for the same position again.
                        summary.pages_failed += 1;
                        log::error!("Page {}/{}: {e}", index + 1, config.max_pages);
                        ResultPage::default()
                    }
                };
                Stage::Writing(index, page)
            }
            Stage::Writing(index, page) => {
                let report = append_page(&page, &mut sink)
                    .with_context(|| format!("Cannot write {}", store.display()))?;
                if page.is_empty() {
                    summary.pages_empty += 1;
                }
                summary.rows_written += report.written;
                summary.items_skipped += report.skipped;

                log::info!(
                    "Page {}/{}: {} rows written, {} skipped{}",
                    index + 1,
                    config.max_pages,
                    report.written,
                    report.skipped,
                    if cursor.is_some() { "" } else { " (no next page)" }
                );
                pb.inc(1);
                pb.set_message(format!("{} rows", fmt_num(summary.rows_written)));
                Stage::Fetching(index + 1)
            }
            Stage::Deduplicating => {
                if config.dedupe {
                    let line = progress.stage_line("dedupe");
                    summary.rows_after_dedupe =
                        report_missing(dedupe(store).map(|r| r.rows_after), "dedupe")?;
                    line.finish_and_clear();
                }
                Stage::Filtering
            }
            Stage::Filtering => {
                if config.filter {
                    let line = progress.stage_line("filter");
                    let filter = KeywordFilter::new(&config.keywords);
                    summary.rows_after_filter = report_missing(
                        filter.filter_store(store).map(|r| r.rows_after),
                        "filter",
                    )?;
                    line.finish_and_clear();
                }
                Stage::Done
            }
            Stage::Done => break,
        };
    }

    summary.elapsed = start.elapsed();
    log_summary(&summary);
    Ok(summary)
}

/// A missing store is reported and skipped; other store errors propagate.
fn report_missing(result: Result<usize, StoreError>, stage: &str) -> Result<Option<usize>> {
    match result {
        Ok(rows) => Ok(Some(rows)),
        Err(e) if e.is_not_found() => {
            log::warn!("Skipping {stage}: {e}");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("{stage} failed")),
    }
}

fn log_summary(summary: &Summary) {
    log::info!("=== Search Pipeline Summary ===");
    log::info!(
        "Pages: {} requested ({} failed, {} empty)",
        summary.pages_requested,
        summary.pages_failed,
        summary.pages_empty
    );
    log::info!(
        "Rows: {} written, {} items skipped",
        fmt_num(summary.rows_written),
        summary.items_skipped
    );
    if let Some(rows) = summary.rows_after_dedupe {
        log::info!("After dedupe: {}", fmt_num(rows));
    }
    if let Some(rows) = summary.rows_after_filter {
        log::info!("After filter: {}", fmt_num(rows));
    }
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());
}
