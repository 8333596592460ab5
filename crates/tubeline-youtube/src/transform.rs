//! Search result → tabular row extraction

use tubeline_core::{AppendReport, CsvSink, MissingFieldError, StoreError, TabularRow};

use crate::schema::{ResultPage, SearchResult};

fn required(value: Option<&String>, field: &'static str) -> Result<String, MissingFieldError> {
    value.cloned().ok_or(MissingFieldError::new(field))
}

/// Flatten one result. Any absent field fails the whole item; empty
/// strings are valid values.
pub fn extract_row(item: &SearchResult) -> Result<TabularRow, MissingFieldError> {
    let snippet = item
        .snippet
        .as_ref()
        .ok_or(MissingFieldError::new("snippet"))?;
    let thumbnail_url = snippet
        .thumbnails
        .as_ref()
        .and_then(|t| t.default.as_ref())
        .and_then(|t| t.url.as_ref());

    Ok(TabularRow {
        title: required(snippet.title.as_ref(), "snippet.title")?,
        description: required(snippet.description.as_ref(), "snippet.description")?,
        channel_title: required(snippet.channel_title.as_ref(), "snippet.channelTitle")?,
        channel_id: required(snippet.channel_id.as_ref(), "snippet.channelId")?,
        published_at: required(snippet.published_at.as_ref(), "snippet.publishedAt")?,
        default_thumbnail_url: required(thumbnail_url, "snippet.thumbnails.default.url")?,
    })
}

/// Append every extractable item of `page` to `sink`.
pub fn append_page(page: &ResultPage, sink: &mut CsvSink) -> Result<AppendReport, StoreError> {
    sink.append(page.items.iter().map(extract_row))
}
