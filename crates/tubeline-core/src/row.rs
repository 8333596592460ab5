//! Tabular row model shared by the sink, deduplicator and filter

use serde::{Deserialize, Serialize};

/// Column names in file order. Also the store's header line.
pub const HEADER: [&str; 6] = [
    "title",
    "description",
    "channelTitle",
    "channelId",
    "publishedAt",
    "default_thumbnail_url",
];

/// One search result flattened to the six persisted fields.
///
/// Field order matches [`HEADER`]; serde names match the header so the
/// csv reader maps columns by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabularRow {
    pub title: String,
    pub description: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    #[serde(rename = "channelId")]
    pub channel_id: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub default_thumbnail_url: String,
}

impl TabularRow {
    /// Fields in [`HEADER`] order
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.title,
            &self.description,
            &self.channel_title,
            &self.channel_id,
            &self.published_at,
            &self.default_thumbnail_url,
        ]
    }
}
