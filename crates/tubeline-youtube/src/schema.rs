//! `search.list` response shape
//!
//! Every field is optional on the wire; which ones are required is decided
//! in [`crate::transform`], per item.

use serde::Deserialize;

/// One page of `search.list` results
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
    pub prev_page_token: Option<String>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: Option<u64>,
    pub results_per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResult {
    pub id: Option<ResultId>,
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultId {
    pub kind: Option<String>,
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub published_at: Option<String>,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: Option<Thumbnails>,
    pub channel_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ResultPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "kind": "youtube#searchListResponse",
        "etag": "abc",
        "nextPageToken": "CDIQAA",
        "regionCode": "RU",
        "pageInfo": {"totalResults": 1000000, "resultsPerPage": 50},
        "items": [{
            "kind": "youtube#searchResult",
            "id": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"},
            "snippet": {
                "publishedAt": "2021-03-04T18:00:11Z",
                "channelId": "UCabc",
                "title": "Аудиокнига Шлинк",
                "description": "Читает ...",
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg", "width": 120, "height": 90}
                },
                "channelTitle": "Книги вслух",
                "liveBroadcastContent": "none"
            }
        }]
    }"#;

    #[test]
    fn parses_full_page() {
        let page: ResultPage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.page_info.and_then(|p| p.total_results),
            Some(1_000_000)
        );

        let snippet = page.items[0].snippet.as_ref().unwrap();
        assert_eq!(snippet.title.as_deref(), Some("Аудиокнига Шлинк"));
        assert_eq!(snippet.channel_title.as_deref(), Some("Книги вслух"));
        let thumb = snippet.thumbnails.as_ref().unwrap().default.as_ref().unwrap();
        assert_eq!(thumb.width, Some(120));
    }

    #[test]
    fn missing_items_is_empty_page() {
        let page: ResultPage = serde_json::from_str(r#"{"kind": "youtube#searchListResponse"}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.next_page_token, None);
    }

    #[test]
    fn missing_snippet_fields_parse_as_none() {
        let page: ResultPage =
            serde_json::from_str(r#"{"items": [{"snippet": {"title": "x"}}]}"#).unwrap();
        let snippet = page.items[0].snippet.as_ref().unwrap();
        assert_eq!(snippet.description, None);
        assert_eq!(snippet.thumbnails, None);
    }
}
