//! Pipeline state types for YouTube search runs

use serde::Deserialize;

use crate::schema::ResultPage;

/// `videoDuration` filter of `search.list`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoDuration {
    #[default]
    Any,
    /// Over 20 minutes
    Long,
    /// 4 to 20 minutes
    Medium,
    /// Under 4 minutes
    Short,
}

impl VideoDuration {
    /// Parse CLI/config string into enum
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "any" => Some(Self::Any),
            "long" => Some(Self::Long),
            "medium" => Some(Self::Medium),
            "short" => Some(Self::Short),
            _ => None,
        }
    }

    /// Query parameter value
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Long => "long",
            Self::Medium => "medium",
            Self::Short => "short",
        }
    }
}

impl std::fmt::Display for VideoDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Where a run is. `Writing` owns the page fetched by the preceding
/// `Fetching` step with the same index.
#[derive(Debug)]
pub enum Stage {
    Fetching(usize),
    Writing(usize, ResultPage),
    Deduplicating,
    Filtering,
    Done,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetching(_) => "fetching",
            Self::Writing(..) => "writing",
            Self::Deduplicating => "dedupe",
            Self::Filtering => "filter",
            Self::Done => "done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_valid() {
        assert_eq!(VideoDuration::from_name("any"), Some(VideoDuration::Any));
        assert_eq!(VideoDuration::from_name("long"), Some(VideoDuration::Long));
        assert_eq!(VideoDuration::from_name("medium"), Some(VideoDuration::Medium));
        assert_eq!(VideoDuration::from_name("short"), Some(VideoDuration::Short));
    }

    #[test]
    fn from_name_invalid() {
        assert_eq!(VideoDuration::from_name("Long"), None);
        assert_eq!(VideoDuration::from_name(""), None);
    }

    #[test]
    fn deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrap {
            d: VideoDuration,
        }
        let w: Wrap = serde_json::from_str(r#"{"d": "medium"}"#).unwrap();
        assert_eq!(w.d, VideoDuration::Medium);
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Fetching(2).name(), "fetching");
        assert_eq!(Stage::Writing(0, ResultPage::default()).name(), "writing");
        assert_eq!(Stage::Done.name(), "done");
    }
}
