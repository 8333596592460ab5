//! Search pipeline configuration

use std::path::PathBuf;

use crate::api::MAX_PAGE_SIZE;
use crate::state::VideoDuration;

pub const DEFAULT_MAX_PAGES: usize = 3;
pub const DEFAULT_LANGUAGE: &str = "ru";
pub const DEFAULT_OUTPUT: &str = "audiobooks.csv";
pub const DEFAULT_TOKEN_LOG: &str = "page_token.txt";
pub const DEFAULT_KEYWORDS: [&str; 2] = ["аудиокниг", "радиоспектакл"];

/// CLI-facing arguments for the search command (plain struct, no clap derive).
///
/// `None` means "use the default".
#[derive(Debug, Default)]
pub struct SearchArgs {
    pub query: String,
    pub duration: Option<String>,
    pub language: Option<String>,
    pub max_pages: Option<usize>,
    pub page_size: Option<u8>,
    pub output: Option<PathBuf>,
    /// `Some(None)` disables the token log
    pub token_log: Option<Option<PathBuf>>,
    pub keywords: Option<Vec<String>>,
    pub page_token: Option<String>,
    pub dedupe: bool,
    pub filter: bool,
}

/// Runtime configuration for one search run
#[derive(Debug, Clone)]
pub struct Config {
    pub query: String,
    pub duration: VideoDuration,
    pub language: Option<String>,
    pub max_pages: usize,
    pub page_size: u8,
    pub output_path: PathBuf,
    pub token_log: Option<PathBuf>,
    pub keywords: Vec<String>,
    /// Cursor for the first request
    pub start_token: Option<String>,
    pub dedupe: bool,
    pub filter: bool,
}

impl Config {
    /// Defaults for `query`: long videos in Russian, 3 pages of 50, into
    /// `audiobooks.csv`, filtered for audiobooks and radio plays.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            duration: VideoDuration::Long,
            language: Some(DEFAULT_LANGUAGE.to_string()),
            max_pages: DEFAULT_MAX_PAGES,
            page_size: MAX_PAGE_SIZE,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            token_log: Some(PathBuf::from(DEFAULT_TOKEN_LOG)),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            start_token: None,
            dedupe: true,
            filter: true,
        }
    }
}

impl TryFrom<SearchArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        anyhow::ensure!(!args.query.trim().is_empty(), "Search query must not be empty");

        let mut config = Self::new(args.query);
        if let Some(ref name) = args.duration {
            config.duration = VideoDuration::from_name(name).ok_or_else(|| {
                anyhow::anyhow!("Unknown duration: {name} (expected any, long, medium, short)")
            })?;
        }
        if let Some(lang) = args.language {
            config.language = Some(lang).filter(|l| !l.is_empty());
        }
        if let Some(max_pages) = args.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(page_size) = args.page_size {
            anyhow::ensure!(
                page_size <= MAX_PAGE_SIZE,
                "Page size must be in 0..={MAX_PAGE_SIZE}, got {page_size}"
            );
            config.page_size = page_size;
        }
        if let Some(output) = args.output {
            config.output_path = output;
        }
        if let Some(token_log) = args.token_log {
            config.token_log = token_log;
        }
        if let Some(keywords) = args.keywords {
            config.keywords = keywords;
        }
        config.start_token = args.page_token.filter(|t| !t.is_empty());
        config.dedupe = args.dedupe;
        config.filter = args.filter;
        Ok(config)
    }
}
