//! Search subcommand - fetch pages, write, dedupe, filter

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use tubeline_core::{PageTokenLog, ProgressContext};
use tubeline_youtube::{VideoDuration, YouTubeClient};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query, e.g. "аудиокнига шлинк"
    pub query: String,

    /// Number of result pages to fetch
    #[arg(short, long)]
    pub pages: Option<usize>,

    /// Video duration bucket
    #[arg(short, long, value_enum)]
    pub duration: Option<DurationArg>,

    /// Relevance language hint (empty string disables it)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Results per page (0-50)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=50))]
    pub page_size: Option<u8>,

    /// Output CSV store
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Page token log file
    #[arg(long)]
    pub token_log: Option<PathBuf>,

    /// Don't record page tokens
    #[arg(long, conflicts_with = "token_log")]
    pub no_token_log: bool,

    /// Comma-separated keywords to keep (matched in title or description)
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,

    /// Start from this page token instead of the first page
    #[arg(long)]
    pub page_token: Option<String>,

    /// Start from the last token in the page token log
    #[arg(long, conflicts_with = "page_token")]
    pub resume: bool,

    /// Skip the dedupe stage
    #[arg(long)]
    pub no_dedupe: bool,

    /// Skip the keyword filter stage
    #[arg(long)]
    pub no_filter: bool,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum DurationArg {
    Any,
    Long,
    Medium,
    Short,
}

impl From<DurationArg> for VideoDuration {
    fn from(d: DurationArg) -> Self {
        match d {
            DurationArg::Any => VideoDuration::Any,
            DurationArg::Long => VideoDuration::Long,
            DurationArg::Medium => VideoDuration::Medium,
            DurationArg::Short => VideoDuration::Short,
        }
    }
}

/// Merge CLI flags over the config file into pipeline arguments
fn pipeline_args(args: SearchArgs, config: &Config) -> Result<tubeline_youtube::config::SearchArgs> {
    // An explicit --token-log wins over `save_page_tokens = false`.
    let token_log = match args.token_log {
        _ if args.no_token_log => None,
        Some(path) => Some(path),
        None if config.search.save_page_tokens => Some(config.output.token_log.clone()),
        None => None,
    };

    let page_token = if args.resume {
        let path = token_log
            .as_deref()
            .context("--resume needs a page token log")?;
        let token = PageTokenLog::last_token(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        match &token {
            Some(t) => log::info!("Resuming from page token {t}"),
            None => log::warn!("No page token in {}, starting from the first page", path.display()),
        }
        token
    } else {
        args.page_token
    };

    let duration = args
        .duration
        .map(VideoDuration::from)
        .unwrap_or(config.search.duration);

    Ok(tubeline_youtube::config::SearchArgs {
        query: args.query,
        duration: Some(duration.api_name().to_string()),
        language: Some(args.language.unwrap_or_else(|| config.search.language.clone())),
        max_pages: Some(args.pages.unwrap_or(config.search.max_pages)),
        page_size: Some(args.page_size.unwrap_or(config.search.page_size)),
        output: Some(args.output.unwrap_or_else(|| config.output.path.clone())),
        token_log: Some(token_log),
        keywords: Some(args.keywords.unwrap_or_else(|| config.filter.keywords.clone())),
        page_token,
        dedupe: !args.no_dedupe,
        filter: !args.no_filter,
    })
}

pub fn run(args: SearchArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let api_key = config
        .youtube
        .api_key
        .clone()
        .context("YOUTUBE_API_KEY environment variable (or youtube.api_key) required")?;

    let pipeline_config = tubeline_youtube::Config::try_from(pipeline_args(args, config)?)?;
    let client = YouTubeClient::new(api_key)
        .with_base_url(config.youtube.base_url.clone())
        .with_timeout(Duration::from_secs(config.youtube.timeout_secs));

    let summary = tubeline_youtube::run(&client, &pipeline_config, progress)?;
    if summary.pages_failed == summary.pages_requested && summary.pages_requested > 0 {
        log::warn!("Every search request failed; check the API key and quota");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SearchArgs,
    }

    fn parse(argv: &[&str]) -> SearchArgs {
        let mut full = vec!["tubeline"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn defaults_come_from_config() {
        let args = pipeline_args(parse(&["аудиокнига шлинк"]), &Config::default()).unwrap();
        let config = tubeline_youtube::Config::try_from(args).unwrap();
        assert_eq!(config.duration, VideoDuration::Long);
        assert_eq!(config.language.as_deref(), Some("ru"));
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.output_path, PathBuf::from("audiobooks.csv"));
        assert_eq!(config.token_log, Some(PathBuf::from("page_token.txt")));
        assert!(config.dedupe && config.filter);
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&[
            "q",
            "--pages",
            "7",
            "--duration",
            "short",
            "--keywords",
            "a,b",
            "--no-token-log",
            "--no-filter",
        ]);
        let config =
            tubeline_youtube::Config::try_from(pipeline_args(args, &Config::default()).unwrap())
                .unwrap();
        assert_eq!(config.max_pages, 7);
        assert_eq!(config.duration, VideoDuration::Short);
        assert_eq!(config.keywords, ["a", "b"]);
        assert_eq!(config.token_log, None);
        assert!(config.dedupe);
        assert!(!config.filter);
    }

    #[test]
    fn explicit_token_log_overrides_disabled_config() {
        let mut file_config = Config::default();
        file_config.search.save_page_tokens = false;

        let args = pipeline_args(parse(&["q"]), &file_config).unwrap();
        assert_eq!(args.token_log, Some(None));

        let args = pipeline_args(parse(&["q", "--token-log", "tokens.txt"]), &file_config).unwrap();
        assert_eq!(args.token_log, Some(Some(PathBuf::from("tokens.txt"))));
    }

    #[test]
    fn page_size_over_fifty_rejected_by_parser() {
        assert!(TestCli::try_parse_from(["tubeline", "q", "--page-size", "51"]).is_err());
    }

    #[test]
    fn resume_conflicts_with_page_token() {
        assert!(
            TestCli::try_parse_from(["tubeline", "q", "--resume", "--page-token", "T"]).is_err()
        );
    }

    #[test]
    fn resume_reads_last_token() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_path = dir.path().join("tokens.txt");
        std::fs::write(&log_path, "T1\nT2\n").unwrap();

        let log_arg = log_path.to_string_lossy().to_string();
        let args = parse(&["q", "--resume", "--token-log", &log_arg]);
        let args = pipeline_args(args, &Config::default()).unwrap();
        assert_eq!(args.page_token.as_deref(), Some("T2"));
    }
}
