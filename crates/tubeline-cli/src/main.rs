//! tubeline - YouTube search to CSV pipeline
//!
//! Pages through YouTube search results for a query, appends them to a
//! CSV store, then deduplicates and keyword-filters the store.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "tubeline")]
#[command(about = "Collect YouTube search results into a filtered CSV")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file path (default: ./tubeline.toml or ~/.config/tubeline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Search, append results to the store, then dedupe and filter it
    Search(cmd::search::SearchArgs),
    /// Remove duplicate rows from a store
    Dedupe(cmd::store::DedupeArgs),
    /// Keep only rows matching keywords
    Filter(cmd::store::FilterArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    // .env before config: the default api_key is read from the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let progress = tubeline_core::ProgressContext::new();
    let multi = if progress.is_tty() {
        Some(progress.multi())
    } else {
        None
    };
    tubeline_core::init_logging(cli.quiet, cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Search(args) => cmd::search::run(args, &config, &progress),
        Command::Dedupe(args) => cmd::store::run_dedupe(args),
        Command::Filter(args) => cmd::store::run_filter(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec!["API base URL", &config.youtube.base_url]);
            table.add_row(vec![
                "API key",
                if config.youtube.api_key.is_some() {
                    "configured"
                } else {
                    "not set"
                },
            ]);
            table.add_row(vec![
                "Timeout",
                &format!("{}s", config.youtube.timeout_secs),
            ]);
            table.add_row(vec!["Duration", config.search.duration.api_name()]);
            table.add_row(vec![
                "Language",
                if config.search.language.is_empty() {
                    "-"
                } else {
                    config.search.language.as_str()
                },
            ]);
            table.add_row(vec!["Pages", &config.search.max_pages.to_string()]);
            table.add_row(vec!["Page size", &config.search.page_size.to_string()]);
            table.add_row(vec![
                "Store",
                &config.output.path.display().to_string(),
            ]);
            table.add_row(vec![
                "Token log",
                &if config.search.save_page_tokens {
                    config.output.token_log.display().to_string()
                } else {
                    "disabled".to_string()
                },
            ]);
            table.add_row(vec!["Keywords", &config.filter.keywords.join(", ")]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
