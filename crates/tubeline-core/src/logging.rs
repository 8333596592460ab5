//! Logging setup: env_logger behind the `log` facade, bridged through
//! indicatif when a page bar is on screen.

use indicatif::MultiProgress;

/// HTTP stack crates that are chatty at debug level
const NOISY_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "native_tls"];

/// `[LEVEL]` tag for a log line, colored on a terminal.
fn level_tag(level: log::Level, color: bool) -> String {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return format!("[{label}]");
    }
    let ansi = match level {
        log::Level::Error => "\x1b[31m",
        log::Level::Warn => "\x1b[33m",
        log::Level::Info => "\x1b[32m",
        log::Level::Debug => "\x1b[36m",
        log::Level::Trace => "\x1b[35m",
    };
    format!("[{ansi}{label}\x1b[0m]")
}

/// One output line. Debug runs also name the emitting module, so api
/// and runner lines can be told apart.
fn format_line(record: &log::Record, color: bool, with_target: bool) -> String {
    let tag = level_tag(record.level(), color);
    if with_target {
        format!("{tag} {}: {}", record.target(), record.args())
    } else {
        format!("{tag} {}", record.args())
    }
}

/// Default filter string: our level, with the HTTP stack held at warn.
fn default_filter(quiet: bool, debug: bool) -> String {
    let level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let mut filter = level.to_string();
    if debug {
        for target in NOISY_TARGETS {
            filter.push_str(&format!(",{target}=warn"));
        }
    }
    filter
}

/// Terminal logger: prints above the search page bar and the dedupe/filter
/// spinners instead of through them.
pub struct IndicatifLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
    with_target: bool,
}

impl IndicatifLogger {
    pub fn new(inner: env_logger::Logger, multi: MultiProgress) -> Self {
        let with_target = inner.filter() >= log::LevelFilter::Debug;
        Self {
            inner,
            multi,
            with_target,
        }
    }
}

impl log::Log for IndicatifLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            let line = format_line(record, true, self.with_target);
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Set up logging for a tubeline command. `RUST_LOG` wins over the flags.
///
/// `search` on a terminal passes its `MultiProgress`; `dedupe`, `filter`
/// and piped output pass `None` and get plain uncolored lines on stderr.
pub fn init_logging(quiet: bool, debug: bool, multi: Option<&MultiProgress>) {
    use std::io::Write;

    let filter = default_filter(quiet, debug);
    let env = env_logger::Env::default().default_filter_or(filter);

    if let Some(multi) = multi {
        let logger = env_logger::Builder::from_env(env).build();
        let max_level = logger.filter();

        // A second init (tests, embedding) keeps the first logger.
        if log::set_boxed_logger(Box::new(IndicatifLogger::new(logger, multi.clone()))).is_ok() {
            log::set_max_level(max_level);
        }
    } else {
        let _ = env_logger::Builder::from_env(env)
            .format(move |buf, record| writeln!(buf, "{}", format_line(record, false, debug)))
            .try_init();
    }
}
