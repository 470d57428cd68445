//! Minimal logger.
//!
//! Progress lines go to stderr as `[elapsed LEVEL] message`. Install it once
//! at startup with `init_with_level`; with the `tracing` feature enabled,
//! `init_tracing` installs a `tracing-subscriber` formatter instead.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct ProgressLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = if self.level >= LevelFilter::Debug {
            writeln!(
                stderr,
                "[{:7.3}s {:>5} {}] {}",
                elapsed,
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(
                stderr,
                "[{:7.3}s {:>5}] {}",
                elapsed,
                record.level(),
                record.args()
            )
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<ProgressLogger> = OnceLock::new();

/// Install the progress logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| ProgressLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Parse a level name (`off`, `error`, ..., `trace`), case-insensitive.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Filter used when `RUST_LOG` is unset: `level` for this workspace's
/// crates, warnings only for everything else.
#[cfg(feature = "tracing")]
fn fallback_filter(level: LevelFilter) -> EnvFilter {
    let level = level.as_str().to_ascii_lowercase();
    EnvFilter::new(format!(
        "warn,sidebag_tokens={level},sidebag_tokens_core={level},sidebag_tokens_hough={level}"
    ))
}

/// Install a `tracing-subscriber` formatter. `RUST_LOG` wins over `level`.
///
/// Span close events carry their busy time, which is how per-page and
/// detector timings show up. Later calls are no-ops.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
