//! Extract sidebag token images from the scanned reference pages.
//!
//! Without arguments this processes `page-1.png` and `page-2.png` from the
//! default input directory into the default output directory, writing
//! debug overviews as well.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use sidebag_tokens::{driver, ExtractConfig};

use sidebag_tokens::core::parse_level;

#[cfg(not(feature = "tracing"))]
use sidebag_tokens::core::init_with_level;

#[cfg(feature = "tracing")]
use sidebag_tokens::core::init_tracing;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "sidebag-tokens")]
#[command(about = "Crop named circular tokens out of scanned reference pages")]
#[command(version)]
struct Cli {
    /// JSON config; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding page-<N>.png (overrides the config).
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving <token>.png (overrides the config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip the debug_page<N>.png overviews.
    #[arg(long)]
    no_debug: bool,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the effective config (defaults plus `--config` and the
    /// override flags) as JSON and exit.
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace). With `tracing`,
    /// `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit JSON log lines.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn build_config(&self) -> CliResult<ExtractConfig> {
        let mut cfg = match &self.config {
            Some(path) => ExtractConfig::load_json(path)
                .map_err(|e| format!("failed to load config {}: {e}", path.display()))?,
            None => ExtractConfig::default(),
        };
        if let Some(dir) = &self.input_dir {
            cfg.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if self.no_debug {
            cfg.debug = false;
        }
        Ok(cfg)
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = parse_level(&cli.log_level)
        .ok_or_else(|| format!("unknown log level `{}`", cli.log_level))?;

    #[cfg(not(feature = "tracing"))]
    {
        // `SetLoggerError` is only a `std::error::Error` with log's `std` feature.
        init_with_level(level).map_err(|e| format!("failed to install logger: {e}"))?;
    }

    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        init_tracing(level, cli.log_json);
    }

    run(cli)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(cli)))]
fn run(cli: Cli) -> CliResult<()> {
    let cfg = cli.build_config()?;

    if let Some(path) = &cli.write_config {
        cfg.write_json(path)?;
        println!("wrote config JSON to {}", path.display());
        return Ok(());
    }

    let report = driver::run(&cfg)?;
    info!(
        "done: {} tokens from {} pages into {}",
        report.total_tokens(),
        report.pages.len(),
        cfg.output_dir.display()
    );

    if let Some(path) = &cli.report {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        report.write_json(path)?;
        println!("wrote report JSON to {}", path.display());
    }
    Ok(())
}
