//! Tracing configuration for fliclib
//!
//! Stdout always gets a formatted layer. A daily-rolling file layer is added
//! when `logging.directory` is configured. `RUST_LOG` overrides every other
//! filter setting.

use std::path::Path;
use std::{fs, io, sync::OnceLock};

use fl_core::config::LoggingSection;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "fliclib.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives.
///
/// A configured `level` replaces the base level; per-crate directives follow
/// it so the workspace crates stay at least as verbose as the base.
fn build_filter_directives(is_dev: bool, level: Option<&str>) -> Vec<String> {
    let base = if is_dev { "debug" } else { "info" };
    let mut directives = vec![level.unwrap_or(base).to_string()];
    if level.is_none() {
        for krate in ["fl_core", "fl_app", "fl_infra", "fliclib"] {
            directives.push(format!("{krate}={base}"));
        }
    }
    // Diesel's r2d2 pool is chatty at debug.
    directives.push("r2d2=warn".to_string());
    directives
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before building the manager.
///
/// ```ignore
/// let config = fliclib::bootstrap::load_config("fliclib.toml")?;
/// fliclib::bootstrap::init_tracing_subscriber(&config.logging)?;
/// ```
///
/// # Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered. A log
/// directory that cannot be created only disables the file layer.
pub fn init_tracing_subscriber(logging: &LoggingSection) -> anyhow::Result<()> {
    let directives = build_filter_directives(is_development(), logging.level.as_deref());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives.join(",")));

    let file_writer = match logging.directory.as_deref().map(build_file_writer) {
        Some(Ok(writer)) => Some(writer),
        Some(Err(err)) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
        None => None,
    };

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stdout));

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(directory: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
