//! Console logging plus an optional debug log file.
//!
//! Console output goes to stderr so that a simulated session can use
//! stdout. `RUST_LOG` overrides the configured level.

use std::io;
use std::path::Path;

use chrono::Local;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::registry::{LookupSpan, Registry};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Level of the debug log file, independent of the console filter.
const DEBUG_LOG_LEVEL: &str = "debug";

/// Initialize logging.
///
/// # Arguments
/// * `level` - Filter used when `RUST_LOG` is unset (`None`: `info`)
/// * `verbose` - Force `debug` when `RUST_LOG` is unset
/// * `debug_log` - File that receives every record down to `debug`, with
///   source locations, whatever the console level
///
/// The returned guard must stay alive until exit so the file is flushed.
pub fn init_logging(
    level: Option<&str>,
    verbose: bool,
    debug_log: Option<&Path>,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let default_level = if verbose {
        "debug"
    } else {
        level.unwrap_or("info")
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_layer, guard) = match debug_log {
        Some(path) => {
            let (layer, guard) = debug_file_layer::<Registry>(path)?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry().with(file_layer).with(
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_level(true)
            .with_timer(LocalTimeTimer)
            .with_filter(env_filter),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set default subscriber: {}", e))?;

    // Bridge log:: macros used throughout the crate to tracing
    tracing_log::LogTracer::init()
        .map_err(|e| format!("Failed to initialize LogTracer: {}", e))?;

    Ok(guard)
}

/// Non-ANSI file layer with source locations, filtered at `debug`.
fn debug_file_layer<S>(
    path: &Path,
) -> Result<(impl Layer<S>, WorkerGuard), Box<dyn std::error::Error>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("Invalid debug log path: {}", path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_timer(LocalTimeTimer)
        .with_filter(EnvFilter::new(DEBUG_LOG_LEVEL));
    Ok((layer, guard))
}

/// Custom timer for local time formatting in logs
#[derive(Debug, Clone, Copy)]
struct LocalTimeTimer;

impl fmt::time::FormatTime for LocalTimeTimer {
    fn format_time(&self, w: &mut fmt::format::Writer) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}
