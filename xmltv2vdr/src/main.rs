//! xmltv2vdr: push XMLTV guide data into a VDR receiver's EPG.
//!
//! Reads the whole guide, renders EPG records per channel, then clears the
//! receiver's schedule and uploads the records over SVDRP.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use xmltv2vdr::config::{
    ConfigFile, SessionConfig, SimulationTarget, TransformConfig, MAX_TIME_OFFSET,
};
use xmltv2vdr::lookup::LookupTables;
use xmltv2vdr::{session, transform};

mod logging;

/// Input path meaning stdin.
const STDIN: &str = "-";

/// xmltv2vdr - Push XMLTV guide data into a VDR receiver's EPG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// XMLTV file to read, `-` for stdin
    input: Option<PathBuf>,

    /// Channel table mapping receiver channels to guide channel ids
    #[arg(short, long)]
    channels: Option<PathBuf>,

    /// Genre table (`category : code`)
    #[arg(short, long)]
    genres: Option<PathBuf>,

    /// Rating table (`rating : age code`)
    #[arg(short, long)]
    ratings: Option<PathBuf>,

    /// Receiver host
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Receiver SVDRP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Deadline for the whole session in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Minutes added to every start and stop time
    #[arg(short = 'o', long, allow_hyphen_values = true)]
    time_offset: Option<i64>,

    /// Maximum description length in characters (0 = unlimited)
    #[arg(long)]
    max_description: Option<usize>,

    /// Maximum number of credit entries (0 = unlimited)
    #[arg(long)]
    max_credits: Option<usize>,

    /// Priority written into every record
    #[arg(long)]
    priority: Option<i32>,

    /// Preferred language tag for titles, descriptions and categories
    #[arg(short, long)]
    language: Option<String>,

    /// Include star ratings and interpret episode numbering schemes
    #[arg(short = 'x', long)]
    extras: bool,

    /// Log recoverable problems in the guide data
    #[arg(short, long)]
    warnings: bool,

    /// Do not connect; write the session to a file (`-` or no value: stdout)
    #[arg(short, long, num_args = 0..=1, default_missing_value = "-")]
    simulate: Option<String>,

    /// Charset the records are sent in
    #[arg(long)]
    charset: Option<String>,

    /// Configuration file path
    #[arg(short = 'f', long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Also write debug-level logs to this file, whatever the console level
    #[arg(long)]
    debug_log: Option<PathBuf>,
}

/// Command line merged over the configuration file and the defaults.
#[derive(Debug)]
struct Settings {
    input: PathBuf,
    channels: PathBuf,
    genres: Option<PathBuf>,
    ratings: Option<PathBuf>,
    transform: TransformConfig,
    session: SessionConfig,
    log_level: Option<String>,
    verbose: bool,
    debug_log: Option<PathBuf>,
}

impl Settings {
    /// Command line takes precedence over the file.
    fn resolve(args: Args, file: ConfigFile) -> Result<Self, String> {
        let transform_defaults = file.transform();
        let session_defaults = file.session();

        let channels = args
            .channels
            .or(file.files.channels)
            .ok_or("No channel table given (--channels or [files] channels)")?;

        let time_offset = args.time_offset.unwrap_or(transform_defaults.time_offset);
        if !(-MAX_TIME_OFFSET..=MAX_TIME_OFFSET).contains(&time_offset) {
            return Err(format!(
                "Time offset {} out of range (at most {} minutes either way)",
                time_offset, MAX_TIME_OFFSET
            ));
        }

        let transform = TransformConfig {
            time_offset,
            max_description: args
                .max_description
                .unwrap_or(transform_defaults.max_description),
            max_credits: args.max_credits.unwrap_or(transform_defaults.max_credits),
            priority: args.priority.unwrap_or(transform_defaults.priority),
            language: args.language.unwrap_or(transform_defaults.language),
            extras: args.extras || transform_defaults.extras,
            warnings: args.warnings || transform_defaults.warnings,
        };

        let session = SessionConfig {
            host: args.host.unwrap_or(session_defaults.host),
            port: args.port.unwrap_or(session_defaults.port),
            timeout: args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(session_defaults.timeout),
            charset: args.charset.unwrap_or(session_defaults.charset),
            simulate: args
                .simulate
                .as_deref()
                .map(SimulationTarget::from_arg)
                .or(session_defaults.simulate),
        };

        Ok(Self {
            input: args
                .input
                .or(file.files.input)
                .unwrap_or_else(|| PathBuf::from(STDIN)),
            channels,
            genres: args.genres.or(file.files.genres),
            ratings: args.ratings.or(file.files.ratings),
            transform,
            session,
            log_level: file.logging.level,
            verbose: args.verbose,
            debug_log: args.debug_log.or(file.logging.debug_log),
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load config file: explicit path > auto-detect > default
    let config_path = ConfigFile::locate(args.config.as_deref(), &std::env::current_dir()?);
    let file_config = match &config_path {
        Some(path) => ConfigFile::load(path).map_err(|e| {
            eprintln!("{}", e);
            e
        })?,
        None => ConfigFile::default(),
    };

    let settings = Settings::resolve(args, file_config).map_err(|e| {
        eprintln!("{}", e);
        e
    })?;

    let _log_guard = logging::init_logging(
        settings.log_level.as_deref(),
        settings.verbose,
        settings.debug_log.as_deref(),
    )?;
    if let Some(path) = &config_path {
        info!("Loaded config from: {}", path.display());
    }

    if let Err(e) = run(&settings).await {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let tables = LookupTables::load(
        &settings.channels,
        settings.genres.as_deref(),
        settings.ratings.as_deref(),
    )?;

    let now = chrono::Utc::now().timestamp();
    let (store, stats) = if settings.input == Path::new(STDIN) {
        info!("Reading guide from stdin");
        transform(io::stdin().lock(), &tables, &settings.transform, now)?
    } else {
        info!("Reading guide from {}", settings.input.display());
        let file = File::open(&settings.input)
            .map_err(|e| format!("Failed to open {}: {}", settings.input.display(), e))?;
        transform(BufReader::new(file), &tables, &settings.transform, now)?
    };
    info!("Transformed guide: {}", stats);
    info!(
        "{} of {} guide channels have records",
        store.filled(),
        tables.channels.alias_count()
    );

    let report = session::deliver(&settings.session, &store, &tables.channels).await?;
    info!(
        "Delivered {} channels ({} bytes)",
        report.channels, report.bytes
    );
    Ok(())
}
