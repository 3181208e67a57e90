//! Settings consumed by the transformation and the session, plus the
//! optional TOML configuration file.
//!
//! ```toml
//! [files]
//! channels = "/etc/vdr/channels.conf"
//! genres = "/etc/vdr/genres.conf"
//!
//! [epg]
//! language = "de"
//! max_credits = 8
//!
//! [svdrp]
//! host = "vdr.local"
//! timeout = 600
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use xmltv2vdr_protocol::DEFAULT_PORT;

/// Configuration file picked up from the working directory when no path is
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "xmltv2vdr.toml";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_CHARSET: &str = "iso-8859-1";

/// Largest accepted time offset in either direction, in minutes.
pub const MAX_TIME_OFFSET: i64 = 24 * 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings of the transformation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    /// Minutes added to every start and stop time.
    pub time_offset: i64,
    /// Maximum description length in characters, 0 for unlimited.
    pub max_description: usize,
    /// Maximum number of credit entries, 0 for unlimited.
    pub max_credits: usize,
    pub priority: i32,
    /// Preferred language tag for localized elements.
    pub language: String,
    /// Capture star ratings and episode numbering schemes.
    pub extras: bool,
    /// Log recoverable content problems.
    pub warnings: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            time_offset: 0,
            max_description: 0,
            max_credits: 0,
            priority: 0,
            language: DEFAULT_LANGUAGE.to_string(),
            extras: false,
            warnings: false,
        }
    }
}

impl TransformConfig {
    /// Time offset in seconds.
    pub fn offset_secs(&self) -> i64 {
        self.time_offset.saturating_mul(60)
    }
}

/// Where simulated sessions write the transmitted bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationTarget {
    Stdout,
    File(PathBuf),
}

impl SimulationTarget {
    /// `-` or an empty value selects stdout.
    pub fn from_arg(value: &str) -> Self {
        match value.trim() {
            "" | "-" => Self::Stdout,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

/// Settings of the delivery session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    /// Deadline for the whole session, connect through quit.
    pub timeout: Duration,
    /// Charset label the records are encoded with.
    pub charset: String,
    /// Replace the live connection with a local sink.
    pub simulate: Option<SimulationTarget>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            charset: DEFAULT_CHARSET.to_string(),
            simulate: None,
        }
    }
}

impl SessionConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration file format.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub files: FilesSection,
    #[serde(default)]
    pub epg: EpgSection,
    #[serde(default)]
    pub svdrp: SvdrpSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct FilesSection {
    pub input: Option<PathBuf>,
    pub channels: Option<PathBuf>,
    pub genres: Option<PathBuf>,
    pub ratings: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EpgSection {
    pub time_offset: Option<i64>,
    pub max_description: Option<usize>,
    pub max_credits: Option<usize>,
    pub priority: Option<i32>,
    pub language: Option<String>,
    pub extras: Option<bool>,
    pub warnings: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SvdrpSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Seconds.
    pub timeout: Option<u64>,
    pub charset: Option<String>,
    /// `-` for stdout, otherwise a file path.
    pub simulate: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit path, else [`DEFAULT_CONFIG_FILE`] if present in `dir`.
    pub fn locate(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
        explicit.map(Path::to_path_buf).or_else(|| {
            let default_path = dir.join(DEFAULT_CONFIG_FILE);
            default_path.exists().then_some(default_path)
        })
    }

    /// Transformation settings from the `[epg]` section over the defaults.
    pub fn transform(&self) -> TransformConfig {
        let defaults = TransformConfig::default();
        let epg = &self.epg;
        TransformConfig {
            time_offset: epg.time_offset.unwrap_or(defaults.time_offset),
            max_description: epg.max_description.unwrap_or(defaults.max_description),
            max_credits: epg.max_credits.unwrap_or(defaults.max_credits),
            priority: epg.priority.unwrap_or(defaults.priority),
            language: epg.language.clone().unwrap_or(defaults.language),
            extras: epg.extras.unwrap_or(defaults.extras),
            warnings: epg.warnings.unwrap_or(defaults.warnings),
        }
    }

    /// Session settings from the `[svdrp]` section over the defaults.
    pub fn session(&self) -> SessionConfig {
        let defaults = SessionConfig::default();
        let svdrp = &self.svdrp;
        SessionConfig {
            host: svdrp.host.clone().unwrap_or(defaults.host),
            port: svdrp.port.unwrap_or(defaults.port),
            timeout: svdrp
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            charset: svdrp.charset.clone().unwrap_or(defaults.charset),
            simulate: svdrp.simulate.as_deref().map(SimulationTarget::from_arg),
        }
    }
}
