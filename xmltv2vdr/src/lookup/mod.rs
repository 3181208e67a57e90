//! Lookup tables: channel table, genre table and rating table.
//!
//! All three files share the same line rules: `#` starts a comment, blank
//! lines are ignored and fields are separated by `:`.

mod channel;
mod table;

pub use channel::*;
pub use table::*;

use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

/// Lookup loading error types. All of them are fatal for a run.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: malformed channel line: {reason}")]
    MalformedChannel {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{path}:{line}: malformed entry, expected `text : code`")]
    MalformedEntry { path: PathBuf, line: usize },
}

pub type Result<T> = std::result::Result<T, LookupError>;

/// The three read-only tables consulted while transforming guide events.
#[derive(Debug, Default)]
pub struct LookupTables {
    pub channels: ChannelTable,
    pub genres: CodeTable,
    pub ratings: CodeTable,
}

impl LookupTables {
    /// Load the channel table and the optional genre and rating tables.
    pub fn load(
        channels_path: &Path,
        genres: Option<&Path>,
        ratings: Option<&Path>,
    ) -> Result<Self> {
        let channels = ChannelTable::load(channels_path)?;
        if channels.is_empty() {
            warn!(
                "Channel table {} has no entries, no records will be delivered",
                channels_path.display()
            );
        }
        let genres = genres.map(CodeTable::load).transpose()?.unwrap_or_default();
        let ratings = ratings.map(CodeTable::load).transpose()?.unwrap_or_default();

        info!(
            "Loaded {} channels ({} guide aliases), {} genres, {} ratings",
            channels.len(),
            channels.alias_count(),
            genres.len(),
            ratings.len()
        );

        Ok(Self {
            channels,
            genres,
            ratings,
        })
    }
}

/// Read a lookup file, naming the path in the error.
fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| LookupError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Iterate over meaningful lines as `(line_number, content)`, with comments
/// stripped and surrounding whitespace trimmed.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(idx, line)| {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            None
        } else {
            Some((idx + 1, line))
        }
    })
}
