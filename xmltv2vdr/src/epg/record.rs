//! Finished-program data collected while a `<programme>` is open.

/// Record ids are the start minute, wrapped to 16 bits.
pub fn program_id(start: i64) -> u16 {
    start.div_euclid(60).rem_euclid(65536) as u16
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramRecord {
    /// Guide channel id as found in the input.
    pub channel: String,
    pub id: u16,
    /// Start time, epoch seconds.
    pub start: i64,
    /// Seconds from start to stop.
    pub duration: i64,
    pub title: String,
    pub short_text: String,
    pub description: String,
    /// Air date in parentheses, e.g. `(1999)`.
    pub air_date: String,
    pub genre_code: Option<String>,
    /// Concatenated rating codes.
    pub rating_text: String,
    pub episode_label: String,
    pub episode_short_code: String,
    pub star_rating: String,
    pub credits: String,
    pub credits_count: usize,
}

impl ProgramRecord {
    pub fn new(channel: impl Into<String>, start: i64, stop: i64) -> Self {
        Self {
            channel: channel.into(),
            id: program_id(start),
            start,
            duration: stop - start,
            ..Default::default()
        }
    }
}

/// Truncate to at most `max` characters, 0 meaning no limit.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    if max == 0 {
        return text;
    }
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
