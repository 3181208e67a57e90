//! Episode number encoding.
//!
//! Positional numbers (`xmltv_ns`) are zero-based `season.episode.part`
//! groups, each optionally `number/total`:
//!
//! ```text
//! "1.2.0/3"  ->  label "Season 2 - Episode 3 ", short code "s02e03"
//! ```

use super::vocabulary::Vocabulary;

/// Numbering scheme taken from the `system` attribute of `episode-num`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingScheme {
    /// `xmltv_ns`
    Positional,
    /// `onscreen`
    FreeForm,
}

impl NumberingScheme {
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "xmltv_ns" => Some(Self::Positional),
            "onscreen" => Some(Self::FreeForm),
            _ => None,
        }
    }
}

/// Encoded episode number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeNumber {
    /// Long form for the description, e.g. `Season 2 - Episode 3 `.
    pub label: String,
    /// Compact form usable as short text, e.g. `s02e03`.
    pub short_code: String,
}

/// Encode raw `episode-num` text according to its numbering scheme.
///
/// Without a scheme the raw text is passed through as the label.
pub fn encode(raw: &str, scheme: Option<NumberingScheme>, vocab: &Vocabulary) -> EpisodeNumber {
    match scheme {
        Some(NumberingScheme::Positional) => encode_positional(raw, vocab),
        Some(NumberingScheme::FreeForm) => EpisodeNumber {
            label: format!("{} {}", vocab.episode, raw.trim()),
            short_code: String::new(),
        },
        None => EpisodeNumber {
            label: raw.trim().to_string(),
            short_code: String::new(),
        },
    }
}

/// One `number[/total]` group of a positional number.
struct Component {
    /// One-based number as displayed.
    number: u32,
    total: Option<u32>,
}

impl Component {
    /// Parse a group. An empty or non-numeric number means the group is
    /// absent.
    fn parse(group: &str) -> Option<Self> {
        let (number, total) = match group.split_once('/') {
            Some((number, total)) => (number, total.parse().ok()),
            None => (group, None),
        };
        let number: u32 = number.parse().ok()?;
        Some(Self {
            number: number.saturating_add(1),
            total,
        })
    }

    fn segment(&self, word: &str) -> String {
        match self.total {
            Some(total) => format!("{} {}/{}", word, self.number, total),
            None => format!("{} {}", word, self.number),
        }
    }
}

fn encode_positional(raw: &str, vocab: &Vocabulary) -> EpisodeNumber {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut groups = compact.split('.').map(Component::parse);
    let season = groups.next().flatten();
    let episode = groups.next().flatten();
    // Part 1 of 1 (zero-based 0) says nothing worth printing.
    let part = groups.next().flatten().filter(|p| p.number > 1);

    let mut segments = Vec::with_capacity(3);
    let mut short_code = String::new();

    if let Some(season) = &season {
        segments.push(season.segment(vocab.season));
        short_code.push_str(&format!("s{:02}", season.number));
    }
    if let Some(episode) = &episode {
        segments.push(episode.segment(vocab.episode));
        short_code.push_str(&format!("e{:02}", episode.number));
    }
    if let Some(part) = &part {
        segments.push(part.segment(vocab.part));
    }

    let mut label = segments.join(" - ");
    if !label.is_empty() {
        label.push(' ');
    }

    EpisodeNumber { label, short_code }
}
