//! Program record accumulator.
//!
//! Consumes guide events in order and keeps at most one open program:
//!
//! ```text
//! Idle ──ProgramStart (accepted)──▶ InProgram ──ElementEnd(programme)──▶ Idle
//!   ▲                                   │
//!   └──────── ProgramStart (rejected) ──┘ children of rejected programs are ignored
//! ```
//!
//! A finished program is rendered and appended to its channel in the
//! [`ChannelRecordStore`]; a discarded one leaves no trace.

use std::fmt;

use log::{debug, warn};

use super::credits::{CreditRole, CreditsFormatter};
use super::episode::{self, NumberingScheme};
use super::language::{FieldKind, LanguageResolver};
use super::record::{truncate_chars, ProgramRecord};
use super::render::{render_into, single_line, BREAK};
use super::store::ChannelRecordStore;
use super::vocabulary::Vocabulary;
use crate::config::TransformConfig;
use crate::lookup::LookupTables;
use crate::xmltv::{attribute, parse_timestamp, GuideEvent, PROGRAMME};

/// Programs that stopped longer ago than this are dropped.
pub const STALE_AFTER_SECS: i64 = 3600;

/// Counters collected during a transformation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub programs: usize,
    pub accepted: usize,
    pub rendered: usize,
    pub rejected_fragment: usize,
    pub rejected_stale: usize,
    pub rejected_unknown_channel: usize,
    pub rejected_bad_time: usize,
    /// Programs left unfinished by a new ProgramStart or the end of input.
    pub discarded: usize,
    /// Recoverable content problems, counted whether logged or not.
    pub warnings: usize,
}

impl TransformStats {
    pub fn rejected(&self) -> usize {
        self.rejected_fragment
            + self.rejected_stale
            + self.rejected_unknown_channel
            + self.rejected_bad_time
    }
}

impl fmt::Display for TransformStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} programs, {} accepted, {} rendered, {} rejected (fragment {}, stale {}, unknown channel {}, bad time {}), {} discarded, {} warnings",
            self.programs,
            self.accepted,
            self.rendered,
            self.rejected(),
            self.rejected_fragment,
            self.rejected_stale,
            self.rejected_unknown_channel,
            self.rejected_bad_time,
            self.discarded,
            self.warnings
        )
    }
}

/// Element opened inside the current program.
#[derive(Debug)]
struct OpenElement {
    name: String,
    attributes: Vec<(String, String)>,
}

impl OpenElement {
    fn attribute(&self, name: &str) -> Option<&str> {
        attribute(&self.attributes, name)
    }
}

/// Everything belonging to the program currently open.
#[derive(Debug)]
struct ProgramState {
    record: ProgramRecord,
    resolver: LanguageResolver,
    credits: CreditsFormatter,
    open: Vec<OpenElement>,
    text: String,
    /// Episode fields were set from a recognised numbering scheme.
    episode_from_scheme: bool,
    /// Episode fields were set at all.
    episode_seen: bool,
}

impl ProgramState {
    fn new(record: ProgramRecord, config: &TransformConfig, vocab: &'static Vocabulary) -> Self {
        Self {
            record,
            resolver: LanguageResolver::new(config.language.as_str()),
            credits: CreditsFormatter::new(config.max_credits, vocab),
            open: Vec::new(),
            text: String::new(),
            episode_from_scheme: false,
            episode_seen: false,
        }
    }
}

#[derive(Debug)]
enum State {
    Idle,
    InProgram(Box<ProgramState>),
}

/// Count a recoverable content problem, logging it if enabled.
fn content_warning(stats: &mut TransformStats, enabled: bool, args: fmt::Arguments<'_>) {
    stats.warnings += 1;
    if enabled {
        warn!("{}", args);
    }
}

/// Stateful guide event consumer.
pub struct Accumulator<'a> {
    tables: &'a LookupTables,
    config: &'a TransformConfig,
    vocab: &'static Vocabulary,
    /// Reference time for staleness, epoch seconds.
    now: i64,
    state: State,
    store: ChannelRecordStore,
    stats: TransformStats,
}

impl<'a> Accumulator<'a> {
    pub fn new(tables: &'a LookupTables, config: &'a TransformConfig, now: i64) -> Self {
        Self {
            tables,
            config,
            vocab: Vocabulary::for_language(&config.language),
            now,
            state: State::Idle,
            store: ChannelRecordStore::for_channels(&tables.channels),
            stats: TransformStats::default(),
        }
    }

    pub fn in_program(&self) -> bool {
        matches!(self.state, State::InProgram(_))
    }

    pub fn stats(&self) -> &TransformStats {
        &self.stats
    }

    pub fn store(&self) -> &ChannelRecordStore {
        &self.store
    }

    /// Consume one event.
    pub fn feed(&mut self, event: GuideEvent) {
        match event {
            GuideEvent::ProgramStart {
                channel,
                start,
                stop,
                fragment,
            } => self.program_start(channel, &start, stop.as_deref(), fragment.as_deref()),
            GuideEvent::ElementStart { name, attributes } => {
                if let State::InProgram(program) = &mut self.state {
                    program.text.clear();
                    program.open.push(OpenElement { name, attributes });
                }
            }
            GuideEvent::Text(text) => {
                if let State::InProgram(program) = &mut self.state {
                    program.text.push_str(&text);
                }
            }
            GuideEvent::ElementEnd { name } => self.element_end(&name),
        }
    }

    /// End of input. A program still open is discarded.
    pub fn finish(mut self) -> (ChannelRecordStore, TransformStats) {
        if let State::InProgram(program) = std::mem::replace(&mut self.state, State::Idle) {
            self.stats.discarded += 1;
            content_warning(
                &mut self.stats,
                self.config.warnings,
                format_args!(
                    "Input ended inside a program on {}, discarded",
                    program.record.channel
                ),
            );
        }
        (self.store, self.stats)
    }

    fn program_start(
        &mut self,
        channel: String,
        start: &str,
        stop: Option<&str>,
        fragment: Option<&str>,
    ) {
        self.stats.programs += 1;
        let warnings = self.config.warnings;

        if let State::InProgram(program) = std::mem::replace(&mut self.state, State::Idle) {
            self.stats.discarded += 1;
            content_warning(
                &mut self.stats,
                warnings,
                format_args!(
                    "Program on {} at {} not closed before the next one, discarded",
                    program.record.channel, program.record.start
                ),
            );
        }

        if let Some(fragment) = fragment {
            self.stats.rejected_fragment += 1;
            content_warning(
                &mut self.stats,
                warnings,
                format_args!(
                    "Split program on {} at {} (clumpidx {}) is not supported, skipped",
                    channel, start, fragment
                ),
            );
            return;
        }

        if !self.tables.channels.contains(&channel) {
            self.stats.rejected_unknown_channel += 1;
            debug!("No channel entry for {}, program skipped", channel);
            return;
        }

        let offset = self.config.offset_secs();
        let times = parse_timestamp(start).zip(stop.and_then(parse_timestamp));
        let Some((start_epoch, stop_epoch)) = times else {
            self.stats.rejected_bad_time += 1;
            content_warning(
                &mut self.stats,
                warnings,
                format_args!(
                    "Invalid or missing time on {} (start {:?}, stop {:?}), program skipped",
                    channel, start, stop
                ),
            );
            return;
        };
        let (start_epoch, stop_epoch) = (
            start_epoch.saturating_add(offset),
            stop_epoch.saturating_add(offset),
        );

        if stop_epoch < self.now - STALE_AFTER_SECS {
            self.stats.rejected_stale += 1;
            content_warning(
                &mut self.stats,
                warnings,
                format_args!("Program on {} at {} already ended, skipped", channel, start),
            );
            return;
        }

        self.stats.accepted += 1;
        let record = ProgramRecord::new(channel, start_epoch, stop_epoch);
        self.state = State::InProgram(Box::new(ProgramState::new(record, self.config, self.vocab)));
    }

    fn element_end(&mut self, name: &str) {
        if name == PROGRAMME {
            self.complete();
            return;
        }

        let State::InProgram(program) = &mut self.state else {
            return;
        };
        let Some(element) = program.open.pop() else {
            return;
        };
        let text = std::mem::take(&mut program.text);
        let parent = program.open.last().map(|e| e.name.clone());

        let fields = FieldContext {
            tables: self.tables,
            config: self.config,
            vocab: self.vocab,
        };
        fields.apply(program, &element, parent.as_deref(), text, &mut self.stats);
    }

    fn complete(&mut self) {
        let State::InProgram(mut program) = std::mem::replace(&mut self.state, State::Idle) else {
            return;
        };

        program.record.credits = program.credits.text().to_string();
        program.record.credits_count = program.credits.count();

        let mut text = String::new();
        render_into(&program.record, self.config.priority, &mut text);
        self.store.append(&program.record.channel, &text);
        self.stats.rendered += 1;
        debug!(
            "Rendered program {} on {}: {}",
            program.record.id, program.record.channel, program.record.title
        );
    }
}

/// Read-only context for routing a closed element into the record.
struct FieldContext<'a> {
    tables: &'a LookupTables,
    config: &'a TransformConfig,
    vocab: &'static Vocabulary,
}

impl FieldContext<'_> {
    fn apply(
        &self,
        program: &mut ProgramState,
        element: &OpenElement,
        parent: Option<&str>,
        text: String,
        stats: &mut TransformStats,
    ) {
        let warnings = self.config.warnings;
        let record = &mut program.record;

        let kind = FieldKind::from_element(&element.name);
        let separator = match kind {
            Some(FieldKind::Description) => BREAK,
            _ => " ",
        };
        let text = single_line(text, separator);

        if let Some(field) = kind {
            if !program.resolver.resolve(field, element.attribute("lang")) {
                return;
            }
            match field {
                FieldKind::Title => record.title = text,
                FieldKind::SubTitle => record.short_text = text,
                FieldKind::Description => {
                    record.description =
                        truncate_chars(&text, self.config.max_description).to_string()
                }
                FieldKind::Category => match self.tables.genres.get(&text) {
                    Some(code) => record.genre_code = Some(code.to_string()),
                    None => content_warning(
                        stats,
                        warnings,
                        format_args!("Unknown category '{}' on {}", text, record.channel),
                    ),
                },
            }
            return;
        }

        if let Some(role) = CreditRole::from_element(&element.name) {
            let qualifier = match role {
                CreditRole::Actor => element
                    .attribute("role")
                    .map(|role| single_line(role.to_string(), " ")),
                _ => None,
            };
            program.credits.add(role, &text, qualifier.as_deref());
            return;
        }

        match (element.name.as_str(), parent) {
            ("date", _) => {
                if !text.is_empty() {
                    record.air_date = format!("({})", text);
                }
            }
            ("episode-num", _) => {
                let scheme = if self.config.extras {
                    element
                        .attribute("system")
                        .and_then(NumberingScheme::from_attribute)
                } else {
                    None
                };
                // First recognised scheme wins; otherwise the first raw text.
                let take = match scheme {
                    Some(_) => !program.episode_from_scheme,
                    None => !program.episode_seen,
                };
                if take && !text.is_empty() {
                    let number = episode::encode(&text, scheme, self.vocab);
                    record.episode_label = number.label;
                    record.episode_short_code = number.short_code;
                    program.episode_from_scheme = scheme.is_some();
                    program.episode_seen = true;
                }
            }
            ("value", Some("rating")) => match self.tables.ratings.get(&text) {
                Some(code) => record.rating_text.push_str(code),
                None => content_warning(
                    stats,
                    warnings,
                    format_args!("Unknown rating '{}' on {}", text, record.channel),
                ),
            },
            ("value", Some("star-rating")) if self.config.extras => {
                if !text.is_empty() {
                    record.star_rating = format!("{} {}", self.vocab.rating, text);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{ChannelTable, CodeTable};
    use crate::xmltv::XmltvEvents;
    use std::path::Path;

    // 2023-11-14 22:13:20 UTC
    const NOW: i64 = 1_700_000_000;

    fn tables() -> LookupTables {
        let channels = "\
Das Erste;ARD:11837:hC34:S19.2E:27500:101:102:104:0:28106:1:1101:0:ard.de
ZDF:11954:hC34:S19.2E:27500:110:120:130:0:28006:1:1079:0:zdf.de
";
        LookupTables {
            channels: ChannelTable::parse(channels, Path::new("channels.conf")).unwrap(),
            genres: CodeTable::parse("Krimi : 12\nCrime : 12\n", Path::new("genres.conf"))
                .unwrap(),
            ratings: CodeTable::parse("FSK 12 : 12\n", Path::new("ratings.conf")).unwrap(),
        }
    }

    fn run(xml: &str, config: &TransformConfig) -> (ChannelRecordStore, TransformStats) {
        let tables = tables();
        let mut acc = Accumulator::new(&tables, config, NOW);
        for event in XmltvEvents::new(xml.as_bytes()) {
            acc.feed(event.unwrap());
        }
        acc.finish()
    }

    fn programme(channel: &str, start: &str, stop: &str, body: &str) -> String {
        format!(
            r#"<programme start="{}" stop="{}" channel="{}">{}</programme>"#,
            start, stop, channel, body
        )
    }

    fn tv(programmes: &[String]) -> String {
        format!("<tv>{}</tv>", programmes.concat())
    }

    #[test]
    fn test_renders_program_into_channel() {
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            r#"<title lang="en">Crime Scene</title><title lang="de">Tatort</title>
               <sub-title>Der Fall</sub-title><desc lang="de">Ein Mord.</desc>
               <date>2019</date><category lang="de">Krimi</category>"#,
        )]);
        let (store, stats) = run(&xml, &TransformConfig::default());

        let start = 1_700_002_800;
        let expected = format!(
            "E {} {} 2700 0\r\nT Crime Scene\r\nS Der Fall\r\nD |(2019)Ein Mord.|\r\nG 12\r\ne\r\n",
            (start / 60) % 65536,
            start
        );
        assert_eq!(store.get("ard.de"), Some(expected.as_str()));
        assert_eq!(store.get("zdf.de"), Some(""));
        assert_eq!(stats.rendered, 1);
        assert_eq!(stats.warnings, 0);
    }

    #[test]
    fn test_preferred_language_wins() {
        let config = TransformConfig {
            language: "de".into(),
            ..Default::default()
        };
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            r#"<title lang="en">Crime Scene</title><title lang="de">Tatort</title><title lang="fr">Scène</title>"#,
        )]);
        let (store, _) = run(&xml, &config);
        assert!(store.get("ard.de").unwrap().contains("\r\nT Tatort\r\n"));
    }

    #[test]
    fn test_stale_program_is_dropped() {
        let xml = tv(&[
            // stopped 90 minutes before NOW
            programme(
                "ard.de",
                "20231114190000 +0000",
                "20231114204320 +0000",
                "<title>Old</title>",
            ),
            // stopped 30 minutes before NOW, still kept
            programme(
                "ard.de",
                "20231114200000 +0000",
                "20231114214320 +0000",
                "<title>Recent</title>",
            ),
        ]);
        let (store, stats) = run(&xml, &TransformConfig::default());
        let text = store.get("ard.de").unwrap();
        assert!(!text.contains("Old"));
        assert!(text.contains("T Recent"));
        assert_eq!(stats.rejected_stale, 1);
        assert_eq!(stats.rendered, 1);
    }

    #[test]
    fn test_time_offset_applies_before_staleness() {
        let config = TransformConfig {
            time_offset: 120,
            ..Default::default()
        };
        let xml = tv(&[programme(
            "zdf.de",
            "20231114190000 +0000",
            "20231114204320 +0000",
            "<title>Shifted</title>",
        )]);
        let (store, stats) = run(&xml, &config);
        assert_eq!(stats.rendered, 1);
        let start = 1_699_988_400 + 7200;
        assert!(store
            .get("zdf.de")
            .unwrap()
            .starts_with(&format!("E {} {} 6200 0\r\n", (start / 60) % 65536, start)));
    }

    #[test]
    fn test_extreme_time_offset_saturates() {
        let config = TransformConfig {
            time_offset: i64::MIN,
            ..Default::default()
        };
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            "<title>Fern</title>",
        )]);
        let (_, stats) = run(&xml, &config);
        assert_eq!(stats.rejected_stale, 1);
    }

    #[test]
    fn test_fragment_is_dropped_with_children() {
        let xml = format!(
            "<tv>{}{}</tv>",
            r#"<programme start="20231114230000 +0000" stop="20231114234500 +0000" channel="ard.de" clumpidx="0/2"><title>Part A</title><credits><actor>X</actor></credits></programme>"#,
            programme(
                "ard.de",
                "20231114234500 +0000",
                "20231115000000 +0000",
                "<title>Next</title>"
            )
        );
        let (store, stats) = run(&xml, &TransformConfig::default());
        let text = store.get("ard.de").unwrap();
        assert!(!text.contains("Part A"));
        assert!(!text.contains("Actor"));
        assert!(text.contains("T Next"));
        assert_eq!(stats.rejected_fragment, 1);
        assert_eq!(stats.rendered, 1);
    }

    #[test]
    fn test_unknown_channel_and_bad_time() {
        let xml = tv(&[
            programme(
                "nowhere.tv",
                "20231114230000 +0000",
                "20231114234500 +0000",
                "<title>X</title>",
            ),
            r#"<programme start="20231114230000 +0000" channel="ard.de"><title>No stop</title></programme>"#.to_string(),
            programme("ard.de", "garbage", "20231114234500 +0000", "<title>Y</title>"),
        ]);
        let (store, stats) = run(&xml, &TransformConfig::default());
        assert_eq!(store.filled(), 0);
        assert_eq!(stats.rejected_unknown_channel, 1);
        assert_eq!(stats.rejected_bad_time, 2);
        assert_eq!(stats.rejected(), 3);
        assert_eq!(stats.warnings, 2);
    }

    #[test]
    fn test_unknown_category_warns_once() {
        let config = TransformConfig {
            warnings: true,
            ..Default::default()
        };
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            "<title>T</title><category>Unheard Of</category>",
        )]);
        let (store, stats) = run(&xml, &config);
        assert!(store.get("ard.de").unwrap().contains("\r\nG FF\r\n"));
        assert_eq!(stats.warnings, 1);
    }

    #[test]
    fn test_ratings_accumulate() {
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            r#"<rating system="FSK"><value>FSK 12</value></rating>
               <rating system="MPAA"><value>PG-13</value></rating>
               <rating system="FSK"><value>FSK 12</value></rating>"#,
        )]);
        let (store, stats) = run(&xml, &TransformConfig::default());
        assert!(store.get("ard.de").unwrap().contains("\r\nR 1212\r\n"));
        assert_eq!(stats.warnings, 1);
    }

    #[test]
    fn test_credits_with_cap() {
        let config = TransformConfig {
            max_credits: 2,
            ..Default::default()
        };
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            r#"<credits><director>Jane Doe</director><actor role="Inspector">John Roe</actor><actor>Max Muster</actor></credits>"#,
        )]);
        let (store, _) = run(&xml, &config);
        assert!(store
            .get("ard.de")
            .unwrap()
            .contains("\r\nD Director : Jane Doe.|Actor : John Roe \"Inspector\"\r\n"));
    }

    #[test]
    fn test_episode_short_code_replaces_short_text() {
        let config = TransformConfig {
            extras: true,
            ..Default::default()
        };
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            r#"<title>Show</title><desc>Plot.</desc>
               <episode-num system="dd_progid">EP0123</episode-num>
               <episode-num system="xmltv_ns">1.2.0/3</episode-num>
               <episode-num system="onscreen">S02E03</episode-num>
               <star-rating><value>3/5</value></star-rating>"#,
        )]);
        let (store, _) = run(&xml, &config);
        let text = store.get("ard.de").unwrap();
        assert!(text.contains("\r\nS s02e03\r\n"));
        assert!(text.contains("\r\nD Plot.|Rating : 3/5\r\n"));
        assert!(!text.contains("Season"));
    }

    #[test]
    fn test_episode_label_kept_with_native_short_text() {
        let config = TransformConfig {
            extras: true,
            ..Default::default()
        };
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            r#"<sub-title>Pilot</sub-title><episode-num system="xmltv_ns">0.0.</episode-num>"#,
        )]);
        let (store, _) = run(&xml, &config);
        let text = store.get("ard.de").unwrap();
        assert!(text.contains("\r\nS Pilot\r\n"));
        assert!(text.contains("\r\nD Season 1 - Episode 1 |\r\n"));
    }

    #[test]
    fn test_without_extras_episode_passes_through() {
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            r#"<episode-num system="xmltv_ns">1.2.0/3</episode-num><star-rating><value>3/5</value></star-rating>"#,
        )]);
        let (store, _) = run(&xml, &TransformConfig::default());
        let text = store.get("ard.de").unwrap();
        assert!(text.contains("\r\nD 1.2.0/3|\r\n"));
        assert!(!text.contains("Rating"));
        assert!(!text.contains("\r\nS "));
    }

    #[test]
    fn test_description_truncated() {
        let config = TransformConfig {
            max_description: 5,
            ..Default::default()
        };
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            "<desc>Ein langer Text</desc>",
        )]);
        let (store, _) = run(&xml, &config);
        assert!(store.get("ard.de").unwrap().contains("\r\nD Ein l|\r\n"));
    }

    #[test]
    fn test_line_breaks_folded_into_record_lines() {
        let config = TransformConfig {
            extras: true,
            ..Default::default()
        };
        let xml = tv(&[programme(
            "ard.de",
            "20231114230000 +0000",
            "20231114234500 +0000",
            "<title>Der\nAlte</title><desc>Teil eins\n.\nLSTE 1</desc>\
             <credits><actor role=\"Kommissar\nA\">Rolf\r\nSchimpf</actor></credits>\
             <star-rating><value>3/5\n</value></star-rating>",
        )]);
        let (store, _) = run(&xml, &config);
        let text = store.get("ard.de").unwrap();
        let lines: Vec<_> = text.split("\r\n").collect();

        assert!(!text.replace("\r\n", "").contains(['\r', '\n']));
        assert!(!lines.contains(&"."));
        assert_eq!(lines[1], "T Der Alte");
        assert_eq!(lines.iter().filter(|l| l.starts_with("D ")).count(), 1);
        assert_eq!(
            lines[2],
            "D Teil eins|.|LSTE 1|Actor : Rolf Schimpf \"Kommissar A\".|Rating : 3/5"
        );
    }

    #[test]
    fn test_unfinished_programs_are_discarded() {
        let tables = tables();
        let config = TransformConfig::default();
        let mut acc = Accumulator::new(&tables, &config, NOW);

        let start = |title: &str| {
            vec![
                GuideEvent::ProgramStart {
                    channel: "ard.de".into(),
                    start: "20231114230000 +0000".into(),
                    stop: Some("20231114234500 +0000".into()),
                    fragment: None,
                },
                GuideEvent::ElementStart {
                    name: "title".into(),
                    attributes: Vec::new(),
                },
                GuideEvent::Text(title.into()),
                GuideEvent::element_end("title"),
            ]
        };

        for event in start("First") {
            acc.feed(event);
        }
        assert!(acc.in_program());
        for event in start("Second") {
            acc.feed(event);
        }
        acc.feed(GuideEvent::element_end(PROGRAMME));
        assert!(!acc.in_program());
        for event in start("Third") {
            acc.feed(event);
        }

        let (store, stats) = acc.finish();
        let text = store.get("ard.de").unwrap();
        assert!(text.contains("T Second"));
        assert!(!text.contains("First"));
        assert!(!text.contains("Third"));
        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.discarded, 2);
        assert_eq!(stats.rendered, 1);
    }
}
