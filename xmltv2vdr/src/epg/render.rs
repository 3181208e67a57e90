//! EPG record serialization.
//!
//! ```text
//! E <id> <start> <duration> <priority>
//! T <title>
//! S <short text>
//! D <description>
//! G <genre code | FF>
//! R <rating>
//! e
//! ```
//!
//! `T`, `S`, `D` and `R` are only written when they have content. Every
//! line ends with CRLF.

use std::fmt::Write;

use xmltv2vdr_protocol::CRLF;

use super::record::ProgramRecord;

/// Genre code sent when the category is unknown.
pub const NO_GENRE: &str = "FF";

/// Separator the receiver shows as a line break inside a description.
pub const BREAK: &str = "|";

/// Append the rendered record to `out`.
pub fn render_into(record: &ProgramRecord, priority: i32, out: &mut String) {
    // write! into a String cannot fail
    let _ = write!(
        out,
        "E {} {} {} {}{}",
        record.id, record.start, record.duration, priority, CRLF
    );

    push_line(out, 'T', &record.title);

    // Without a native short text the short code takes its place, and the
    // label would only repeat it.
    let (short_text, label) = if record.short_text.is_empty() {
        let label = if record.episode_short_code.is_empty() {
            record.episode_label.as_str()
        } else {
            ""
        };
        (record.episode_short_code.as_str(), label)
    } else {
        (record.short_text.as_str(), record.episode_label.as_str())
    };
    push_line(out, 'S', short_text);
    push_line(out, 'D', &description(record, label));

    push_line(
        out,
        'G',
        record.genre_code.as_deref().unwrap_or(NO_GENRE),
    );
    push_line(out, 'R', &record.rating_text);

    out.push('e');
    out.push_str(CRLF);
}

pub fn render(record: &ProgramRecord, priority: i32) -> String {
    let mut out = String::new();
    render_into(record, priority, &mut out);
    out
}

/// Description composite: label, air date, description, credits and star
/// rating.
fn description(record: &ProgramRecord, label: &str) -> String {
    let mut d = String::new();

    if !label.is_empty() || !record.air_date.is_empty() {
        d.push_str(label);
        d.push_str(BREAK);
    }
    d.push_str(&record.air_date);

    if !record.description.is_empty() {
        d.push_str(&record.description);
        d.push_str(BREAK);
    }

    if !record.credits.is_empty() {
        d.push_str(&record.credits);
        if !record.star_rating.is_empty() {
            d.push('.');
            d.push_str(BREAK);
        }
    }
    d.push_str(&record.star_rating);

    d
}

/// Fold the lines of `text` into one, joined by `separator`.
///
/// Surrounding whitespace and blank lines are dropped. A record field must
/// never carry CR or LF: the receiver reads one field per line, and a lone
/// `.` line would end the data transfer.
pub fn single_line(text: String, separator: &str) -> String {
    if !text.contains(['\r', '\n']) {
        return text;
    }
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn push_line(out: &mut String, tag: char, value: &str) {
    if value.is_empty() {
        return;
    }
    out.push(tag);
    out.push(' ');
    out.push_str(value);
    out.push_str(CRLF);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProgramRecord {
        ProgramRecord::new("ard.de", 1_700_000_040, 1_700_001_840)
    }

    #[test]
    fn test_empty_record_has_three_lines() {
        let r = record();
        let text = render(&r, 0);
        assert_eq!(
            text,
            format!("E {} 1700000040 1800 0\r\nG FF\r\ne\r\n", r.id)
        );
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_full_record() {
        let mut r = record();
        r.title = "Tatort".into();
        r.short_text = "Der Fall".into();
        r.description = "Spannend.".into();
        r.air_date = "(2019)".into();
        r.genre_code = Some("10".into());
        r.rating_text = "12".into();
        r.episode_label = "Season 2 - Episode 3 ".into();
        r.episode_short_code = "s02e03".into();
        r.credits = "Director : Jane Doe".into();
        r.star_rating = "Rating : 3/5".into();

        let text = render(&r, 5);
        let lines: Vec<_> = text.split("\r\n").collect();
        assert_eq!(lines[0], format!("E {} 1700000040 1800 5", r.id));
        assert_eq!(lines[1], "T Tatort");
        assert_eq!(lines[2], "S Der Fall");
        assert_eq!(
            lines[3],
            "D Season 2 - Episode 3 |(2019)Spannend.|Director : Jane Doe.|Rating : 3/5"
        );
        assert_eq!(lines[4], "G 10");
        assert_eq!(lines[5], "R 12");
        assert_eq!(lines[6], "e");
        assert_eq!(lines[7], "");
    }

    #[test]
    fn test_short_code_fallback_drops_label() {
        let mut r = record();
        r.episode_label = "Season 2 - Episode 3 ".into();
        r.episode_short_code = "s02e03".into();
        r.description = "Text".into();

        let text = render(&r, 0);
        assert!(text.contains("\r\nS s02e03\r\n"));
        assert!(text.contains("\r\nD Text|\r\n"));
        assert!(!text.contains("Season"));
    }

    #[test]
    fn test_label_without_short_code_stays() {
        let mut r = record();
        r.episode_label = "Episode S02E03".into();

        let text = render(&r, 0);
        assert!(!text.contains("\r\nS "));
        assert!(text.contains("\r\nD Episode S02E03|\r\n"));
    }

    #[test]
    fn test_credits_without_star_rating() {
        let mut r = record();
        r.credits = "Actor : A, B".into();
        assert!(render(&r, 0).contains("\r\nD Actor : A, B\r\n"));
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("plain".into(), BREAK), "plain");
        assert_eq!(
            single_line("Teil eins\r\n.\n\n  LSTE 1\n".into(), BREAK),
            "Teil eins|.|LSTE 1"
        );
        assert_eq!(single_line("Der\nFall".into(), " "), "Der Fall");
    }

    #[test]
    fn test_air_date_alone() {
        let mut r = record();
        r.air_date = "(1999)".into();
        assert!(render(&r, 0).contains("\r\nD |(1999)\r\n"));
    }
}
