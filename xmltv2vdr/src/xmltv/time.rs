//! XMLTV timestamps: `YYYYMMDDhhmm[ss] [+-hhmm]`, UTC when no zone is given.

use chrono::{FixedOffset, NaiveDateTime, TimeZone};

/// Parse an XMLTV timestamp into epoch seconds.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    let digits = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (stamp, zone) = value.split_at(digits);

    let format = match stamp.len() {
        14 => "%Y%m%d%H%M%S",
        12 => "%Y%m%d%H%M",
        _ => return None,
    };
    let naive = NaiveDateTime::parse_from_str(stamp, format).ok()?;

    let zone = zone.trim();
    if zone.is_empty() {
        return Some(naive.and_utc().timestamp());
    }
    let offset = parse_offset(zone)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp())
}

/// Parse `+hhmm` / `-hhmm`.
fn parse_offset(zone: &str) -> Option<FixedOffset> {
    let (sign, rest) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    if rest.len() != 4 || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = rest[..2].parse().ok()?;
    let minutes: i32 = rest[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_zone() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(parse_timestamp("20231114221320 +0000"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("20231114231320 +0100"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("20231114181320 -0400"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("20231114231320+0100"), Some(1_700_000_000));
    }

    #[test]
    fn test_without_seconds_or_zone() {
        assert_eq!(parse_timestamp("20231114221320"), Some(1_700_000_000));
        assert_eq!(parse_timestamp("202311142213"), Some(1_699_999_980));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2023111422"), None);
        assert_eq!(parse_timestamp("20231332221320 +0000"), None);
        assert_eq!(parse_timestamp("20231114221320 CET"), None);
        assert_eq!(parse_timestamp("20231114221320 +01"), None);
    }
}
