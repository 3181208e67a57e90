//! XMLTV to VDR EPG conversion.
//!
//! The whole guide is transformed first, then the collected records are
//! pushed to the receiver in one session:
//!
//! ```text
//! XMLTV ─▶ XmltvEvents ─▶ Accumulator ─▶ ChannelRecordStore ─▶ session::deliver ─▶ receiver
//!                              ▲
//!                        LookupTables
//! ```

pub mod config;
pub mod epg;
pub mod lookup;
pub mod session;
pub mod xmltv;

use std::io::BufRead;

use config::TransformConfig;
use epg::{Accumulator, ChannelRecordStore, TransformStats};
use lookup::LookupTables;
use xmltv::{XmltvError, XmltvEvents};

/// Transform a complete XMLTV document into per-channel EPG records.
///
/// `now` (epoch seconds) is the reference for dropping programs that have
/// already ended.
pub fn transform<R: BufRead>(
    source: R,
    tables: &LookupTables,
    config: &TransformConfig,
    now: i64,
) -> Result<(ChannelRecordStore, TransformStats), XmltvError> {
    let mut accumulator = Accumulator::new(tables, config, now);
    for event in XmltvEvents::new(source) {
        accumulator.feed(event?);
    }
    Ok(accumulator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SessionConfig, SimulationTarget};
    use crate::lookup::{ChannelTable, CodeTable};
    use std::path::Path;

    const GUIDE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tv generator-info-name="test">
  <channel id="zdf.de"><display-name>ZDF</display-name></channel>
  <programme start="20231115200000 +0100" stop="20231115211500 +0100" channel="zdf.de">
    <title lang="de">Der Bergdoktor</title>
    <sub-title lang="de">Schicksalsschläge</sub-title>
    <desc lang="de">Martin hat Sorgen.</desc>
    <credits>
      <actor role="Dr. Martin Gruber">Hans Sigl</actor>
    </credits>
    <date>2023</date>
    <category lang="de">Serie</category>
    <rating system="FSK"><value>ab 12</value></rating>
  </programme>
  <programme start="20231110200000 +0100" stop="20231110211500 +0100" channel="zdf.de">
    <title lang="de">Alt</title>
  </programme>
</tv>
"#;

    fn tables() -> LookupTables {
        LookupTables {
            channels: ChannelTable::parse(
                "ZDF;ZDFvision:11954:hC34:S19.2E:27500:110:120:130:0:28006:1:1079:0:zdf.de",
                Path::new("channels.conf"),
            )
            .unwrap(),
            genres: CodeTable::parse("Serie : 15\n", Path::new("genres.conf")).unwrap(),
            ratings: CodeTable::parse("ab 12 : 12\n", Path::new("ratings.conf")).unwrap(),
        }
    }

    #[test]
    fn test_transform_guide() {
        let tables = tables();
        let config = TransformConfig {
            language: "de".into(),
            ..Default::default()
        };
        let (store, stats) = transform(GUIDE.as_bytes(), &tables, &config, 1_700_000_000).unwrap();

        assert_eq!(stats.programs, 2);
        assert_eq!(stats.rendered, 1);
        assert_eq!(stats.rejected_stale, 1);

        // 2023-11-15 19:00:00 UTC
        let start = 1_700_074_800;
        let expected = format!(
            "E {} {} 4500 0\r\n\
             T Der Bergdoktor\r\n\
             S Schicksalsschläge\r\n\
             D |(2023)Martin hat Sorgen.|Darsteller : Hans Sigl \"Dr. Martin Gruber\"\r\n\
             G 15\r\n\
             R 12\r\n\
             e\r\n",
            (start / 60) % 65536,
            start
        );
        assert_eq!(store.get("zdf.de"), Some(expected.as_str()));
    }

    #[test]
    fn test_malformed_guide() {
        let tables = tables();
        let result = transform(
            "<tv><programme></tv>".as_bytes(),
            &tables,
            &TransformConfig::default(),
            0,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_transform_then_simulated_delivery() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pushed.txt");
        let tables = tables();
        let (store, _) =
            transform(GUIDE.as_bytes(), &tables, &TransformConfig::default(), 1_700_000_000)
                .unwrap();

        let config = SessionConfig {
            simulate: Some(SimulationTarget::File(out.clone())),
            ..Default::default()
        };
        let report = session::deliver(&config, &store, &tables.channels).await.unwrap();
        assert_eq!(report.channels, 1);

        let pushed = std::fs::read(&out).unwrap();
        let text = String::from_utf8_lossy(&pushed);
        assert!(text.starts_with("CLRE\r\nPUTE\r\nC S19.2E-1-1079-28006 ZDF\r\n"));
        // ISO-8859-1 on the wire
        assert!(pushed
            .windows(b"Schicksalsschl\xe4ge".len())
            .any(|w| w == b"Schicksalsschl\xe4ge"));
        assert!(text.ends_with("e\r\nc\r\n.\r\nQUIT\r\n"));
    }
}
