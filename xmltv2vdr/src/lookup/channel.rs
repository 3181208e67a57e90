//! Channel table: receiver channel descriptors mapped to guide channel ids.
//!
//! Row format (receiver `channels.conf` fields, then the guide aliases):
//!
//! ```text
//! Name[,Short][;Provider]:Freq:Params:Source:Srate:VPID:APID:TPID:CAID:SID:NID:TID:RID:alias[,alias...]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use xmltv2vdr_protocol::ChannelSelector;

use super::{content_lines, read_file, LookupError, Result};

/// Descriptor fields before the alias field.
const DESCRIPTOR_FIELDS: usize = 13;

const FIELD_NAME: usize = 0;
const FIELD_FREQUENCY: usize = 1;
const FIELD_SOURCE: usize = 3;
const FIELD_SID: usize = 9;
const FIELD_NID: usize = 10;
const FIELD_TID: usize = 11;
const FIELD_RID: usize = 12;

/// One receiver channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    /// Display name (Name field up to `,` or `;`).
    pub name: String,
    /// Receiver-side address of the channel.
    pub selector: ChannelSelector,
}

/// Guide channel id -> receiver channel.
#[derive(Debug, Default)]
pub struct ChannelTable {
    entries: Vec<ChannelEntry>,
    /// Aliases in file order.
    aliases: Vec<String>,
    index: HashMap<String, usize>,
}

impl ChannelTable {
    /// Load a channel table from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_file(path)?;
        Self::parse(&text, path)
    }

    /// Parse channel table text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut table = Self::default();

        for (line_no, line) in content_lines(text) {
            let (entry, aliases) =
                parse_channel_line(line).map_err(|reason| LookupError::MalformedChannel {
                    path: PathBuf::from(path),
                    line: line_no,
                    reason,
                })?;

            debug!("Channel {} ({}) <- {:?}", entry.name, entry.selector, aliases);
            let idx = table.entries.len();
            table.entries.push(entry);
            for alias in aliases {
                table.insert_alias(alias, idx);
            }
        }

        Ok(table)
    }

    fn insert_alias(&mut self, alias: String, idx: usize) {
        match self.index.insert(alias.clone(), idx) {
            Some(previous) => warn!(
                "Guide channel '{}' listed for both '{}' and '{}', using the latter",
                alias, self.entries[previous].name, self.entries[idx].name
            ),
            None => self.aliases.push(alias),
        }
    }

    /// Look up the receiver channel for a guide channel id.
    pub fn get(&self, alias: &str) -> Option<&ChannelEntry> {
        self.index.get(alias).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.index.contains_key(alias)
    }

    /// Guide channel ids in file order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }

    /// Number of receiver channels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

/// Parse one channel row into its entry and guide aliases.
fn parse_channel_line(line: &str) -> std::result::Result<(ChannelEntry, Vec<String>), String> {
    let fields: Vec<&str> = line.split(':').map(str::trim).collect();
    let (alias_field, descriptor) = fields
        .split_last()
        .ok_or_else(|| "empty line".to_string())?;

    if descriptor.len() < DESCRIPTOR_FIELDS {
        return Err(format!(
            "expected {} descriptor fields plus aliases, got {} fields",
            DESCRIPTOR_FIELDS,
            fields.len()
        ));
    }

    let aliases: Vec<String> = alias_field
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect();
    if aliases.is_empty() {
        return Err("no guide channel alias".to_string());
    }

    let name = descriptor[FIELD_NAME]
        .split([',', ';'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    if name.is_empty() {
        return Err("empty channel name".to_string());
    }

    let source = descriptor[FIELD_SOURCE];
    if source.is_empty() {
        return Err("empty source".to_string());
    }

    let frequency = parse_number(descriptor, FIELD_FREQUENCY, "frequency")?;
    let sid = parse_number(descriptor, FIELD_SID, "SID")?;
    let nid = parse_number(descriptor, FIELD_NID, "NID")?;
    let tid = parse_number(descriptor, FIELD_TID, "TID")?;
    let rid = parse_number(descriptor, FIELD_RID, "RID")?;

    let selector = ChannelSelector::from_descriptor(source, frequency, sid, nid, tid, rid);
    Ok((ChannelEntry { name, selector }, aliases))
}

fn parse_number(fields: &[&str], idx: usize, what: &str) -> std::result::Result<u32, String> {
    let raw = fields[idx];
    raw.parse()
        .map_err(|_| format!("{} is not a number: {:?}", what, raw))
}
