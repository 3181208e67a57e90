//! Per-channel record text collected during the transformation pass.

use std::collections::HashMap;

use crate::lookup::ChannelTable;

/// Guide channel id -> rendered records, in channel table order.
#[derive(Debug, Default)]
pub struct ChannelRecordStore {
    order: Vec<String>,
    blobs: HashMap<String, String>,
}

impl ChannelRecordStore {
    /// Create an empty entry for every guide channel id of the table.
    pub fn for_channels(channels: &ChannelTable) -> Self {
        let mut store = Self::default();
        for alias in channels.aliases() {
            store.order.push(alias.to_string());
            store.blobs.insert(alias.to_string(), String::new());
        }
        store
    }

    /// Append rendered text. Returns false for a channel without an entry.
    pub fn append(&mut self, channel: &str, text: &str) -> bool {
        match self.blobs.get_mut(channel) {
            Some(blob) => {
                blob.push_str(text);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, channel: &str) -> Option<&str> {
        self.blobs.get(channel).map(String::as_str)
    }

    /// `(channel, text)` pairs in channel table order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().map(move |channel| {
            let text = self.blobs.get(channel).map_or("", String::as_str);
            (channel.as_str(), text)
        })
    }

    /// Number of channels with at least one record.
    pub fn filled(&self) -> usize {
        self.blobs.values().filter(|b| !b.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn table() -> ChannelTable {
        let text = "\
A:1:p:S:0:0:0:0:0:1:1:1:0:b.tv,a.tv
C:2:p:S:0:0:0:0:0:2:1:2:0:c.tv
";
        ChannelTable::parse(text, Path::new("channels.conf")).unwrap()
    }

    #[test]
    fn test_initialized_empty_in_table_order() {
        let store = ChannelRecordStore::for_channels(&table());
        let entries: Vec<_> = store.iter().collect();
        assert_eq!(entries, vec![("b.tv", ""), ("a.tv", ""), ("c.tv", "")]);
        assert_eq!(store.filled(), 0);
    }

    #[test]
    fn test_append_only_known_channels() {
        let mut store = ChannelRecordStore::for_channels(&table());
        assert!(store.append("c.tv", "E 1\r\n"));
        assert!(store.append("c.tv", "E 2\r\n"));
        assert!(!store.append("z.tv", "E 3\r\n"));

        assert_eq!(store.get("c.tv"), Some("E 1\r\nE 2\r\n"));
        assert_eq!(store.get("z.tv"), None);
        assert_eq!(store.iter().count(), 3);
        assert_eq!(store.filled(), 1);
    }
}
