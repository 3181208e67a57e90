//! Text to code tables (genres and ratings).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{content_lines, read_file, LookupError, Result};

/// Maps a localized text (category name, rating value) to a receiver code.
#[derive(Debug, Default, Clone)]
pub struct CodeTable {
    codes: HashMap<String, String>,
}

impl CodeTable {
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_file(path)?;
        Self::parse(&text, path)
    }

    /// Parse `text : code` lines. The key may itself contain `:`, so the
    /// line is split on the last one.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut codes = HashMap::new();

        for (line_no, line) in content_lines(text) {
            let malformed = || LookupError::MalformedEntry {
                path: PathBuf::from(path),
                line: line_no,
            };
            let (key, code) = line.rsplit_once(':').ok_or_else(malformed)?;
            let (key, code) = (key.trim(), code.trim());
            if key.is_empty() || code.is_empty() {
                return Err(malformed());
            }
            codes.insert(key.to_string(), code.to_string());
        }

        Ok(Self { codes })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.codes.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_last_colon() {
        let text = "Movie - Drama : 10\nSci-Fi: Series : 15\n# ignored : 99\n";
        let table = CodeTable::parse(text, Path::new("genres.conf")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Movie - Drama"), Some("10"));
        assert_eq!(table.get("Sci-Fi: Series"), Some("15"));
        assert_eq!(table.get("ignored"), None);
    }

    #[test]
    fn test_malformed_entry() {
        let err = CodeTable::parse("FSK 12 : 12\nFSK 16\n", Path::new("ratings.conf"))
            .unwrap_err();
        assert!(matches!(err, LookupError::MalformedEntry { line: 2, .. }));

        assert!(CodeTable::parse(" : 12", Path::new("ratings.conf")).is_err());
        assert!(CodeTable::parse("FSK 18 :", Path::new("ratings.conf")).is_err());
    }
}
