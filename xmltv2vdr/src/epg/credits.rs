//! Credits formatting.
//!
//! Entries are grouped into clauses by role, in encounter order:
//!
//! ```text
//! Director : Jane Doe.|Actor : John Roe "Inspector", Max Muster
//! ```

use super::vocabulary::Vocabulary;

/// Credit roles recognized inside `<credits>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditRole {
    Director,
    Actor,
    Writer,
    Adapter,
    Producer,
    Presenter,
    Commentator,
    Guest,
}

impl CreditRole {
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "director" => Some(Self::Director),
            "actor" => Some(Self::Actor),
            "writer" => Some(Self::Writer),
            "adapter" => Some(Self::Adapter),
            "producer" => Some(Self::Producer),
            "presenter" => Some(Self::Presenter),
            "commentator" => Some(Self::Commentator),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreditsFormatter {
    /// Maximum number of accepted entries, 0 for unlimited.
    cap: usize,
    vocab: &'static Vocabulary,
    text: String,
    count: usize,
    current: Option<CreditRole>,
}

impl CreditsFormatter {
    pub fn new(cap: usize, vocab: &'static Vocabulary) -> Self {
        Self {
            cap,
            vocab,
            text: String::new(),
            count: 0,
            current: None,
        }
    }

    /// Add one entry. Returns false if it was dropped because the cap is
    /// reached or the name is empty.
    pub fn add(&mut self, role: CreditRole, name: &str, qualifier: Option<&str>) -> bool {
        let name = name.trim();
        if name.is_empty() || (self.cap > 0 && self.count >= self.cap) {
            return false;
        }

        if self.current == Some(role) {
            self.text.push_str(", ");
        } else {
            if !self.text.is_empty() {
                self.text.push_str(".|");
            }
            self.text.push_str(self.vocab.role(role));
            self.text.push_str(" : ");
            self.current = Some(role);
        }
        self.text.push_str(name);

        if let Some(q) = qualifier.map(str::trim).filter(|q| !q.is_empty()) {
            self.text.push_str(" \"");
            self.text.push_str(q);
            self.text.push('"');
        }

        self.count += 1;
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of accepted entries.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epg::vocabulary::ENGLISH;

    #[test]
    fn test_clauses_by_role() {
        let mut c = CreditsFormatter::new(0, &ENGLISH);
        assert!(c.add(CreditRole::Director, "Jane Doe", None));
        assert!(c.add(CreditRole::Actor, "John Roe", Some("Inspector")));
        assert!(c.add(CreditRole::Actor, "Max Muster", None));
        assert!(c.add(CreditRole::Director, "Ann Other", None));

        assert_eq!(
            c.text(),
            "Director : Jane Doe.|Actor : John Roe \"Inspector\", Max Muster.|Director : Ann Other"
        );
        assert_eq!(c.count(), 4);
    }

    #[test]
    fn test_cap_drops_further_entries() {
        let mut c = CreditsFormatter::new(2, &ENGLISH);
        assert!(c.add(CreditRole::Actor, "A", None));
        assert!(c.add(CreditRole::Actor, "B", None));
        let before = c.text().to_string();

        assert!(!c.add(CreditRole::Actor, "C", None));
        assert!(!c.add(CreditRole::Guest, "D", None));
        assert_eq!(c.text(), before);
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let mut c = CreditsFormatter::new(0, &ENGLISH);
        assert!(!c.add(CreditRole::Writer, "  ", None));
        assert!(c.is_empty());
        assert_eq!(c.text(), "");
    }

    #[test]
    fn test_from_element() {
        assert_eq!(CreditRole::from_element("guest"), Some(CreditRole::Guest));
        assert_eq!(CreditRole::from_element("credits"), None);
    }
}
