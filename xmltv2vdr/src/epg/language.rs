//! Preferred-language selection across repeated localized elements.
//!
//! A guide may carry the same field several times in different languages:
//!
//! ```xml
//! <title lang="de">Tatort</title>
//! <title lang="en">Crime Scene</title>
//! ```
//!
//! The first candidate of a field is always taken. After that only a
//! candidate tagged with the preferred language replaces it, and a later
//! preferred candidate replaces an earlier preferred one.

/// Localized fields tracked by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Title,
    SubTitle,
    Description,
    Category,
}

impl FieldKind {
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "sub-title" => Some(Self::SubTitle),
            "desc" => Some(Self::Description),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LanguageResolver {
    preferred: String,
    field: Option<FieldKind>,
    /// Tag of the candidate currently held for `field`. `Some(None)` is an
    /// untagged candidate.
    held: Option<Option<String>>,
}

impl LanguageResolver {
    pub fn new(preferred: impl Into<String>) -> Self {
        Self {
            preferred: preferred.into(),
            field: None,
            held: None,
        }
    }

    /// Decide whether a candidate for `field` tagged `lang` replaces the
    /// value held so far. Switching to another field starts over.
    pub fn resolve(&mut self, field: FieldKind, lang: Option<&str>) -> bool {
        if self.field != Some(field) {
            self.field = Some(field);
            self.held = None;
        }

        let accept = self.held.is_none() || self.is_preferred(lang);
        if accept {
            self.held = Some(lang.map(String::from));
        }
        accept
    }

    /// Tag of the candidate currently held, if any was tagged.
    pub fn held_language(&self) -> Option<&str> {
        self.held.as_ref().and_then(|tag| tag.as_deref())
    }

    fn is_preferred(&self, lang: Option<&str>) -> bool {
        lang.is_some_and(|tag| tag.trim().eq_ignore_ascii_case(&self.preferred))
    }
}
