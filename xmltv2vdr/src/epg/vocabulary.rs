//! Localized words used in generated record text.

use super::credits::CreditRole;

/// Words inserted into episode labels, star ratings and credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub season: &'static str,
    pub episode: &'static str,
    pub part: &'static str,
    /// Prefix of the star rating, including the separator.
    pub rating: &'static str,
    director: &'static str,
    actor: &'static str,
    writer: &'static str,
    adapter: &'static str,
    producer: &'static str,
    presenter: &'static str,
    commentator: &'static str,
    guest: &'static str,
}

pub const ENGLISH: Vocabulary = Vocabulary {
    season: "Season",
    episode: "Episode",
    part: "Part",
    rating: "Rating :",
    director: "Director",
    actor: "Actor",
    writer: "Writer",
    adapter: "Adapter",
    producer: "Producer",
    presenter: "Presenter",
    commentator: "Commentator",
    guest: "Guest",
};

pub const GERMAN: Vocabulary = Vocabulary {
    season: "Staffel",
    episode: "Folge",
    part: "Teil",
    rating: "Bewertung :",
    director: "Regie",
    actor: "Darsteller",
    writer: "Drehbuch",
    adapter: "Bearbeitung",
    producer: "Produktion",
    presenter: "Moderation",
    commentator: "Kommentar",
    guest: "Gast",
};

impl Vocabulary {
    /// Pick the vocabulary for a language tag such as `de` or `de-AT`.
    /// Anything that is not German falls back to English.
    pub fn for_language(tag: &str) -> &'static Vocabulary {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("de") {
            &GERMAN
        } else {
            &ENGLISH
        }
    }

    /// Clause heading for a credit role.
    pub fn role(&self, role: CreditRole) -> &'static str {
        match role {
            CreditRole::Director => self.director,
            CreditRole::Actor => self.actor,
            CreditRole::Writer => self.writer,
            CreditRole::Adapter => self.adapter,
            CreditRole::Producer => self.producer,
            CreditRole::Presenter => self.presenter,
            CreditRole::Commentator => self.commentator,
            CreditRole::Guest => self.guest,
        }
    }
}
