//! Guide event transformation into EPG records.
//!
//! The [`Accumulator`] is the entry point: it resolves localized fields,
//! encodes episode numbers, formats credits and looks up genre and rating
//! codes, then renders each finished program into its channel's entry of the
//! [`ChannelRecordStore`].

mod accumulator;
mod credits;
mod episode;
mod language;
mod record;
mod render;
mod store;
mod vocabulary;

pub use accumulator::{Accumulator, TransformStats, STALE_AFTER_SECS};
pub use credits::{CreditRole, CreditsFormatter};
pub use episode::{encode as encode_episode, EpisodeNumber, NumberingScheme};
pub use language::{FieldKind, LanguageResolver};
pub use record::{program_id, ProgramRecord};
pub use render::{render, render_into, single_line, BREAK, NO_GENRE};
pub use store::ChannelRecordStore;
pub use vocabulary::{Vocabulary, ENGLISH, GERMAN};
