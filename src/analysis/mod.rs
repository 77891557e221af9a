//! Aggregate queries over normalized dialogue

pub mod query;
pub mod speakers;

pub use query::count_word_by_speaker;
pub use speakers::SpeakerCounts;
