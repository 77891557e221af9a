//! Speaker identity normalization
//!
//! Transcripts are typed by different contributors, so the same character shows
//! up under several spellings and with stage notes inside the speaker label.

pub mod aliases;
pub mod normalizer;

pub use aliases::SpeakerAliasTable;
pub use normalizer::{clean_speaker_names, normalize_speakers, resolve_aliases, split_annotation};
