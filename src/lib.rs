//! Transcript Analyzer
//!
//! Scrapes a blog of sitcom episode transcripts, splits each episode into
//! speaker-labelled lines, normalizes speaker names and counts how often one
//! speaker says a given word.

pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scraping;
pub mod speakers;
pub mod transcript;

// Re-export main types for easy access
pub use crate::analysis::{count_word_by_speaker, SpeakerCounts};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Result, TranscriptError};
pub use crate::pipeline::{PipelineReport, Stage, TranscriptPipeline};
pub use crate::scraping::{ContentExtractor, TranscriptFetcher};
pub use crate::speakers::{normalize_speakers, SpeakerAliasTable};
pub use crate::transcript::{DialogueLine, SceneMarker, Transcript};
