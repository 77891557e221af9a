//! Transcript data model and line-level parsing
//!
//! A transcript is fetched and extracted once, then shared read-only by the
//! dialogue and scene records parsed out of it.

pub mod parser;
pub mod segregate;

pub use parser::{extract_dialogues, parse_lines};
pub use segregate::segregate_scenes;

use std::fmt;
use std::sync::Arc;

/// One episode transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Season number parsed from the page address
    pub season: u32,
    /// Episode number parsed from the page address
    pub episode: u32,
    /// Title slug, e.g. `pilot-episode`
    pub title: String,
    /// Page address the transcript was fetched from
    pub link: String,
    /// Raw page markup, empty if the fetch failed
    pub html: String,
    /// Plain text of the primary content container, filled by extraction
    pub text: String,
}

impl Transcript {
    /// Create a transcript with no markup or text yet
    pub fn new(season: u32, episode: u32, title: String, link: String) -> Self {
        Self {
            season,
            episode,
            title,
            link,
            html: String::new(),
            text: String::new(),
        }
    }

    /// Attach downloaded markup
    pub fn with_html(mut self, html: String) -> Self {
        self.html = html;
        self
    }

    /// Title slug with dashes turned into spaces
    pub fn display_title(&self) -> String {
        self.title.trim_end_matches('/').replace('-', " ")
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{:02}E{:02} {}",
            self.season,
            self.episode,
            self.display_title()
        )
    }
}

/// One spoken line attributed to a speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    /// Speaker label; lowercase and annotation-free once normalized
    pub speaker: String,
    /// What was said
    pub text: String,
    /// Parenthetical note split off the speaker label, e.g. `annoyed`
    pub annotation: String,
    /// Owning transcript
    pub transcript: Arc<Transcript>,
}

impl DialogueLine {
    pub fn new(speaker: String, text: String, transcript: Arc<Transcript>) -> Self {
        Self {
            speaker,
            text,
            annotation: String::new(),
            transcript,
        }
    }
}

/// A stage direction (`scene: ...` line)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneMarker {
    pub description: String,
    pub transcript: Arc<Transcript>,
}
