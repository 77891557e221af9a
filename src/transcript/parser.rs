use std::sync::Arc;
use tracing::debug;

use super::{DialogueLine, Transcript};

/// Split a transcript's extracted text into speaker-labelled lines.
///
/// Blank lines and lines without a colon are dropped; the label is everything
/// before the first colon.
pub fn parse_lines(transcript: &Arc<Transcript>) -> Vec<DialogueLine> {
    let mut dialogues = Vec::new();
    let mut skipped = 0usize;

    for line in transcript.text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((speaker, text)) => dialogues.push(DialogueLine::new(
                speaker.to_string(),
                text.trim().to_string(),
                Arc::clone(transcript),
            )),
            None => skipped += 1,
        }
    }

    debug!(
        "Parsed {} lines from {} ({} without a speaker)",
        dialogues.len(),
        transcript,
        skipped
    );
    dialogues
}

/// Parse every transcript, keeping transcript order then line order
pub fn extract_dialogues(transcripts: &[Arc<Transcript>]) -> Vec<DialogueLine> {
    transcripts.iter().flat_map(parse_lines).collect()
}
