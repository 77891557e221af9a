use tracing::debug;

use super::SpeakerAliasTable;
use crate::transcript::DialogueLine;

/// Split a speaker label into (name, annotation).
///
/// The label is lowercased and trimmed; anything from the first `(` on becomes
/// the annotation, with parentheses removed. Returns `None` for the annotation
/// when the label has no `(`.
pub fn split_annotation(label: &str) -> (String, Option<String>) {
    let label = label.to_lowercase();
    let label = label.trim();

    match label.split_once('(') {
        Some((name, note)) => {
            let note: String = note.chars().filter(|c| *c != '(' && *c != ')').collect();
            (name.trim().to_string(), Some(note.trim().to_string()))
        }
        None => (label.to_string(), None),
    }
}

/// Lowercase speaker labels and move parenthetical notes into `annotation`
pub fn clean_speaker_names(dialogues: &mut [DialogueLine]) {
    let mut annotated = 0usize;
    for dialogue in dialogues.iter_mut() {
        let (speaker, annotation) = split_annotation(&dialogue.speaker);
        dialogue.speaker = speaker;
        if let Some(annotation) = annotation {
            dialogue.annotation = annotation;
            annotated += 1;
        }
    }
    debug!("Split annotations off {} speaker labels", annotated);
}

/// Replace known variant labels with their canonical speaker
pub fn resolve_aliases(dialogues: &mut [DialogueLine], table: &SpeakerAliasTable) {
    let mut renamed = 0usize;
    for dialogue in dialogues.iter_mut() {
        if let Some(canonical) = table.canonical(&dialogue.speaker) {
            dialogue.speaker = canonical.to_string();
            renamed += 1;
        }
    }
    debug!("Renamed {} aliased speaker labels", renamed);
}

/// Run both normalization passes with the global alias table
pub fn normalize_speakers(dialogues: &mut [DialogueLine]) {
    clean_speaker_names(dialogues);
    resolve_aliases(dialogues, SpeakerAliasTable::global());
}
