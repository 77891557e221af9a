use crate::transcript::DialogueLine;

/// Count how many times `speaker` says `word`.
///
/// Both inputs are lowercased. Matching is a plain, non-overlapping substring
/// count over the lowercased text of lines whose normalized speaker equals
/// `speaker`, so "penny" also matches inside "pennywise". An empty word counts
/// as zero.
pub fn count_word_by_speaker(dialogues: &[DialogueLine], speaker: &str, word: &str) -> usize {
    let speaker = speaker.to_lowercase();
    let word = word.to_lowercase();
    if word.is_empty() {
        return 0;
    }

    dialogues
        .iter()
        .filter(|dialogue| dialogue.speaker == speaker)
        .map(|dialogue| dialogue.text.to_lowercase().matches(word.as_str()).count())
        .sum()
}
