use std::collections::HashMap;

use crate::transcript::DialogueLine;

/// Number of dialogue lines per normalized speaker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerCounts {
    counts: HashMap<String, usize>,
}

impl SpeakerCounts {
    /// Tally the speakers of a dialogue sequence
    pub fn from_dialogues(dialogues: &[DialogueLine]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for dialogue in dialogues {
            *counts.entry(dialogue.speaker.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, speaker: &str) -> usize {
        self.counts.get(speaker).copied().unwrap_or(0)
    }

    /// Number of distinct speakers
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of lines counted
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The `n` most frequent speakers, most lines first, ties broken by name
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(speaker, count)| (speaker.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Transcript;
    use std::sync::Arc;

    fn dialogues(speakers: &[&str]) -> Vec<DialogueLine> {
        let transcript = Arc::new(Transcript::new(1, 1, "t".to_string(), "l".to_string()));
        speakers
            .iter()
            .map(|s| DialogueLine::new(s.to_string(), String::new(), transcript.clone()))
            .collect()
    }

    #[test]
    fn test_counts_per_speaker() {
        let counts = SpeakerCounts::from_dialogues(&dialogues(&[
            "sheldon", "penny", "sheldon", "leonard", "sheldon", "penny",
        ]));

        assert_eq!(counts.len(), 3);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.get("sheldon"), 3);
        assert_eq!(counts.get("penny"), 2);
        assert_eq!(counts.get("raj"), 0);
    }

    #[test]
    fn test_most_common_ordering() {
        let counts = SpeakerCounts::from_dialogues(&dialogues(&[
            "raj", "howard", "sheldon", "howard", "raj", "amy",
        ]));

        assert_eq!(counts.most_common(3), vec![("howard", 2), ("raj", 2), ("amy", 1)]);
        assert_eq!(counts.most_common(10).len(), 4);
        assert!(counts.most_common(0).is_empty());
    }

    #[test]
    fn test_empty() {
        let counts = SpeakerCounts::from_dialogues(&[]);
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }
}
