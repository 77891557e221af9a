use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Known misspelled or duplicate speaker labels (variant -> canonical)
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    // Both barry and kripke show up; keep kripke
    ("barry", "kripke"),
    ("past sheldon", "sheldon"),
    ("past leonard", "leonard"),
    ("mary", "mrs cooper"),
    ("howard's mother", "mrs wolowitz"),
    ("lesley", "leslie"),
    ("beverly", "beverley"),
    ("wil wheaton", "wil"),
    ("penny's dad", "wyatt"),
    ("stephen hawking", "hawking"),
];

static ALIASES: Lazy<SpeakerAliasTable> = Lazy::new(SpeakerAliasTable::new);

/// Static mapping from variant speaker labels to their canonical label
#[derive(Debug, Clone)]
pub struct SpeakerAliasTable {
    aliases: HashMap<&'static str, &'static str>,
}

impl SpeakerAliasTable {
    fn new() -> Self {
        Self {
            aliases: DEFAULT_ALIASES.iter().copied().collect(),
        }
    }

    /// The process-wide table
    pub fn global() -> &'static Self {
        &ALIASES
    }

    /// Canonical label for `speaker`, if it is a known variant.
    ///
    /// Expects an already lowercased, trimmed label. Typographic apostrophes
    /// match their ASCII form.
    pub fn canonical(&self, speaker: &str) -> Option<&'static str> {
        if speaker.contains('\u{2019}') {
            self.aliases.get(speaker.replace('\u{2019}', "'").as_str()).copied()
        } else {
            self.aliases.get(speaker).copied()
        }
    }

    /// Resolve `speaker` to its canonical label, or return it unchanged
    pub fn resolve<'a>(&self, speaker: &'a str) -> &'a str {
        self.canonical(speaker).unwrap_or(speaker)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// All (variant, canonical) pairs
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.aliases.iter().map(|(k, v)| (*k, *v))
    }
}
