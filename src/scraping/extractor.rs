use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::{Result, TranscriptError};
use crate::transcript::Transcript;

/// Pulls the human-readable body out of a transcript page
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    selector: Selector,
    selector_str: String,
}

/// Outcome of extracting a batch of transcripts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub extracted: usize,
    pub failed: usize,
}

impl ContentExtractor {
    /// Create an extractor for the given CSS selector, e.g. `#content`
    pub fn new(selector: &str) -> Result<Self> {
        let parsed = Selector::parse(selector)
            .map_err(|e| TranscriptError::Config(format!("invalid content selector `{selector}`: {e}")))?;

        Ok(Self {
            selector: parsed,
            selector_str: selector.to_string(),
        })
    }

    /// Text content of the first element matching the selector, markup removed
    pub fn extract(&self, html: &str) -> Result<String> {
        let document = Html::parse_document(html);
        let container = document
            .select(&self.selector)
            .next()
            .ok_or_else(|| TranscriptError::Extraction {
                selector: self.selector_str.clone(),
            })?;

        Ok(container.text().collect())
    }

    /// Fill in `text` for every transcript.
    ///
    /// Pages without a content container keep empty text; the rest of the
    /// batch is unaffected.
    pub fn extract_all(&self, transcripts: &mut [Transcript]) -> ExtractionSummary {
        let mut summary = ExtractionSummary::default();

        for transcript in transcripts.iter_mut() {
            debug!("Extracting text from HTML for {}", transcript.link);
            match self.extract(&transcript.html) {
                Ok(text) => {
                    transcript.text = text;
                    summary.extracted += 1;
                }
                Err(e) => {
                    warn!("⚠️ {} ({}): {}", transcript, transcript.link, e);
                    transcript.text.clear();
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Pilot</title></head><body>
<div id="header">Big Bang Theory Transcripts</div>
<div id="content">
<p>Scene: A corridor at a sperm bank.</p>
<p>Sheldon: If a photon is directed through a plane with two slits in it<br />
Leonard: Agreed, what’s your point?</p>
</div>
<div id="footer">Blog at WordPress.com.</div>
</body></html>"#;

    #[test]
    fn test_extract_content_only() {
        let extractor = ContentExtractor::new("#content").unwrap();
        let text = extractor.extract(PAGE).unwrap();

        assert!(text.contains("Scene: A corridor at a sperm bank."));
        assert!(text.contains("Leonard: Agreed, what’s your point?"));
        assert!(!text.contains("WordPress"));
        assert!(!text.contains("<p>"));
        assert!(text.lines().any(|l| l.starts_with("Sheldon: If a photon")));
    }

    #[test]
    fn test_missing_container() {
        let extractor = ContentExtractor::new("#content").unwrap();
        let err = extractor.extract("<html><body><p>nothing</p></body></html>").unwrap_err();
        assert!(matches!(err, TranscriptError::Extraction { .. }));

        assert!(extractor.extract("").is_err());
    }

    #[test]
    fn test_invalid_selector() {
        let err = ContentExtractor::new("##").unwrap_err();
        assert!(matches!(err, TranscriptError::Config(_)));
    }

    #[test]
    fn test_extract_all_degrades_gracefully() {
        let extractor = ContentExtractor::new("#content").unwrap();
        let mut transcripts = vec![
            Transcript::new(1, 1, "pilot-episode".to_string(), "a".to_string()),
            Transcript::new(1, 2, "second".to_string(), "b".to_string()).with_html(PAGE.to_string()),
        ];

        let summary = extractor.extract_all(&mut transcripts);

        assert_eq!(summary, ExtractionSummary { extracted: 1, failed: 1 });
        assert!(transcripts[0].text.is_empty());
        assert!(transcripts[1].text.contains("Sheldon:"));
    }
}
