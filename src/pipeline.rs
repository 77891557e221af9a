use anyhow::{Context, Result};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::analysis::{count_word_by_speaker, SpeakerCounts};
use crate::config::Config;
use crate::scraping::{ContentExtractor, TranscriptFetcher};
use crate::speakers::normalize_speakers;
use crate::transcript::{extract_dialogues, segregate_scenes, Transcript};

/// Pipeline stages, used to label progress and fatal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovery,
    Fetch,
    Extraction,
    Parsing,
    Segregation,
    Normalization,
    Query,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Discovery => "discovery",
            Stage::Fetch => "fetch",
            Stage::Extraction => "extraction",
            Stage::Parsing => "parsing",
            Stage::Segregation => "segregation",
            Stage::Normalization => "normalization",
            Stage::Query => "query",
        };
        f.write_str(name)
    }
}

/// Counts and answer of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Transcript addresses found in the sitemap; set by `run`, 0 for offline analysis
    pub urls_discovered: usize,
    pub transcripts: usize,
    pub empty_pages: usize,
    pub extraction_failures: usize,
    pub raw_lines: usize,
    pub dialogues: usize,
    pub scenes: usize,
    pub speaker: String,
    pub word: String,
    pub word_count: usize,
    pub speaker_counts: SpeakerCounts,
    pub elapsed: Duration,
}

impl PipelineReport {
    /// The final one-line answer, e.g. `ANS: Sheldon says the word "penny" 7 times`
    pub fn answer(&self) -> String {
        format!(
            "ANS: {} says the word \"{}\" {} times",
            title_case(&self.speaker),
            self.word.to_lowercase(),
            self.word_count
        )
    }
}

/// Capitalize the first letter of every whitespace-separated word
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Runs discovery, download, parsing, normalization and the word query
pub struct TranscriptPipeline {
    config: Config,
    fetcher: TranscriptFetcher,
    extractor: ContentExtractor,
}

impl TranscriptPipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        let fetcher = TranscriptFetcher::new(&config)?;
        let extractor = ContentExtractor::new(&config.content_selector)?;

        Ok(Self {
            config,
            fetcher,
            extractor,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full run against the configured sitemap
    pub async fn run(&self) -> Result<PipelineReport> {
        let start_time = Instant::now();

        info!("🔍 Getting urls for the transcripts");
        let urls = self
            .fetcher
            .discover_urls(&self.config.sitemap_url, &self.config.url_filter)
            .await
            .with_context(|| format!("{} stage failed", Stage::Discovery))?;
        info!("🔗 Got {} urls for transcripts, downloading HTML", urls.len());

        let transcripts = self
            .fetcher
            .fetch_transcripts(&urls)
            .await
            .with_context(|| format!("{} stage failed", Stage::Fetch))?;
        let empty_pages = transcripts.iter().filter(|t| t.html.is_empty()).count();
        info!(
            "📥 Got {} transcripts ({} empty pages), parsing them",
            transcripts.len(),
            empty_pages
        );

        let mut report = self.analyze(transcripts);
        report.urls_discovered = urls.len();
        report.empty_pages = empty_pages;
        report.elapsed = start_time.elapsed();

        info!("🎉 Pipeline completed in {:.2}s", report.elapsed.as_secs_f64());
        Ok(report)
    }

    /// Offline stages: extraction through the query, on already fetched pages
    pub fn analyze(&self, mut transcripts: Vec<Transcript>) -> PipelineReport {
        let start_time = Instant::now();

        let summary = self.extractor.extract_all(&mut transcripts);
        info!(
            "📝 Extracted text from {} transcripts ({} without content)",
            summary.extracted, summary.failed
        );

        let transcripts: Vec<Arc<Transcript>> = transcripts.into_iter().map(Arc::new).collect();
        let lines = extract_dialogues(&transcripts);
        let raw_lines = lines.len();
        info!("💬 Got {} dialogues and scenes", raw_lines);

        let (mut dialogues, scenes) = segregate_scenes(lines);
        info!(
            "🎬 Segregated into {} dialogues and {} scenes",
            dialogues.len(),
            scenes.len()
        );

        normalize_speakers(&mut dialogues);
        let speaker_counts = SpeakerCounts::from_dialogues(&dialogues);
        info!("🧹 Normalized speaker names ({} distinct speakers)", speaker_counts.len());

        let word_count = count_word_by_speaker(&dialogues, &self.config.speaker, &self.config.word);
        debug!(
            "Counted {:?} said by {:?}: {}",
            self.config.word, self.config.speaker, word_count
        );

        PipelineReport {
            urls_discovered: 0,
            transcripts: transcripts.len(),
            empty_pages: transcripts.iter().filter(|t| t.html.is_empty()).count(),
            extraction_failures: summary.failed,
            raw_lines,
            dialogues: dialogues.len(),
            scenes: scenes.len(),
            speaker: self.config.speaker.to_lowercase(),
            word: self.config.word.to_lowercase(),
            word_count,
            speaker_counts,
            elapsed: start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    fn page(body: &str) -> String {
        format!("<html><body><div id=\"content\">{body}</div><div id=\"footer\">Sheldon: footer penny</div></body></html>")
    }

    fn transcript(episode: u32, body: &str) -> Transcript {
        Transcript::new(1, episode, format!("episode-{episode}"), format!("link-{episode}"))
            .with_html(page(body))
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sheldon"), "Sheldon");
        assert_eq!(title_case("mrs cooper"), "Mrs Cooper");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Discovery.to_string(), "discovery");
        assert_eq!(Stage::Normalization.to_string(), "normalization");
    }

    #[test]
    fn test_analyze_counts_word_for_speaker() {
        let pipeline = TranscriptPipeline::new(Config::default()).unwrap();
        let transcripts = vec![
            transcript(
                1,
                "<p>Scene: The apartment.</p>\n<p>Sheldon: Penny, penny, PENNY!</p>\n<p>Penny (entering): What?</p>\n<p>Sheldon (annoyed): Penny.</p>",
            ),
            Transcript::new(1, 2, "missing".to_string(), "link-2".to_string()),
            transcript(3, "<p>Past Sheldon: penny</p>\n<p>Leonard: Penny.</p>\n<p>Credits</p>"),
        ];

        let report = pipeline.analyze(transcripts);

        assert_eq!(report.transcripts, 3);
        // Nothing was discovered offline
        assert_eq!(report.urls_discovered, 0);
        assert_eq!(report.extraction_failures, 1);
        assert_eq!(report.empty_pages, 1);
        assert_eq!(report.raw_lines, 6);
        assert_eq!(report.scenes, 1);
        assert_eq!(report.dialogues, 5);
        assert_eq!(report.word_count, 5);
        assert_eq!(report.speaker_counts.get("sheldon"), 3);
        assert_eq!(report.speaker_counts.get("penny"), 1);
        assert_eq!(report.answer(), "ANS: Sheldon says the word \"penny\" 5 times");
    }

    #[test]
    fn test_analyze_other_query() {
        let config = ConfigBuilder::new().with_speaker("Leslie").with_word("Leonard").build();
        let pipeline = TranscriptPipeline::new(config).unwrap();
        let transcripts = vec![transcript(1, "<p>Lesley: Leonard, leonard.</p>\n<p>Leonard: Leslie.</p>")];

        let report = pipeline.analyze(transcripts);

        assert_eq!(report.word_count, 2);
        assert_eq!(report.answer(), "ANS: Leslie says the word \"leonard\" 2 times");
    }

    #[test]
    fn test_analyze_nothing() {
        let pipeline = TranscriptPipeline::new(Config::default()).unwrap();
        let report = pipeline.analyze(Vec::new());

        assert_eq!(report.word_count, 0);
        assert_eq!(report.dialogues, 0);
        assert!(report.speaker_counts.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ConfigBuilder::new().with_word("").build();
        assert!(TranscriptPipeline::new(config).is_err());
    }
}
