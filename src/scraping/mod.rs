//! Transcript blog scraping
//!
//! Discovers transcript pages through the site's XML sitemap, downloads them
//! and strips the markup down to the transcript body.

pub mod extractor;
/// HTTP side of the scraper: sitemap discovery and page downloads
pub mod fetcher;
pub mod sitemap;

pub use extractor::{ContentExtractor, ExtractionSummary};
pub use fetcher::{parse_episode_metadata, EpisodeMetadata, TranscriptFetcher};
pub use sitemap::{filter_transcript_urls, parse_sitemap};
