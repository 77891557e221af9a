use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::sitemap::{filter_transcript_urls, parse_sitemap};
use crate::config::Config;
use crate::error::{Result, TranscriptError};
use crate::transcript::Transcript;

/// Season, episode and title slug encoded in a transcript address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMetadata {
    pub season: u32,
    pub episode: u32,
    pub title: String,
}

/// Parse `.../series-<season>-episode-<episode>-<title-slug>/`
pub fn parse_episode_metadata(address: &str) -> Result<EpisodeMetadata> {
    let url = Url::parse(address).map_err(|e| TranscriptError::metadata(address, e))?;
    let slug = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| TranscriptError::metadata(address, "address has no path"))?;

    let parts: Vec<&str> = slug.splitn(5, '-').collect();
    if parts.len() < 5 {
        return Err(TranscriptError::metadata(
            address,
            format!("expected series-<season>-episode-<episode>-<title>, got `{slug}`"),
        ));
    }

    let season = parse_number(address, "season", parts[1])?;
    let episode = parse_number(address, "episode", parts[3])?;

    Ok(EpisodeMetadata {
        season,
        episode,
        title: parts[4].to_string(),
    })
}

fn parse_number(address: &str, field: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(TranscriptError::metadata(
            address,
            format!("{field} `{value}` is not a positive integer"),
        )),
    }
}

/// Downloads the sitemap and transcript pages, one request at a time
#[derive(Clone)]
pub struct TranscriptFetcher {
    client: Client,
    timeout: Duration,
}

impl TranscriptFetcher {
    /// Create a fetcher from the run configuration
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_seconds);
        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| TranscriptError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// GET `url` and return the body; non-success statuses are errors
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                TranscriptError::fetch(url, format!("timed out after {}s", self.timeout.as_secs()))
            } else {
                TranscriptError::fetch(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::fetch(url, format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| TranscriptError::fetch(url, e))?;
        debug!("📄 Downloaded {} characters from {}", body.len(), url);
        Ok(body)
    }

    /// Fetch the sitemap and return the transcript addresses it lists
    pub async fn discover_urls(&self, sitemap_url: &str, pattern: &str) -> Result<Vec<String>> {
        info!("🗺️ Fetching sitemap: {}", sitemap_url);
        let xml = self.fetch_page(sitemap_url).await?;
        let all_urls = parse_sitemap(&xml)?;
        let urls = filter_transcript_urls(all_urls, pattern);
        debug!("Sitemap lists {} transcript pages", urls.len());
        Ok(urls)
    }

    /// Download every transcript page in order.
    ///
    /// All addresses are checked for metadata before the first download. A page
    /// that cannot be fetched gets empty markup instead of failing the batch.
    pub async fn fetch_transcripts(&self, urls: &[String]) -> Result<Vec<Transcript>> {
        let metadata = urls
            .iter()
            .map(|url| parse_episode_metadata(url))
            .collect::<Result<Vec<_>>>()?;

        let mut transcripts = Vec::with_capacity(urls.len());
        for (url, meta) in urls.iter().zip(metadata) {
            let html = match self.fetch_page(url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("⚠️ Keeping empty page: {}", e);
                    String::new()
                }
            };

            transcripts.push(Transcript::new(meta.season, meta.episode, meta.title, url.clone()).with_html(html));
        }

        Ok(transcripts)
    }
}
