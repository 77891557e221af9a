use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::error::{Result, TranscriptError};

/// `<urlset>` root of an XML sitemap
#[derive(Debug, Deserialize)]
struct UrlSet {
    url: Vec<UrlEntry>,
}

/// One `<url>` entry; everything but `<loc>` is ignored
#[derive(Debug, Deserialize)]
struct UrlEntry {
    loc: String,
}

/// Parse a sitemap document into its `<loc>` values, in document order
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>> {
    let root = check_well_formed(xml)?;
    if root != "urlset" {
        return Err(TranscriptError::Parse(format!(
            "expected <urlset> root element, found <{root}>"
        )));
    }

    let urlset: UrlSet =
        quick_xml::de::from_str(xml).map_err(|e| TranscriptError::Parse(e.to_string()))?;
    if urlset.url.is_empty() {
        return Err(TranscriptError::Parse("sitemap has no <url> entries".to_string()));
    }

    Ok(urlset
        .url
        .into_iter()
        .map(|entry| entry.loc.trim().to_string())
        .collect())
}

/// Keep the addresses that contain `pattern`, preserving order
pub fn filter_transcript_urls(urls: Vec<String>, pattern: &str) -> Vec<String> {
    urls.into_iter().filter(|url| url.contains(pattern)).collect()
}

/// Walk the whole document once and return the local name of its single root
/// element. Content outside the root, other than whitespace, is an error.
fn check_well_formed(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut root: Option<String> = None;
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            TranscriptError::Parse(format!(
                "malformed XML at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match &event {
            Event::Start(e) | Event::Empty(e) if depth == 0 => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if let Some(root) = &root {
                    return Err(TranscriptError::Parse(format!(
                        "second root element <{name}> after </{root}>"
                    )));
                }
                root = Some(name);
                if matches!(event, Event::Start(_)) {
                    depth = 1;
                }
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(text) if depth == 0 => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(TranscriptError::Parse(
                        "text outside the root element".to_string(),
                    ));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(TranscriptError::Parse(
                    "CDATA outside the root element".to_string(),
                ))
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(TranscriptError::Parse("root element is never closed".to_string()));
    }
    root.ok_or_else(|| TranscriptError::Parse("document has no root element".to_string()))
}
