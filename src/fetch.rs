//! Logo fetching with a prioritized fallback chain
//!
//! Each brand record yields an ordered list of candidate sources:
//! Brandfetch, then Clearbit, then the official site's `/favicon.ico`.
//! Candidates are tried strictly in order with a single attempt each; the
//! first one whose bytes decode as an image wins. Transport errors,
//! non-success status codes, empty bodies, and undecodable payloads all
//! advance the chain the same way.

use image::RgbaImage;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::config::FetchConfig;
use crate::error::{CardGenError, Result};
use crate::records::BrandRecord;

/// Identifies which source in the fallback chain produced a logo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Brandfetch logo URL from the spreadsheet
    Brandfetch,
    /// Clearbit logo URL from the spreadsheet
    Clearbit,
    /// `<origin>/favicon.ico` derived from the official website
    Favicon,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Brandfetch => write!(f, "brandfetch"),
            SourceKind::Clearbit => write!(f, "clearbit"),
            SourceKind::Favicon => write!(f, "favicon"),
        }
    }
}

/// One entry of the fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoCandidate {
    pub kind: SourceKind,
    pub url: String,
}

/// A successfully fetched and decoded logo
#[derive(Debug, Clone)]
pub struct FetchedLogo {
    pub image: RgbaImage,
    pub source: SourceKind,
}

/// Normalize a URL field: bare domains get an `https://` prefix
pub fn ensure_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed.trim_start_matches('/'))
    }
}

/// Derive the favicon URL from the official site's origin, dropping any
/// path or query. Returns `None` when the site URL is empty or unparseable.
pub fn favicon_url(site: &str) -> Option<String> {
    let normalized = ensure_url(site);
    if normalized.is_empty() {
        return None;
    }
    let parsed = Url::parse(&normalized).ok()?;
    parsed.host_str()?;
    Some(format!("{}/favicon.ico", parsed.origin().ascii_serialization()))
}

/// Build the ordered candidate list for a record, skipping empty URL fields
pub fn candidates(record: &BrandRecord) -> Vec<LogoCandidate> {
    let mut list = Vec::new();

    if !record.brandfetch.trim().is_empty() {
        list.push(LogoCandidate {
            kind: SourceKind::Brandfetch,
            url: ensure_url(&record.brandfetch),
        });
    }
    if !record.clearbit.trim().is_empty() {
        list.push(LogoCandidate {
            kind: SourceKind::Clearbit,
            url: ensure_url(&record.clearbit),
        });
    }
    if let Some(url) = favicon_url(&record.website) {
        list.push(LogoCandidate {
            kind: SourceKind::Favicon,
            url,
        });
    }

    list
}

/// Decode raw bytes into an RGBA image.
///
/// The container format is sniffed from the bytes; favicon payloads whose
/// ICO header defeats sniffing get one explicit ICO retry.
pub fn decode_logo(bytes: &[u8]) -> Result<RgbaImage> {
    match image::load_from_memory(bytes) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(first) => image::load_from_memory_with_format(bytes, image::ImageFormat::Ico)
            .map(|img| img.to_rgba8())
            .map_err(|_| CardGenError::decode("unrecognized image data", first)),
    }
}

/// Blocking logo fetcher trying each candidate source once, in order
pub struct LogoFetcher {
    client: reqwest::blocking::Client,
}

impl LogoFetcher {
    /// Build a fetcher from network configuration.
    ///
    /// # Errors
    ///
    /// Returns `CardGenError::HttpClient` if the underlying client cannot be
    /// constructed. Fatal: without a client no record can be processed.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CardGenError::HttpClient { source: e })?;

        Ok(Self { client })
    }

    /// Fetch the first available logo for a record.
    ///
    /// # Errors
    ///
    /// Returns `CardGenError::NoSourceAvailable` when every candidate fails.
    /// Individual candidate failures are logged at debug level and advance
    /// the chain; they never surface to the caller.
    pub fn fetch(&self, record: &BrandRecord) -> Result<FetchedLogo> {
        for candidate in candidates(record) {
            match self.try_candidate(&candidate) {
                Ok(image) => {
                    return Ok(FetchedLogo {
                        image,
                        source: candidate.kind,
                    });
                }
                Err(e) => {
                    log::debug!("{}: {} source failed: {}", record.name, candidate.kind, e);
                }
            }
        }

        Err(CardGenError::NoSourceAvailable {
            brand: record.name.clone(),
        })
    }

    /// Single attempt against one candidate: GET, status check, decode
    fn try_candidate(&self, candidate: &LogoCandidate) -> Result<RgbaImage> {
        let response = self.client.get(&candidate.url).send().map_err(|e| {
            CardGenError::SourceUnavailable {
                url: candidate.url.clone(),
                message: "transport error".into(),
                source: Some(e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CardGenError::SourceUnavailable {
                url: candidate.url.clone(),
                message: format!("status {}", status.as_u16()),
                source: None,
            });
        }

        let bytes = response.bytes().map_err(|e| CardGenError::SourceUnavailable {
            url: candidate.url.clone(),
            message: "failed to read body".into(),
            source: Some(e),
        })?;
        if bytes.is_empty() {
            return Err(CardGenError::SourceUnavailable {
                url: candidate.url.clone(),
                message: "empty body".into(),
                source: None,
            });
        }

        decode_logo(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::io::Cursor;

    fn record(name: &str, website: &str, brandfetch: &str, clearbit: &str) -> BrandRecord {
        BrandRecord {
            name: name.to_string(),
            website: website.to_string(),
            brandfetch: brandfetch.to_string(),
            clearbit: clearbit.to_string(),
        }
    }

    #[test]
    fn test_ensure_url() {
        assert_eq!(ensure_url("https://acme.test/x"), "https://acme.test/x");
        assert_eq!(ensure_url("http://acme.test"), "http://acme.test");
        assert_eq!(ensure_url("acme.test"), "https://acme.test");
        assert_eq!(ensure_url("//acme.test"), "https://acme.test");
        assert_eq!(ensure_url("  "), "");
    }

    #[test]
    fn test_favicon_url_strips_path_and_query() {
        assert_eq!(
            favicon_url("https://acme.test/about?ref=x"),
            Some("https://acme.test/favicon.ico".to_string())
        );
        assert_eq!(
            favicon_url("acme.test/shop"),
            Some("https://acme.test/favicon.ico".to_string())
        );
        assert_eq!(favicon_url(""), None);
    }

    #[test]
    fn test_candidates_priority_order() {
        let rec = record("Acme", "https://acme.test", "https://bf.test/a", "https://cb.test/a");
        let chain = candidates(&rec);

        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].kind, SourceKind::Brandfetch);
        assert_eq!(chain[1].kind, SourceKind::Clearbit);
        assert_eq!(chain[2].kind, SourceKind::Favicon);
        assert_eq!(chain[2].url, "https://acme.test/favicon.ico");
    }

    #[test]
    fn test_candidates_skip_empty_fields() {
        let rec = record("Acme", "https://acme.test", "", "https://cb.test/a");
        let chain = candidates(&rec);

        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].kind, SourceKind::Clearbit);
        assert_eq!(chain[1].kind, SourceKind::Favicon);
    }

    #[test]
    fn test_candidates_empty_record() {
        let rec = record("Acme", "", "", "");
        assert!(candidates(&rec).is_empty());
    }

    #[test]
    fn test_decode_logo_png_round() {
        let mut img = RgbaImage::new(4, 4);
        img.put_pixel(1, 1, Rgba([200, 30, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_logo(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(decoded.get_pixel(1, 1), &Rgba([200, 30, 30, 255]));
    }

    #[test]
    fn test_decode_logo_rejects_garbage() {
        let err = decode_logo(b"<html>not an image</html>").unwrap_err();
        assert!(err.is_recoverable());
        match err {
            CardGenError::DecodeFailure { .. } => {}
            other => panic!("Expected DecodeFailure, got: {:?}", other),
        }
    }
}
