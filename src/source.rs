//! Image source resolution.
//!
//! Turns an [`ImageInput`] into an ordered list of encoded image buffers:
//! the inline binary image first (when present), then each URL in order,
//! downloaded sequentially. Downloads go through the [`ImageFetcher`] trait
//! so tests and hosts can supply their own transport.

use crate::config::HttpConfig;
use crate::error::{EditorError, Result};
use crate::types::ImageInput;
use std::time::Duration;
use thiserror::Error;

/// A single download that failed. Carries the URL so the host can tell
/// which input was bad.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to fetch {url}: {reason}")]
pub struct FetchError {
    pub url: String,
    pub reason: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Retrieves the encoded bytes behind a URL.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP(S) fetcher backed by `reqwest`.
///
/// Non-2xx responses and bodies that are not a recognizable image format
/// are failures.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        tracing::debug!(%url, "downloading image");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::new(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(url, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::new(url, format!("Failed to read body: {e}")))?;

        if image::guess_format(&body).is_err() {
            return Err(FetchError::new(url, "Response body is not an image"));
        }

        tracing::debug!(%url, bytes = body.len(), "downloaded image");
        Ok(body.to_vec())
    }
}

/// Resolve every supplied image into bytes.
///
/// Fails with [`EditorError::NoInput`] before any download when nothing was
/// supplied. The first failed download aborts the whole resolution.
#[tracing::instrument(skip_all, fields(urls = input.urls.len(), binary = input.binary_image.is_some()))]
pub fn resolve_images(input: &ImageInput, fetcher: &dyn ImageFetcher) -> Result<Vec<Vec<u8>>> {
    if input.is_empty() {
        return Err(EditorError::NoInput);
    }

    let mut images = Vec::with_capacity(input.urls.len() + 1);
    if let Some(binary) = &input.binary_image {
        images.push(binary.clone());
    }
    for url in &input.urls {
        images.push(fetcher.fetch(url)?);
    }

    if images.is_empty() {
        return Err(EditorError::NoInput);
    }
    tracing::info!(count = images.len(), "resolved images");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockFetcher;

    #[test]
    fn empty_input_fails_before_fetching() {
        let fetcher = MockFetcher::new();
        let result = resolve_images(&ImageInput::default(), &fetcher);

        assert!(matches!(result, Err(EditorError::NoInput)));
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn binary_comes_first_then_urls_in_order() {
        let fetcher = MockFetcher::new()
            .with("https://a/1.png", vec![1])
            .with("https://a/2.png", vec![2]);
        let input = ImageInput {
            urls: vec!["https://a/2.png".into(), "https://a/1.png".into()],
            binary_image: Some(vec![0]),
        };

        let images = resolve_images(&input, &fetcher).unwrap();
        assert_eq!(images, vec![vec![0], vec![2], vec![1]]);
        assert_eq!(fetcher.requests(), vec!["https://a/2.png", "https://a/1.png"]);
    }

    #[test]
    fn binary_only_needs_no_fetcher_calls() {
        let fetcher = MockFetcher::new();
        let input = ImageInput {
            urls: vec![],
            binary_image: Some(vec![9, 9]),
        };
        assert_eq!(resolve_images(&input, &fetcher).unwrap(), vec![vec![9, 9]]);
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn first_failed_download_aborts() {
        let fetcher = MockFetcher::new().with("https://a/ok.png", vec![1]);
        let input = ImageInput {
            urls: vec![
                "https://a/missing.png".into(),
                "https://a/ok.png".into(),
            ],
            binary_image: None,
        };

        let err = resolve_images(&input, &fetcher).unwrap_err();
        assert!(matches!(
            &err,
            EditorError::Fetch(FetchError { url, .. }) if url == "https://a/missing.png"
        ));
        assert_eq!(fetcher.requests(), vec!["https://a/missing.png"]);
    }

    #[test]
    fn http_fetcher_builds_from_default_config() {
        assert!(HttpFetcher::new(&HttpConfig::default()).is_ok());
    }
}
