//! Opening a locator as a byte stream and reading it fully.
//!
//! Locators are treated as opaque URIs. Supported schemes:
//! - `data:` with a base64 payload (what the webview renderer emits via
//!   `canvas.toDataURL`)
//! - `file:` URLs and bare filesystem paths
//! - `http:`/`https:` via a blocking GET (requires the `http` feature)
//!
//! The byte stream is fully consumed before returning; nothing stays open.

use base64::Engine as Base64Engine;
#[cfg(feature = "http")]
use log::debug;
use url::Url;

use crate::{BridgeConfig, Error, Locator, Result};

/// Resolves locators into in-memory byte buffers.
///
/// Owns the HTTP client so repeated conversions through one [`crate::Bridge`]
/// reuse connections.
pub struct Fetcher {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: BridgeConfig,

    #[cfg(feature = "http")]
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new(config: BridgeConfig) -> Result<Self> {
        #[cfg(feature = "http")]
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            #[cfg(feature = "http")]
            client,
        })
    }

    /// Read the locator's entire contents into memory
    pub fn fetch(&self, locator: &Locator) -> Result<Vec<u8>> {
        match Url::parse(locator.as_str()) {
            Ok(url) => match url.scheme() {
                "data" => fetch_data(&url, self.config.max_bytes),
                "file" => {
                    let path = url.to_file_path().map_err(|_| {
                        Error::Locator(format!("Not a valid file URL: {}", locator))
                    })?;
                    self.read_file(&path)
                }
                "http" | "https" => self.fetch_http(locator.as_str()),
                other => Err(Error::Locator(format!(
                    "Unsupported scheme '{}' in locator {}",
                    other, locator
                ))),
            },

            // A bare path like "/tmp/plot.png" is not an absolute URL; treat
            // it as a filesystem path.
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.read_file(std::path::Path::new(locator.as_str()))
            }

            Err(e) => Err(Error::Locator(format!(
                "Failed to parse locator {}: {}",
                locator, e
            ))),
        }
    }

    fn read_file(&self, path: &std::path::Path) -> Result<Vec<u8>> {
        let max = self.config.max_bytes;
        if max > 0 {
            let len = std::fs::metadata(path)
                .map_err(|e| Error::Fetch(format!("Failed to read {}: {}", path.display(), e)))?
                .len();
            if len > max {
                return Err(Error::Fetch(format!(
                    "{} is {} bytes, over the {} byte cap",
                    path.display(),
                    len,
                    max
                )));
            }
        }

        std::fs::read(path)
            .map_err(|e| Error::Fetch(format!("Failed to read {}: {}", path.display(), e)))
    }

    #[cfg(feature = "http")]
    fn fetch_http(&self, uri: &str) -> Result<Vec<u8>> {
        use std::io::Read;

        let res = self
            .client
            .get(uri)
            .header("User-Agent", self.config.user_agent.clone())
            .send()
            .map_err(|e| Error::Fetch(format!("HTTP GET failed: {}", e)))?;

        if !res.status().is_success() {
            return Err(Error::Fetch(format!(
                "HTTP status {} for {}",
                res.status(),
                uri
            )));
        }

        let max = self.config.max_bytes;
        if max > 0 {
            if let Some(len) = res.content_length() {
                if len > max {
                    return Err(Error::Fetch(format!(
                        "HTTP body for {} is {} bytes, over the {} byte cap",
                        uri, len, max
                    )));
                }
            }

            // Content-Length may be absent or lie; cap the read itself too
            let mut buf = Vec::new();
            res.take(max.saturating_add(1))
                .read_to_end(&mut buf)
                .map_err(|e| Error::Fetch(format!("Failed to read response body: {}", e)))?;
            if buf.len() as u64 > max {
                return Err(Error::Fetch(format!(
                    "HTTP body for {} exceeds the {} byte cap",
                    uri, max
                )));
            }

            debug!("fetched {} bytes from {}", buf.len(), uri);
            Ok(buf)
        } else {
            let bytes = res
                .bytes()
                .map_err(|e| Error::Fetch(format!("Failed to read response body: {}", e)))?;

            debug!("fetched {} bytes from {}", bytes.len(), uri);
            Ok(bytes.to_vec())
        }
    }

    #[cfg(not(feature = "http"))]
    fn fetch_http(&self, uri: &str) -> Result<Vec<u8>> {
        Err(Error::Locator(format!(
            "http(s) locators require the `http` feature: {}",
            uri
        )))
    }
}

/// Decode a `data:` URL payload.
///
/// Only base64 payloads are accepted; a plain-text data URL cannot carry PNG
/// bytes anyway.
fn fetch_data(url: &Url, max_bytes: u64) -> Result<Vec<u8>> {
    // For data URLs the whole "<mediatype>;base64,<payload>" lives in path()
    let path = url.path();
    let (meta, payload) = path
        .split_once(',')
        .ok_or_else(|| Error::Locator(format!("data URL has no ',' separator: {}", url)))?;

    if !meta.ends_with(";base64") {
        return Err(Error::Locator(format!(
            "data URL is not base64-encoded: {}",
            meta
        )));
    }

    let payload = payload.trim();

    // Base64 decodes 4 input chars to 3 bytes; reject before allocating
    if max_bytes > 0 && (payload.len() as u64 / 4) * 3 > max_bytes {
        return Err(Error::Fetch(format!(
            "data URL payload decodes to more than the {} byte cap",
            max_bytes
        )));
    }

    Base64Engine::decode(&base64::engine::general_purpose::STANDARD, payload)
        .map_err(|e| Error::Fetch(format!("Invalid base64 payload: {}", e)))
}
