// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching
//!
//! One bounded-timeout GET per URL. The body is returned whatever the HTTP
//! status; only transport-level problems count as failures.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::{Host, Url};

use super::config::ScrapeConfig;

/// Page fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),
    /// Connection or protocol error
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// URL (or a redirect target) is unsafe: localhost, private IP, non-http scheme, or malformed
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),
    /// Declared body size is over the configured cap
    #[error("Page too large ({size} bytes): {url}")]
    TooLarge { url: String, size: u64 },
}

/// Source of raw page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw body of `url`
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Decides whether a URL (first request or redirect hop) may be fetched
type UrlGuard = fn(&Url) -> bool;

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 5;

/// reqwest-backed fetcher with a fixed timeout and User-Agent
pub struct HttpPageFetcher {
    client: Client,
    url_guard: UrlGuard,
    max_body_bytes: usize,
}

impl HttpPageFetcher {
    /// Create a new page fetcher
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let guard: UrlGuard = if config.allow_private_hosts {
            is_http_url
        } else {
            is_safe
        };
        Self::with_url_guard(config, guard)
    }

    /// Every hop, including redirects, must pass `url_guard`
    fn with_url_guard(config: &ScrapeConfig, url_guard: UrlGuard) -> Result<Self, FetchError> {
        let redirect = Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if url_guard(attempt.url()) {
                attempt.follow()
            } else {
                attempt.error("unsafe redirect target")
            }
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .redirect(redirect)
            .build()
            .map_err(|e| FetchError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url_guard,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

fn is_http_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn is_safe(url: &Url) -> bool {
    if !is_http_url(url) {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_lowercase();
            domain != "localhost" && !domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_public_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_public_ip(IpAddr::V6(ip)),
        None => false,
    }
}

fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            let this_network = a == 0;
            let shared = a == 100 && (b & 0xc0) == 64;
            !(v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || this_network
                || shared)
        }
        IpAddr::V6(v6) => {
            if v6.is_loopback() || v6.is_unspecified() {
                return false;
            }
            // IPv4-mapped (::ffff:a.b.c.d) and IPv4-compatible (::a.b.c.d)
            if let Some(v4) = v6.to_ipv4() {
                return is_public_ip(IpAddr::V4(v4));
            }
            let unique_local = (v6.segments()[0] & 0xfe00) == 0xfc00;
            let link_local = (v6.segments()[0] & 0xffc0) == 0xfe80;
            !(unique_local || link_local)
        }
    }
}

fn map_reqwest_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_redirect() {
        FetchError::UnsafeUrl(format!("{} (redirect blocked)", url))
    } else if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::HttpError(e.to_string())
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let valid = Url::parse(url).is_ok_and(|u| (self.url_guard)(&u));
        if !valid {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching content from: {}", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        debug!("HTTP {} from: {}", response.status().as_u16(), url);

        if let Some(size) = response.content_length() {
            if size > self.max_body_bytes as u64 {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    size,
                });
            }
        }

        // Undeclared or lying lengths: stop reading at the cap
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| map_reqwest_error(url, e))?
        {
            let room = self.max_body_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                debug!("Body of {} cut at {} bytes", url, self.max_body_bytes);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
