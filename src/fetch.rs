//! Retrying HTTP fetch over two client variants.
//!
//! [`Transport`] is the seam: production code uses the two reqwest
//! clients below, tests substitute stubs. [`fetch_with_retry`] wraps
//! any transport in the retry-until-success loop the pipeline relies
//! on: connection faults, non-success statuses, and the bot-challenge
//! interstitial are all logged and retried after a fixed delay, never
//! surfaced to the caller under the default (unbounded) policy.

use std::borrow::Cow;
use std::thread;

use log::warn;
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::StatusCode;

use crate::config::{FetchConfig, RetryPolicy};
use crate::error::{Error, Result};

/// Body marker of the Cloudflare challenge page. Treated as transient,
/// exactly like a non-success status.
const INTERSTITIAL_MARKER: &str = "Just a moment";

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

pub trait Transport {
    fn name(&self) -> &'static str;

    /// One blocking GET. Connection-level faults come back as `Err`;
    /// any response that arrived, whatever its status, is `Ok`.
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Plain client: browser user agent, fixed timeout, nothing else.
/// Used for icon downloads.
pub struct PlainTransport {
    client: Client,
}

impl PlainTransport {
    pub fn new(cfg: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent_value(&cfg.user_agent));
        let client = Client::builder()
            .timeout(cfg.timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for PlainTransport {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn get(&self, url: &str) -> Result<HttpResponse> {
        send(&self.client, url)
    }
}

/// Client variant built to pass basic bot-challenge pages: cookie jar,
/// compressed encodings, and a fuller browser header fingerprint.
/// Used for the page fetch. Selection is a caller choice via
/// [`FetchConfig::use_evasive_transport`], never auto-detected.
pub struct EvasiveTransport {
    client: Client,
}

impl EvasiveTransport {
    pub fn new(cfg: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(cfg.timeout)
            .default_headers(evasive_headers(&cfg.user_agent))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for EvasiveTransport {
    fn name(&self) -> &'static str {
        "evasive"
    }

    fn get(&self, url: &str) -> Result<HttpResponse> {
        send(&self.client, url)
    }
}

fn send(client: &Client, url: &str) -> Result<HttpResponse> {
    let resp = client.get(url).send()?;
    let status = resp.status();
    let body = resp.bytes()?.to_vec();
    Ok(HttpResponse { status, body })
}

fn user_agent_value(ua: &str) -> HeaderValue {
    HeaderValue::from_str(ua).unwrap_or(HeaderValue::from_static("Mozilla/5.0"))
}

fn evasive_headers(ua: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(USER_AGENT, user_agent_value(ua));
    headers
}

/// Retry until the transport yields a success-status response whose
/// body is not the bot interstitial.
///
/// Under the default policy this blocks indefinitely; the deliberate
/// assumption is that the target site is eventually reachable. Bounded
/// policies get [`Error::RetriesExhausted`] instead.
pub fn fetch_with_retry(
    transport: &dyn Transport,
    url: &str,
    policy: &RetryPolicy,
) -> Result<HttpResponse> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match transport.get(url) {
            Ok(resp) if !resp.status.is_success() => {
                warn!("{url}: HTTP {}, retrying", resp.status);
            }
            Ok(resp) if resp.text().contains(INTERSTITIAL_MARKER) => {
                warn!("{url}: bot challenge interstitial, retrying");
            }
            Ok(resp) => return Ok(resp),
            Err(e) => warn!("{url}: connection error: {e}"),
        }
        if let Some(max) = policy.max_attempts {
            if attempts >= max {
                return Err(Error::RetriesExhausted {
                    url: url.to_string(),
                    attempts,
                });
            }
        }
        thread::sleep(policy.delay);
    }
}
