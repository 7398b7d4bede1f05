//! HTTP transport for filman.cc
//!
//! Every request carries the same browser-like header set and the current
//! session cookies. A fresh `reqwest::Client` (and cookie jar) is built per
//! call so nothing leaks between requests.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Url;
use tracing::debug;

use crate::body::decode_body;
use crate::error::{FilmanError, Result};
use crate::url::BASE_URL;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36";
const ACCEPT_ENCODING: &str = "gzip, deflate, br, zstd";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site root, without trailing slash (default: `https://filman.cc`)
    pub base_url: String,
    /// Total request timeout in seconds (default: 300)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: 300,
        }
    }
}

/// Request method plus, for POST, the url-encoded form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get,
    Post(Vec<(String, String)>),
}

/// HTTP client wrapper for filman.cc
///
/// Holds only configuration and the cookie mapping; the underlying
/// connection pool is recreated on every [`FilmanClient::fetch`].
#[derive(Debug, Clone)]
pub struct FilmanClient {
    base_url: Url,
    timeout: Duration,
    cookies: BTreeMap<String, String>,
}

impl FilmanClient {
    /// Create a new client with default configuration and no cookies
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), BTreeMap::new())
    }

    /// Create a new client with custom configuration and session cookies
    ///
    /// # Errors
    /// - `InvalidUrl` if `config.base_url` cannot be parsed
    pub fn with_config(config: ClientConfig, cookies: BTreeMap<String, String>) -> Result<Self> {
        let trimmed = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| FilmanError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(config.timeout_secs),
            cookies,
        })
    }

    /// Site root without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn cookies(&self) -> &BTreeMap<String, String> {
        &self.cookies
    }

    /// Header set sent with every request
    ///
    /// `Origin` and `Referer` are pinned to the configured site.
    pub fn default_headers(&self) -> Result<HeaderMap> {
        let origin = self.base_url();
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(header::ORIGIN, header_value(origin)?);
        headers.insert(header::REFERER, header_value(&format!("{}/", origin))?);
        headers.insert(
            "x-requested-with",
            HeaderValue::from_static("XMLHttpRequest"),
        );
        Ok(headers)
    }

    /// Fetch `url` and return the decoded body text
    ///
    /// The HTTP status is not inspected; whatever body the site returns is
    /// decoded. There is no retry.
    ///
    /// # Errors
    /// - `InvalidUrl` if `url` is not an absolute URL
    /// - `HttpError` for network failures or timeouts
    pub async fn fetch(&self, url: &str, request: Request) -> Result<String> {
        let target = Url::parse(url).map_err(|e| FilmanError::InvalidUrl(format!("{}: {}", url, e)))?;
        let client = self.session()?;

        let method = match &request {
            Request::Get => "GET",
            Request::Post(_) => "POST",
        };
        let outgoing = match request {
            Request::Get => client.get(target).build(),
            Request::Post(form) => client.post(target).form(&form).build().map(|mut req| {
                // `form` replaces the content type; the site expects the charset too
                req.headers_mut()
                    .insert(header::CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                req
            }),
        }
        .map_err(FilmanError::HttpError)?;

        let response = client.execute(outgoing).await.map_err(FilmanError::HttpError)?;
        let status = response.status();
        let encoding = response
            .headers()
            .get(header::CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let raw = response.bytes().await.map_err(FilmanError::HttpError)?;
        debug!(
            method,
            url,
            status = status.as_u16(),
            encoding = %encoding,
            bytes = raw.len(),
            "fetched page"
        );

        Ok(decode_body(&raw, &encoding))
    }

    /// Build a one-shot client with headers and a cookie jar scoped to the site
    fn session(&self) -> Result<reqwest::Client> {
        let jar = Arc::new(Jar::default());
        for (name, value) in &self.cookies {
            jar.add_cookie_str(&format!("{}={}", name, value), &self.base_url);
        }

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .cookie_provider(jar)
            .default_headers(self.default_headers()?)
            .build()
            .map_err(FilmanError::HttpError)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| FilmanError::InvalidUrl(format!("{}: {}", value, e)))
}
