//! Main scraper API for filman.cc
//!
//! Provides the high-level API combining the HTTP client and parsers. Each
//! operation makes exactly one request and parses the result.

use std::collections::BTreeMap;

use crate::client::{ClientConfig, FilmanClient, Request};
use crate::error::Result;
use crate::parser::{parse_episode_links, parse_listing, parse_search_results};
use crate::types::{Listing, PlayerLink, SearchResult};
use crate::url::{build_search_url, search_form};

/// Main scraper API for filman.cc
///
/// Cheap to build: construct one per request with the current session
/// cookies.
#[derive(Debug, Clone)]
pub struct FilmanScraper {
    client: FilmanClient,
}

impl FilmanScraper {
    /// Create a new scraper with default configuration and no cookies
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = FilmanClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom configuration and session cookies
    ///
    /// # Arguments
    /// * `config` - Client configuration (site root, timeout)
    /// * `cookies` - Session cookies, usually `PHPSESSID` and `user_id`
    ///
    /// # Errors
    /// Returns `InvalidUrl` if the configured site root is malformed
    pub fn with_config(config: ClientConfig, cookies: BTreeMap<String, String>) -> Result<Self> {
        let client = FilmanClient::with_config(config, cookies)?;
        Ok(Self { client })
    }

    /// Search the site for a phrase
    ///
    /// The phrase is posted verbatim; an empty phrase is not rejected.
    ///
    /// # Returns
    /// Results in document order, empty if nothing matched
    ///
    /// # Errors
    /// - `HttpError` if the network request fails
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> filman_core::Result<()> {
    /// use filman_core::FilmanScraper;
    /// let scraper = FilmanScraper::new()?;
    /// for hit in scraper.search("doktor who").await? {
    ///     println!("{}: {}", hit.title, hit.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, phrase: &str) -> Result<Vec<SearchResult>> {
        let url = build_search_url(self.client.base_url());
        let html = self.client.fetch(&url, Request::Post(search_form(phrase))).await?;
        parse_search_results(&html)
    }

    /// Fetch a detail page and group its episodes by season
    ///
    /// Movie pages without a season list come back as a single "Movie"
    /// season holding one "Play" entry that points at `url` itself.
    ///
    /// # Errors
    /// - `InvalidUrl` if `url` is not absolute
    /// - `HttpError` if the network request fails
    pub async fn parse_listing(&self, url: &str) -> Result<Listing> {
        let html = self.client.fetch(url, Request::Get).await?;
        parse_listing(&html, url)
    }

    /// Fetch an episode page and extract its embedded players
    ///
    /// # Errors
    /// - `InvalidUrl` if `url` is not absolute
    /// - `HttpError` if the network request fails
    pub async fn parse_episode_links(&self, url: &str) -> Result<Vec<PlayerLink>> {
        let html = self.client.fetch(url, Request::Get).await?;
        parse_episode_links(&html)
    }
}
