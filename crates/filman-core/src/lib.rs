//! Filman.cc Scraper Core Library
//!
//! Provides an async API for searching filman.cc and turning its HTML into
//! structured listings and embedded player links.
//!
//! # Overview
//!
//! This crate provides:
//! - An HTTP transport that sends the browser-like headers and session
//!   cookies the site expects, and decodes zstd bodies by hand
//! - Pure HTML parsers for search results, listing pages and episode pages
//! - A high-level [`FilmanScraper`] that fetches and parses in one call
//! - A [`PreferencesStore`] holding the session cookies and UI theme
//!
//! # Example
//!
//! ```no_run
//! use filman_core::{ClientConfig, FilmanScraper, PreferencesStore, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = PreferencesStore::open("settings.json").await?;
//!     let scraper = FilmanScraper::with_config(ClientConfig::default(), store.cookies().await)?;
//!
//!     let results = scraper.search("doktor who").await?;
//!     if let Some(hit) = results.first() {
//!         let listing = scraper.parse_listing(&hit.url).await?;
//!         for (season, episodes) in listing.seasons.iter() {
//!             println!("{season}: {} episodes", episodes.len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod body;
mod client;
mod error;
pub mod parser;
pub mod preferences;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, FilmanClient, Request};

// Re-export error types
pub use error::{FilmanError, Result};

// Re-export parser functions
pub use parser::{parse_episode_links, parse_listing, parse_search_results};

// Re-export preferences
pub use preferences::{Cookies, Preferences, PreferencesStore};

// Re-export main scraper API
pub use scraper::FilmanScraper;

// Re-export data types
pub use types::{Dimension, EpisodeEntry, Listing, PlayerLink, SearchResult, SeasonMap};
