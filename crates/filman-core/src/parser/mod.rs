//! HTML parsers for filman.cc
//!
//! Contains modules for parsing different page types. All parsers are pure
//! functions over an HTML string; fetching lives in the scraper.

pub mod links;
pub mod listing;
pub mod search;

pub use links::{PayloadError, decode_payload, parse_episode_links};
pub use listing::parse_listing;
pub use search::parse_search_results;
