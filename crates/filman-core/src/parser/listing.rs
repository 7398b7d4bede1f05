//! Listing page parser for filman.cc
//!
//! A listing (detail) page is either a series with an `#episode-list` of
//! seasons, or a single movie where the page itself is the only episode.

use scraper::{ElementRef, Html, Selector};

use super::search::selector;
use crate::error::Result;
use crate::types::{EpisodeEntry, Listing, SeasonMap};

const DEFAULT_TITLE: &str = "Movie";
const DEFAULT_SEASON: &str = "Season";
const MOVIE_SEASON: &str = "Movie";
const MOVIE_EPISODE: &str = "Play";

/// Parses a listing page into its title and seasons
///
/// # Arguments
/// * `html` - Raw HTML of the listing page
/// * `page_url` - URL the HTML was fetched from; used as the single
///   episode when the page has no season list
///
/// # Errors
/// Returns `ParseError` if a selector fails to compile
pub fn parse_listing(html: &str, page_url: &str) -> Result<Listing> {
    let document = Html::parse_document(html);
    let title = parse_title(&document)?.unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let season_selector = selector("ul#episode-list > li")?;
    let span_selector = selector("span")?;
    let episode_selector = selector("ul li a")?;

    let mut seasons = SeasonMap::new();
    for item in document.select(&season_selector) {
        let label = first_text(&item, &span_selector).unwrap_or_else(|| DEFAULT_SEASON.to_string());
        let episodes = item.select(&episode_selector).map(episode_entry).collect();
        seasons.insert(label, episodes);
    }

    if seasons.is_empty() {
        seasons.insert(MOVIE_SEASON, vec![EpisodeEntry::new(MOVIE_EPISODE, page_url)]);
    }

    Ok(Listing { title, seasons })
}

fn parse_title(document: &Html) -> Result<Option<String>> {
    let h1 = selector("h1")?;
    Ok(document.select(&h1).next().map(|el| trimmed_text(&el)))
}

fn first_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|el| trimmed_text(&el))
}

fn episode_entry(anchor: ElementRef) -> EpisodeEntry {
    EpisodeEntry {
        label: trimmed_text(&anchor),
        url: anchor.value().attr("href").unwrap_or_default().to_string(),
    }
}

fn trimmed_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
