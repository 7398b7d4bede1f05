//! Search results parser for filman.cc
//!
//! Parses the HTML fragment returned by the search endpoint.

use scraper::{ElementRef, Html, Selector};

use crate::error::{FilmanError, Result};
use crate::types::SearchResult;

const DEFAULT_TITLE: &str = "No title";

/// Parses search results HTML and returns the hits in document order
///
/// Each result lives in a `div.col-xs-3.col-lg-2` tile. Tiles without both
/// an anchor and an image are skipped.
///
/// # Errors
/// Returns `ParseError` if a selector fails to compile
pub fn parse_search_results(html: &str) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let tile_selector = selector("div.col-xs-3.col-lg-2")?;
    let anchor_selector = selector("a")?;
    let image_selector = selector("img")?;

    let results = document
        .select(&tile_selector)
        .filter_map(|tile| parse_tile(&tile, &anchor_selector, &image_selector))
        .collect();

    Ok(results)
}

fn parse_tile(tile: &ElementRef, anchor: &Selector, image: &Selector) -> Option<SearchResult> {
    let a = tile.select(anchor).next()?;
    let img = tile.select(image).next()?;

    Some(SearchResult {
        title: img.value().attr("alt").unwrap_or(DEFAULT_TITLE).to_string(),
        url: a.value().attr("href").unwrap_or_default().to_string(),
        thumbnail: img.value().attr("src").unwrap_or_default().to_string(),
    })
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FilmanError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}
