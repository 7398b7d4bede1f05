//! Debug script walking search -> listing -> player links against the live site
//!
//! Run with: cargo run --example debug_episode -p filman-core -- "doktor who"

use filman_core::{ClientConfig, FilmanScraper, PreferencesStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phrase = std::env::args().nth(1).unwrap_or_else(|| "incepcja".to_string());
    let store = PreferencesStore::open("settings.json").await?;
    let scraper = FilmanScraper::with_config(ClientConfig::default(), store.cookies().await)?;

    println!("Searching for '{}'...\n", phrase);
    let results = scraper.search(&phrase).await?;

    if results.is_empty() {
        println!("No results found! (are PHPSESSID/user_id set in settings.json?)");
        return Ok(());
    }

    for (i, hit) in results.iter().take(5).enumerate() {
        println!("{}. {}", i + 1, hit.title);
        println!("   URL: {}", hit.url);
        println!("   Thumbnail: {}", hit.thumbnail);
    }

    let hit = &results[0];
    println!("\nFetching listing for: {}", hit.title);
    let listing = scraper.parse_listing(&hit.url).await?;
    println!("Title: {}", listing.title);
    for (season, episodes) in listing.seasons.iter() {
        println!("  {} ({} episodes)", season, episodes.len());
    }

    let Some(episode) = listing.seasons.iter().flat_map(|(_, eps)| eps).next() else {
        println!("Listing has no episodes");
        return Ok(());
    };

    println!("\nFetching players for: {}", episode.label);
    let links = scraper.parse_episode_links(&episode.url).await?;
    if links.is_empty() {
        println!("No players found");
    }
    for link in &links {
        println!(
            "  {} -> {}",
            link.host,
            link.url.as_deref().unwrap_or("(no src)")
        );
    }

    Ok(())
}
