//! URL helper functions for filman.cc
//!
//! Provides the fixed site root and endpoint builders.

/// Default site root
pub const BASE_URL: &str = "https://filman.cc";

const SEARCH_PATH: &str = "/szukam";

/// Builds the search endpoint URL for a site root
///
/// # Example
/// ```
/// use filman_core::url::build_search_url;
/// assert_eq!(build_search_url("https://filman.cc"), "https://filman.cc/szukam");
/// assert_eq!(build_search_url("https://filman.cc/"), "https://filman.cc/szukam");
/// ```
pub fn build_search_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH)
}

/// Form fields posted to the search endpoint
///
/// The phrase is sent as-is; an empty phrase is allowed and left to the site.
pub fn search_form(phrase: &str) -> Vec<(String, String)> {
    vec![("phrase".to_string(), phrase.to_string())]
}
