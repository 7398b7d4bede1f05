//! Route handlers
//!
//! Page routes return their view data as JSON; rendering is left to the
//! browser UI.

use axum::{
    Form, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use filman_core::{Cookies, PlayerLink, SearchResult, SeasonMap};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;
use crate::error::AppResult;

const NO_URL: &str = "No URL provided";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UrlParams {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CookiesForm {
    #[serde(rename = "PHPSESSID")]
    pub session_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IndexView {
    pub query: Option<String>,
    pub results: Vec<SearchResult>,
    pub theme: String,
    pub cookies: Cookies,
}

#[derive(Debug, Serialize)]
pub struct MovieView {
    pub movie_title: String,
    pub episodes: SeasonMap,
    pub theme: String,
    pub cookies: Cookies,
}

#[derive(Debug, Serialize)]
pub struct LinksView {
    pub links: Vec<PlayerLink>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn success() -> Json<Value> {
    Json(json!({"status": "success"}))
}

/// `GET /?q=` - search results
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<IndexView>> {
    let results = match non_empty(params.q.clone()) {
        Some(phrase) => {
            let results = state.scraper().await?.search(&phrase).await?;
            info!(phrase = %phrase, count = results.len(), "search");
            results
        }
        None => Vec::new(),
    };

    let prefs = state.preferences.snapshot().await;
    Ok(Json(IndexView {
        query: params.q,
        results,
        theme: prefs.theme,
        cookies: prefs.cookies,
    }))
}

/// `GET /movie?url=` - seasons and episodes of a listing page
pub async fn movie(
    State(state): State<AppState>,
    Query(params): Query<UrlParams>,
) -> AppResult<Response> {
    let Some(url) = non_empty(params.url) else {
        return Ok(NO_URL.into_response());
    };

    let listing = state.scraper().await?.parse_listing(&url).await?;
    info!(url = %url, seasons = listing.seasons.len(), "listing");

    let prefs = state.preferences.snapshot().await;
    Ok(Json(MovieView {
        movie_title: listing.title,
        episodes: listing.seasons,
        theme: prefs.theme,
        cookies: prefs.cookies,
    })
    .into_response())
}

/// `GET /episode?url=` - embedded players of an episode page
pub async fn episode(
    State(state): State<AppState>,
    Query(params): Query<UrlParams>,
) -> AppResult<Json<LinksView>> {
    let Some(url) = non_empty(params.url) else {
        return Ok(Json(LinksView { links: Vec::new() }));
    };

    let links = state.scraper().await?.parse_episode_links(&url).await?;
    info!(url = %url, count = links.len(), "episode links");
    Ok(Json(LinksView { links }))
}

/// `POST /update_cookies`
pub async fn update_cookies(
    State(state): State<AppState>,
    Form(form): Form<CookiesForm>,
) -> AppResult<Json<Value>> {
    state
        .preferences
        .update_cookies(
            form.session_id.as_deref().unwrap_or_default(),
            form.user_id.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(success())
}

/// `POST /update_theme`
pub async fn update_theme(
    State(state): State<AppState>,
    Form(form): Form<ThemeForm>,
) -> AppResult<Json<Value>> {
    let theme = form.theme.as_deref().unwrap_or(filman_core::preferences::DEFAULT_THEME);
    state.preferences.update_theme(theme).await?;
    Ok(success())
}
