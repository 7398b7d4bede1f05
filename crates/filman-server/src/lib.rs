//! Filman.cc web front-end
//!
//! Serves the routes the browser UI talks to:
//!
//! | Route                  | Result                                   |
//! |------------------------|------------------------------------------|
//! | `GET /?q=`             | search results                           |
//! | `GET /movie?url=`      | seasons and episodes of a listing page   |
//! | `GET /episode?url=`    | `{"links": [...]}` embedded players      |
//! | `POST /update_cookies` | store `PHPSESSID` / `user_id`            |
//! | `POST /update_theme`   | store `theme`                            |
//!
//! ```ignore
//! let store = PreferencesStore::open("settings.json").await?;
//! let app = filman_server::router(AppState::new(ClientConfig::default(), store));
//! ```

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use filman_core::{ClientConfig, FilmanScraper, PreferencesStore};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
mod handlers;

/// Shared application context handed to every handler
///
/// Holds the scraper configuration and the preferences store. A fresh
/// scraper is built per request from the cookies current at that moment.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) client_config: ClientConfig,
    pub(crate) preferences: Arc<PreferencesStore>,
}

impl AppState {
    pub fn new(client_config: ClientConfig, preferences: PreferencesStore) -> Self {
        Self {
            client_config,
            preferences: Arc::new(preferences),
        }
    }

    pub fn preferences(&self) -> &PreferencesStore {
        &self.preferences
    }

    /// Build a scraper carrying a snapshot of the current session cookies
    pub async fn scraper(&self) -> filman_core::Result<FilmanScraper> {
        let cookies = self.preferences.cookies().await;
        FilmanScraper::with_config(self.client_config.clone(), cookies)
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/movie", get(handlers::movie))
        .route("/episode", get(handlers::episode))
        .route("/update_cookies", post(handlers::update_cookies))
        .route("/update_theme", post(handlers::update_theme))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use base64::Engine;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_state(dir: &TempDir, base_url: &str) -> AppState {
        let store = PreferencesStore::open(dir.path().join("settings.json"))
            .await
            .unwrap();
        let config = ClientConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        AppState::new(config, store)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn with_url(route: &str, url: &str) -> String {
        format!("{}?url={}", route, urlencoding::encode(url))
    }

    #[tokio::test]
    async fn test_index_without_query_skips_search() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir, "http://127.0.0.1:9").await);

        let (status, body) = send(app, get_request("/")).await;
        assert_eq!(status, StatusCode::OK);

        let view: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(view["query"], Value::Null);
        assert_eq!(view["results"], json!([]));
        assert_eq!(view["theme"], "dark");
        assert_eq!(view["cookies"], json!({"PHPSESSID": "", "user_id": ""}));
    }

    #[tokio::test]
    async fn test_index_with_query_searches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/szukam"))
            .and(body_string_contains("phrase=rose"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="col-xs-3 col-lg-2"><a href="/s/rose"><img src="/r.jpg" alt="Rose"></a></div>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir, &server.uri()).await);

        let (status, body) = send(app, get_request("/?q=rose")).await;
        assert_eq!(status, StatusCode::OK);

        let view: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(view["query"], "rose");
        assert_eq!(
            view["results"],
            json!([{"title": "Rose", "url": "/s/rose", "thumbnail": "/r.jpg"}])
        );
    }

    #[tokio::test]
    async fn test_movie_without_url_returns_plain_text() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir, "http://127.0.0.1:9").await);

        let (status, body) = send(app, get_request("/movie")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "No URL provided");
    }

    #[tokio::test]
    async fn test_movie_returns_seasons() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/s/dw"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<h1>Doktor Who</h1>
                <ul id="episode-list">
                    <li><span>Sezon 1</span><ul><li><a href="/e/1">Rose</a></li></ul></li>
                </ul>"#,
            ))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir, &server.uri()).await);
        let uri = with_url("/movie", &format!("{}/s/dw", server.uri()));

        let (status, body) = send(app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::OK);

        let view: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(view["movie_title"], "Doktor Who");
        assert_eq!(view["episodes"], json!({"Sezon 1": [{"label": "Rose", "url": "/e/1"}]}));
    }

    #[tokio::test]
    async fn test_episode_without_url_returns_empty_links() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir, "http://127.0.0.1:9").await);

        let (status, body) = send(app, get_request("/episode?url=")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"links": []}));
    }

    #[tokio::test]
    async fn test_episode_returns_links() {
        let server = MockServer::start().await;
        let payload = base64::engine::general_purpose::STANDARD
            .encode(r#"{"src":"https://voe.sx/e/1","width":640,"height":360}"#);
        Mock::given(method("GET"))
            .and(path("/e/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"<a data-iframe="{payload}">voe 720p</a><a data-iframe="broken">bad</a>"#
            )))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir, &server.uri()).await);
        let uri = with_url("/episode", &format!("{}/e/1", server.uri()));

        let (status, body) = send(app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"links": [{"host": "voe", "url": "https://voe.sx/e/1", "width": 640, "height": 360}]})
        );
    }

    #[tokio::test]
    async fn test_scrape_failure_is_server_error() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir, "http://127.0.0.1:9").await);

        let (status, body) = send(app, get_request("/episode?url=not-a-url")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"]["status"], 500);
    }

    #[tokio::test]
    async fn test_update_cookies_persists_and_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/szukam"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, &server.uri()).await;
        let app = router(state.clone());

        let (status, body) = send(
            app.clone(),
            form_request("/update_cookies", "PHPSESSID=abc123&user_id=42"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"status": "success"}));

        let reloaded = filman_core::preferences::load(&dir.path().join("settings.json"))
            .await
            .unwrap();
        assert_eq!(reloaded.cookies.get("PHPSESSID").map(String::as_str), Some("abc123"));
        assert_eq!(reloaded.cookies.get("user_id").map(String::as_str), Some("42"));

        send(app, get_request("/?q=x")).await;
        let requests = server.received_requests().await.unwrap();
        let cookie = requests[0]
            .headers
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(cookie.contains("PHPSESSID=abc123"));
        assert!(cookie.contains("user_id=42"));
    }

    #[tokio::test]
    async fn test_update_theme_persists() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, "http://127.0.0.1:9").await;
        let app = router(state.clone());

        let (status, _) = send(app, form_request("/update_theme", "theme=light")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.preferences().theme().await, "light");

        let reopened = PreferencesStore::open(dir.path().join("settings.json"))
            .await
            .unwrap();
        assert_eq!(reopened.theme().await, "light");
    }

    #[tokio::test]
    async fn test_update_theme_defaults_to_dark() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, "http://127.0.0.1:9").await;
        state.preferences().update_theme("light").await.unwrap();
        let app = router(state.clone());

        let (status, _) = send(app, form_request("/update_theme", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.preferences().theme().await, "dark");
    }
}
