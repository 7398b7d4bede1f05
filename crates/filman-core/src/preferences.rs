//! User preferences: session cookies and UI theme
//!
//! Persisted as a small JSON document:
//!
//! ```json
//! {
//!   "cookies": { "PHPSESSID": "", "user_id": "" },
//!   "theme": "dark"
//! }
//! ```
//!
//! A missing file means first run and yields the defaults.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::Result;

pub const SESSION_COOKIE: &str = "PHPSESSID";
pub const USER_COOKIE: &str = "user_id";
pub const DEFAULT_THEME: &str = "dark";

/// Session cookies forwarded to the site
pub type Cookies = BTreeMap<String, String>;

fn default_cookies() -> Cookies {
    BTreeMap::from([
        (SESSION_COOKIE.to_string(), String::new()),
        (USER_COOKIE.to_string(), String::new()),
    ])
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_cookies")]
    pub cookies: Cookies,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Top-level keys written by other tools, kept on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            cookies: default_cookies(),
            theme: default_theme(),
            extra: Map::new(),
        }
    }
}

/// Read preferences from `path`, falling back to defaults if the file is absent
///
/// # Errors
/// - `PreferencesIo` if the file exists but cannot be read
/// - `PreferencesFormat` if it is not a valid preferences document
pub async fn load(path: &Path) -> Result<Preferences> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Preferences::default()),
        Err(e) => Err(e.into()),
    }
}

/// Write preferences to `path` as indented JSON
pub async fn save(path: &Path, preferences: &Preferences) -> Result<()> {
    let json = serde_json::to_vec_pretty(preferences)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Process-wide preferences with write-through persistence
///
/// Every update holds the lock until the document is on disk, so there is
/// a single writer at a time and readers never see a half-applied update.
#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    current: Mutex<Preferences>,
}

impl PreferencesStore {
    /// Load the store from `path` (defaults if the file does not exist yet)
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let current = load(&path).await?;
        info!(path = %path.display(), theme = %current.theme, "preferences loaded");
        Ok(Self {
            path,
            current: Mutex::new(current),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Preferences {
        self.current.lock().await.clone()
    }

    pub async fn cookies(&self) -> Cookies {
        self.current.lock().await.cookies.clone()
    }

    pub async fn theme(&self) -> String {
        self.current.lock().await.theme.clone()
    }

    /// Replace the session cookies and persist
    ///
    /// Other cookie keys already present are left untouched.
    pub async fn update_cookies(&self, session_id: &str, user_id: &str) -> Result<()> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();
        next.cookies.insert(SESSION_COOKIE.to_string(), session_id.to_string());
        next.cookies.insert(USER_COOKIE.to_string(), user_id.to_string());

        save(&self.path, &next).await?;
        *current = next;
        info!("session cookies updated");
        Ok(())
    }

    /// Replace the theme and persist
    pub async fn update_theme(&self, theme: &str) -> Result<()> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();
        next.theme = theme.to_string();

        save(&self.path, &next).await?;
        *current = next;
        info!(theme, "theme updated");
        Ok(())
    }
}
