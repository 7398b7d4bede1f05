//! Server configuration
//!
//! Every flag can also be set through the environment.

use std::path::PathBuf;

use clap::Parser;
use filman_core::ClientConfig;
use filman_core::url::BASE_URL;

/// CLI entry point
#[derive(Parser, Debug, Clone)]
#[command(name = "filman")]
#[command(about = "Personal web front-end for searching and streaming from filman.cc")]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, env = "FILMAN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "FILMAN_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Preferences document (created on first update)
    #[arg(long, env = "FILMAN_SETTINGS", default_value = "settings.json")]
    pub settings: PathBuf,

    /// Site root all scraping requests go to
    #[arg(long, env = "FILMAN_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// Total timeout for one outbound request, in seconds
    #[arg(long, env = "FILMAN_TIMEOUT_SECS", default_value_t = 300)]
    pub timeout_secs: u64,
}

impl ServerArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
