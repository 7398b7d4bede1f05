//! Embedded player parser for filman.cc episode pages
//!
//! Each player is an `<a data-iframe ...>` whose payload is a JSON object
//! (`{"src": ..., "width": ..., "height": ...}`), either inline or base64
//! encoded. Anchors whose payload cannot be decoded are skipped.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use scraper::{ElementRef, Html};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::search::selector;
use crate::error::Result;
use crate::types::{Dimension, PlayerLink};

/// Attributes that may carry the payload, checked in order
const PAYLOAD_ATTRS: [&str; 2] = ["data", "data-iframe"];

/// Why an embedded-player payload could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Neither inline JSON nor valid base64
    #[error("payload is neither JSON nor base64")]
    NotBase64,

    /// Base64 decoded, but the bytes are not JSON
    #[error("decoded payload is not JSON")]
    NotJson,

    /// Valid JSON, but not an object
    #[error("payload is not a JSON object")]
    NotObject,
}

/// Decode an embedded-player payload
///
/// Stage one parses the attribute as inline JSON; if that fails, stage two
/// base64-decodes it and parses the result. Characters outside the base64
/// alphabet (line wraps, stray spaces) are discarded before decoding.
pub fn decode_payload(raw: &str) -> std::result::Result<Map<String, Value>, PayloadError> {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(_) => {
            let bytes = STANDARD
                .decode(base64_alphabet_only(raw))
                .map_err(|_| PayloadError::NotBase64)?;
            serde_json::from_slice::<Value>(&bytes).map_err(|_| PayloadError::NotJson)?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(PayloadError::NotObject),
    }
}

fn base64_alphabet_only(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect()
}

/// Parses an episode page and returns its embedded players in document order
///
/// # Errors
/// Returns `ParseError` if a selector fails to compile. Malformed anchors
/// are never reported as errors.
pub fn parse_episode_links(html: &str) -> Result<Vec<PlayerLink>> {
    let document = Html::parse_document(html);
    let anchor_selector = selector("a[data-iframe]")?;

    let links = document
        .select(&anchor_selector)
        .filter_map(|anchor| parse_player_anchor(&anchor))
        .collect();

    Ok(links)
}

fn parse_player_anchor(anchor: &ElementRef) -> Option<PlayerLink> {
    let raw = PAYLOAD_ATTRS
        .iter()
        .filter_map(|name| anchor.value().attr(name))
        .find(|value| !value.is_empty())?;

    let payload = match decode_payload(raw) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(error = %e, "skipping player anchor");
            return None;
        }
    };

    // Text nodes are trimmed and joined without a separator, so
    // `voe <small>720p</small>` reads as "voe720p".
    let text: String = anchor.text().map(str::trim).collect();
    let host = text.split_whitespace().next()?.to_string();

    Some(PlayerLink {
        host,
        url: payload.get("src").and_then(Value::as_str).map(str::to_string),
        width: payload.get("width").and_then(Dimension::from_json),
        height: payload.get("height").and_then(Dimension::from_json),
    })
}
