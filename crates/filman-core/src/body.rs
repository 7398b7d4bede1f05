//! Response body decoding
//!
//! The HTTP client transparently handles gzip, deflate and brotli. Zstandard
//! bodies are passed through raw and decoded here in fixed-size chunks. Any
//! decoding failure falls back to a lossy UTF-8 read of the raw bytes.

use std::io::Read;

use tracing::warn;

/// Size of each read from the zstd stream decoder
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Decode a response body into text according to its `Content-Encoding`
///
/// Never fails: invalid UTF-8 sequences become U+FFFD and a broken zstd
/// stream is logged and replaced by the raw bytes.
pub fn decode_body(raw: &[u8], content_encoding: &str) -> String {
    if !is_zstd(content_encoding) {
        return String::from_utf8_lossy(raw).into_owned();
    }

    match decompress_zstd(raw) {
        Ok(decoded) => String::from_utf8_lossy(&decoded).into_owned(),
        Err(e) => {
            warn!(error = %e, bytes = raw.len(), "Decompress error, decoding raw body");
            String::from_utf8_lossy(raw).into_owned()
        }
    }
}

fn is_zstd(content_encoding: &str) -> bool {
    content_encoding.to_ascii_lowercase().contains("zstd")
}

/// Stream-decode a zstd payload, reading at most [`CHUNK_SIZE`] bytes at a time
pub fn decompress_zstd(raw: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = zstd::stream::read::Decoder::new(raw)?;
    let mut out = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        let n = decoder.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
    }

    Ok(out)
}
