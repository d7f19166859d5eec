//! Inline `data:` URLs, the form photos are stored in.

use super::IngestError;
use base64::{engine::general_purpose::STANDARD, Engine};

pub const FALLBACK_MIME: &str = "application/octet-stream";

pub fn encode(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 data URL into its mime type and decoded bytes.
pub fn decode(url: &str) -> Result<(String, Vec<u8>), IngestError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| IngestError::DataUrl("missing data: prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| IngestError::DataUrl("missing payload separator".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| IngestError::DataUrl("only base64 payloads are supported".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| IngestError::DataUrl(e.to_string()))?;
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
    Ok((mime.to_string(), bytes))
}

/// Mime type for `bytes`: sniffed from the content first, then `hint`.
pub fn mime_for(bytes: &[u8], hint: Option<&str>) -> String {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .ok()
        .or_else(|| hint.map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MIME.to_string())
}
