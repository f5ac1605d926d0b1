//! Permissive decoder for the identity token.
//!
//! Each step (split, pad, base64, lossy UTF-8, brace search, JSON) can fail independently;
//! the first failure short-circuits to `None`. Nothing here returns an error.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::{Map, Value};

/// Arbitrary key/value metadata carried by the token payload.
pub type TokenClaims = Map<String, Value>;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_allow_trailing_bits(true)
    .with_decode_padding_mode(DecodePaddingMode::RequireCanonical);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode the second dot-segment of `token` into a JSON object, if possible.
pub fn decode(token: Option<&str>) -> Option<TokenClaims> {
    let payload = token?.split('.').nth(1)?;
    let bytes = decode_base64(&pad_base64(payload))?;
    let text = String::from_utf8_lossy(&bytes);
    let candidate = json_object_span(&text)?;
    serde_json::from_str::<TokenClaims>(candidate).ok()
}

/// Append `=` until the length is a multiple of 4.
fn pad_base64(segment: &str) -> String {
    let mut padded = segment.to_string();
    let rem = padded.len() % 4;
    if rem != 0 {
        padded.push_str(&"=".repeat(4 - rem));
    }
    padded
}

// Standard alphabet first; payloads minted as JWT-style segments use the URL-safe one.
fn decode_base64(padded: &str) -> Option<Vec<u8>> {
    STANDARD_LENIENT
        .decode(padded)
        .or_else(|_| URL_SAFE_LENIENT.decode(padded))
        .ok()
}

/// Substring from the first `{` through the last `}`.
fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
