//! Base64url helpers for the compact token form (RFC 7515)

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

#[inline]
pub(crate) fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// `header.claims`, the bytes the signature covers
#[inline]
pub(crate) fn signing_input(header_b64: &str, claims_b64: &str) -> String {
    let mut input = String::with_capacity(header_b64.len() + 1 + claims_b64.len());
    input.push_str(header_b64);
    input.push('.');
    input.push_str(claims_b64);
    input
}
