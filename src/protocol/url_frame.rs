//! Eddystone-URL frame construction.
//!
//! Frame format per the Eddystone-URL specification:
//! - FrameType(1) + TxPower(1) + UrlScheme(1) + EncodedUrl(0-17)
//!
//! The scheme prefix and common top-level domains are compressed into
//! single byte codes.

use bytes::{BufMut, Bytes, BytesMut};

use crate::data::{FrameType, UrlOptions};
use crate::error::{Error, Result};

/// Maximum length of the encoded URL following the scheme byte.
pub const MAX_ENCODED_URL_LEN: usize = 17;

/// URL scheme prefixes and their codes. `www.` variants come first so they win.
const URL_SCHEMES: [(&str, u8); 4] = [
    ("http://www.", 0x00),
    ("https://www.", 0x01),
    ("http://", 0x02),
    ("https://", 0x03),
];

/// Text expansions indexed by code. Each `.tld/` precedes its bare `.tld`.
const URL_EXPANSIONS: [&str; 14] = [
    ".com/", ".org/", ".edu/", ".net/", ".info/", ".biz/", ".gov/", ".com", ".org", ".edu", ".net",
    ".info", ".biz", ".gov",
];

/// Encode a URL into its compressed Eddystone form (scheme byte + body).
///
/// # Errors
///
/// Returns [`Error::UrlEncoding`] if the URL has no supported scheme,
/// contains characters outside printable ASCII, or does not fit into
/// [`MAX_ENCODED_URL_LEN`] bytes.
///
/// # Example
///
/// ```
/// use eddystone_rust_ble::protocol::encode_url;
///
/// let encoded = encode_url("https://example.com").unwrap();
/// assert_eq!(&encoded[..], b"\x03example\x07");
/// ```
pub fn encode_url(url: &str) -> Result<Bytes> {
    let (rest, scheme) = URL_SCHEMES
        .iter()
        .find_map(|(prefix, code)| url.strip_prefix(prefix).map(|rest| (rest, *code)))
        .ok_or_else(|| encoding_error(url, "unsupported URL scheme"))?;

    let mut buf = BytesMut::with_capacity(1 + MAX_ENCODED_URL_LEN);
    buf.put_u8(scheme);

    let mut remaining = rest;
    while !remaining.is_empty() {
        let expansion = URL_EXPANSIONS
            .iter()
            .enumerate()
            .find(|(_, text)| remaining.starts_with(*text));

        match expansion {
            Some((code, text)) => {
                buf.put_u8(code as u8);
                remaining = &remaining[text.len()..];
            }
            None => {
                let c = remaining.as_bytes()[0];
                if !c.is_ascii_graphic() {
                    return Err(encoding_error(
                        url,
                        &format!("invalid character {:#04x}", c),
                    ));
                }
                buf.put_u8(c);
                remaining = &remaining[1..];
            }
        }

        if buf.len() - 1 > MAX_ENCODED_URL_LEN {
            return Err(encoding_error(
                url,
                &format!("encoded URL exceeds {} bytes", MAX_ENCODED_URL_LEN),
            ));
        }
    }

    Ok(buf.freeze())
}

/// Build the complete Eddystone-URL service data for the given options.
pub fn encode_url_frame(options: &UrlOptions) -> Result<Bytes> {
    let encoded = encode_url(&options.url)?;

    let mut buf = BytesMut::with_capacity(2 + encoded.len());
    buf.put_u8(FrameType::Url.to_raw());
    buf.put_i8(options.tx_power);
    buf.put_slice(&encoded);

    Ok(buf.freeze())
}

fn encoding_error(url: &str, reason: &str) -> Error {
    Error::UrlEncoding {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}
