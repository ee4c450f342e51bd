use fast32::base32;
use zeroize::Zeroizing;

use crate::error::{OtpError, Result};

/// Padding character of the RFC 4648 base32 alphabet
const BASE32_PADDING: char = '=';

/// Encode a counter as the 8-byte big-endian message fed into the HMAC
#[inline]
pub const fn counter_to_bytes(counter: u64) -> [u8; 8] {
    counter.to_be_bytes()
}

/// Decode a hex string (either case) into bytes
///
/// Odd-length input or characters outside `[0-9a-fA-F]` are rejected.
pub fn hex_to_bytes(text: impl AsRef<str>) -> Result<Vec<u8>> {
    hex::decode(text.as_ref()).map_err(|err| OtpError::InvalidEncoding(format!("hex: {err}")))
}

/// Encode bytes as RFC 4648 base32 with the `=` padding removed
pub fn base32_encode(bytes: impl AsRef<[u8]>) -> String {
    base32::RFC4648_NOPAD.encode(bytes.as_ref())
}

/// Decode RFC 4648 base32 text
///
/// Trailing padding is optional and lower-case letters are accepted, so both
/// the stripped transport form and a fully padded string decode to the same bytes.
pub fn base32_decode(text: impl AsRef<str>) -> Result<Vec<u8>> {
    let normalized = Zeroizing::new(
        text.as_ref()
            .trim_end_matches(BASE32_PADDING)
            .to_ascii_uppercase(),
    );
    base32::RFC4648_NOPAD
        .decode_str(normalized.as_str())
        .map_err(|err| OtpError::InvalidEncoding(format!("base32: {err:?}")))
}
