use ring::hmac;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{OtpError, Result};
use crate::secret::OtpSecret;

/// The default number of digits in a code
pub const DEFAULT_CODE_LENGTH: u8 = 6;

/// Size of an HMAC-SHA1 digest in bytes
pub const HMAC_SHA1_LENGTH: usize = 20;

/// Options for HOTP code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotpOptions {
    /// Number of digits in the code.
    ///
    /// The truncated value is 31 bits wide, so lengths of 10 and above only
    /// add leading zeros. Such codes are accepted but ambiguous.
    pub length: u8,
    /// The moving counter
    pub counter: u64,
}

impl Default for HotpOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            counter: 0,
        }
    }
}

impl HotpOptions {
    /// Options for the given counter with the default length
    pub fn with_counter(counter: u64) -> Self {
        Self {
            counter,
            ..Self::default()
        }
    }

    /// Replace the code length
    pub fn length(mut self, length: u8) -> Self {
        self.length = length;
        self
    }
}

/// Compute HMAC-SHA1 over the big-endian counter
pub fn hmac_sha1(key: &[u8], counter: u64) -> [u8; HMAC_SHA1_LENGTH] {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key);
    let signature = hmac::sign(&key, &codec::counter_to_bytes(counter));
    let mut digest = [0u8; HMAC_SHA1_LENGTH];
    digest.copy_from_slice(signature.as_ref());
    digest
}

/// RFC 4226 dynamic truncation
///
/// The low nibble of the last byte selects four bytes; the top bit is masked
/// off so the result is a non-negative 31-bit integer.
pub fn dynamic_truncate(digest: &[u8; HMAC_SHA1_LENGTH]) -> u32 {
    let offset = usize::from(digest[HMAC_SHA1_LENGTH - 1] & 0x0f);
    u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ])
}

/// Keep the rightmost `length` decimal digits, left-padded with zeros
pub(crate) fn format_code(value: u32, length: u8) -> String {
    let value = u64::from(value);
    let code = match 10_u64.checked_pow(u32::from(length)) {
        Some(modulus) => value % modulus,
        None => value,
    };
    let width = usize::from(length);
    format!("{code:0>width$}")
}

pub(crate) fn check_length(length: u8) -> Result<()> {
    if length == 0 {
        tracing::warn!("rejected one-time code length of zero");
        return Err(OtpError::InvalidConfiguration(
            "code length must be at least 1".to_owned(),
        ));
    }
    Ok(())
}

impl OtpSecret {
    /// Generate a HOTP code
    pub fn hotp(&self, options: &HotpOptions) -> Result<String> {
        check_length(options.length)?;
        let digest = hmac_sha1(self.as_ref(), options.counter);
        Ok(format_code(dynamic_truncate(&digest), options.length))
    }
}

/// Generate a HOTP code from a base32 encoded secret
pub fn hotp(secret: impl AsRef<str>, options: &HotpOptions) -> Result<String> {
    OtpSecret::try_from_base32(secret)?.hotp(options)
}
