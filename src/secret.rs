use std::fmt;

use rand::Rng;
use zeroize::Zeroize;

use crate::codec;
use crate::error::{OtpError, Result};

/// The default length of a raw random secret in bytes (160 bits, as RFC 4226 recommends)
pub const RFC4226_SECRET_LENGTH: usize = 20;

/// Shared HOTP/TOTP secret
///
/// Holds the raw key bytes fed into HMAC-SHA1. The bytes are wiped on drop
/// and are never printed by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpSecret(Box<[u8]>);

impl AsRef<[u8]> for OtpSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for OtpSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OtpSecret(<{} bytes redacted>)", self.0.len())
    }
}

impl Drop for OtpSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl OtpSecret {
    /// Create a new secret from raw key bytes
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(OtpError::InvalidSecret("secret must not be empty".to_owned()));
        }
        Ok(Self(secret.into()))
    }

    /// Create a random secret of `len` bytes
    pub fn random(len: usize) -> Result<Self> {
        Self::random_with_rng(&mut rand::rng(), len)
    }

    /// Create a random secret of `len` bytes with a custom rng
    pub fn random_with_rng(rng: &mut impl Rng, len: usize) -> Result<Self> {
        let mut secret = vec![0u8; len];
        rng.fill(secret.as_mut_slice());
        let result = Self::new(&secret);
        secret.zeroize();
        result
    }

    /// Create a new secret from its base32 transport text
    ///
    /// Padding is optional and letters may be in either case.
    pub fn try_from_base32(secret: impl AsRef<str>) -> Result<Self> {
        let mut bytes = codec::base32_decode(secret)
            .map_err(|err| OtpError::InvalidSecret(err.to_string()))?;
        let result = Self::new(&bytes);
        bytes.zeroize();
        result
    }

    /// Create a new secret from hex text, the form RFC test seeds are usually given in
    pub fn try_from_hex(secret: impl AsRef<str>) -> Result<Self> {
        let mut bytes =
            codec::hex_to_bytes(secret).map_err(|err| OtpError::InvalidSecret(err.to_string()))?;
        let result = Self::new(&bytes);
        bytes.zeroize();
        result
    }

    /// The base32 transport text of this secret, without padding
    pub fn to_base32(&self) -> String {
        codec::base32_encode(&self.0)
    }

    /// Length of the key in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; an `OtpSecret` cannot be constructed empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
