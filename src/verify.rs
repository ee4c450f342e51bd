use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::{OtpError, Result};
use crate::hotp::HotpOptions;
use crate::secret::OtpSecret;
use crate::totp::TotpOptions;

/// Which one-time password algorithm to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpKind {
    /// Time-based, RFC 6238
    #[default]
    Totp,
    /// Counter-based, RFC 4226
    Hotp,
}

impl FromStr for OtpKind {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "totp" => Ok(Self::Totp),
            "hotp" => Ok(Self::Hotp),
            other => Err(OtpError::InvalidConfiguration(format!(
                "unsupported code type: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for OtpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Totp => f.write_str("totp"),
            Self::Hotp => f.write_str("hotp"),
        }
    }
}

/// Options for code verification, tagged by algorithm
///
/// Deserializes from `{"type": "totp", ...}` or `{"type": "hotp", ...}`.
/// A missing `type` means `totp`; any other `type` fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", from = "RawVerifyOptions")]
pub enum VerifyOptions {
    /// Verify against a TOTP code
    Totp(TotpOptions),
    /// Verify against a HOTP code
    Hotp(HotpOptions),
}

/// Flat form of [VerifyOptions] read from config, where every field is optional
#[derive(Deserialize)]
#[serde(default)]
struct RawVerifyOptions {
    #[serde(rename = "type")]
    kind: OtpKind,
    length: u8,
    step: u64,
    counter: u64,
    time: Option<u64>,
}

impl Default for RawVerifyOptions {
    fn default() -> Self {
        let totp = TotpOptions::default();
        let hotp = HotpOptions::default();
        Self {
            kind: OtpKind::default(),
            length: totp.length,
            step: totp.step,
            counter: hotp.counter,
            time: totp.time,
        }
    }
}

impl From<RawVerifyOptions> for VerifyOptions {
    fn from(raw: RawVerifyOptions) -> Self {
        match raw.kind {
            OtpKind::Totp => Self::Totp(TotpOptions {
                length: raw.length,
                step: raw.step,
                time: raw.time,
            }),
            OtpKind::Hotp => Self::Hotp(HotpOptions {
                length: raw.length,
                counter: raw.counter,
            }),
        }
    }
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self::Totp(TotpOptions::default())
    }
}

impl From<TotpOptions> for VerifyOptions {
    fn from(options: TotpOptions) -> Self {
        Self::Totp(options)
    }
}

impl From<HotpOptions> for VerifyOptions {
    fn from(options: HotpOptions) -> Self {
        Self::Hotp(options)
    }
}

impl From<OtpKind> for VerifyOptions {
    fn from(kind: OtpKind) -> Self {
        match kind {
            OtpKind::Totp => Self::Totp(TotpOptions::default()),
            OtpKind::Hotp => Self::Hotp(HotpOptions::default()),
        }
    }
}

impl VerifyOptions {
    /// The algorithm these options select
    pub fn kind(&self) -> OtpKind {
        match self {
            Self::Totp(_) => OtpKind::Totp,
            Self::Hotp(_) => OtpKind::Hotp,
        }
    }
}

impl OtpSecret {
    /// Verify a code
    ///
    /// The candidate must equal the expected code exactly, including its
    /// leading zeros. The comparison runs in constant time over the code bytes.
    /// A mismatch is `Ok(false)`; errors are reserved for bad options.
    pub fn verify(&self, code: impl AsRef<str>, options: &VerifyOptions) -> Result<bool> {
        let expected = match options {
            VerifyOptions::Totp(totp) => self.totp(totp)?,
            VerifyOptions::Hotp(hotp) => self.hotp(hotp)?,
        };
        // Length is public (it is in the options), only the digits are compared in constant time
        let matched: bool = code.as_ref().as_bytes().ct_eq(expected.as_bytes()).into();
        tracing::debug!(kind = %options.kind(), matched, "verified one-time code");
        Ok(matched)
    }
}

/// Verify a code against a base32 encoded secret
pub fn verify(
    code: impl AsRef<str>,
    secret: impl AsRef<str>,
    options: &VerifyOptions,
) -> Result<bool> {
    OtpSecret::try_from_base32(secret)?.verify(code, options)
}
