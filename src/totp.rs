use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{OtpError, Result};
use crate::hotp::{DEFAULT_CODE_LENGTH, HotpOptions};
use crate::secret::OtpSecret;

/// The default period of TOTP code in seconds
pub const RFC6238_TOTP_PERIOD: u64 = 30;

/// Options for TOTP code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotpOptions {
    /// Number of digits in the code
    pub length: u8,
    /// Length of a time step in seconds
    pub step: u64,
    /// Unix time in seconds to generate the code for; the system clock when `None`
    pub time: Option<u64>,
}

impl Default for TotpOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            step: RFC6238_TOTP_PERIOD,
            time: None,
        }
    }
}

impl TotpOptions {
    /// Options pinned to the given unix timestamp
    ///
    /// Passing `time ± k * step` evaluates neighbouring steps, which is how a
    /// caller implements clock-skew tolerance.
    pub fn at(time: u64) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }

    /// Replace the code length
    pub fn length(mut self, length: u8) -> Self {
        self.length = length;
        self
    }

    /// Replace the step
    pub fn step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    /// The HOTP counter for these options: `floor(time / step)`
    pub fn counter(&self) -> Result<u64> {
        if self.step == 0 {
            tracing::warn!("rejected TOTP step of zero seconds");
            return Err(OtpError::InvalidConfiguration(
                "step must be greater than zero".to_owned(),
            ));
        }
        let time = match self.time {
            Some(time) => time,
            None => unix_now()?,
        };
        Ok(time / self.step)
    }

    /// The equivalent HOTP options
    pub fn to_hotp(&self) -> Result<HotpOptions> {
        Ok(HotpOptions {
            length: self.length,
            counter: self.counter()?,
        })
    }
}

fn unix_now() -> Result<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|_| {
            OtpError::InvalidConfiguration("system clock is before the unix epoch".to_owned())
        })
}

impl OtpSecret {
    /// Generate a TOTP code
    pub fn totp(&self, options: &TotpOptions) -> Result<String> {
        self.hotp(&options.to_hotp()?)
    }
}

/// Generate a TOTP code from a base32 encoded secret
pub fn totp(secret: impl AsRef<str>, options: &TotpOptions) -> Result<String> {
    OtpSecret::try_from_base32(secret)?.totp(options)
}
