#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!("../README.md")]

/// Error type shared by every module
pub mod error;

/// Counter, hex and base32 conversions
pub mod codec;

/// Shared secret container
pub mod secret;

/// HOTP (HMAC-based One-Time Password) generation
pub mod hotp;

/// TOTP (Time-based One-Time Password) generation
pub mod totp;

/// Code verification
pub mod verify;

/// Random secret generation
pub mod keygen;

/// `otpauth://` URIs and QR codes for authenticator enrollment
pub mod enrollment;

pub use enrollment::{QrFormat, QrOptions, enrollment_uri, qr_code, write_qr_code};
pub use error::{OtpError, Result};
pub use hotp::{HotpOptions, hotp};
pub use keygen::{SecretEncoding, SecretOptions, generate_secret, generate_secret_with_rng};
pub use secret::OtpSecret;
pub use totp::{TotpOptions, totp};
pub use verify::{OtpKind, VerifyOptions, verify};
