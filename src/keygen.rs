use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::codec;
use crate::error::{OtpError, Result};

/// The default number of characters in a generated secret
pub const DEFAULT_SECRET_LENGTH: usize = 32;

const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const SYMBOLS: &[u8] = b"!@#$%^&*()<>?/[]{},.:;";

/// Text form of a generated secret
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// The generated characters as they are
    Ascii,
    /// Unpadded base32 of the generated characters, the form authenticator apps expect
    #[default]
    Base32,
}

impl FromStr for SecretEncoding {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "base32" => Ok(Self::Base32),
            other => Err(OtpError::InvalidConfiguration(format!(
                "unsupported secret encoding: {other:?}"
            ))),
        }
    }
}

/// Options for [generate_secret]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretOptions {
    /// Number of characters to draw
    pub length: usize,
    /// Also draw from `!@#$%^&*()<>?/[]{},.:;`
    pub symbols: bool,
    /// Output form
    pub encoding: SecretEncoding,
}

impl Default for SecretOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_SECRET_LENGTH,
            symbols: false,
            encoding: SecretEncoding::Base32,
        }
    }
}

/// Generate a random secret
pub fn generate_secret(options: &SecretOptions) -> Result<String> {
    generate_secret_with_rng(&mut rand::rng(), options)
}

/// Generate a random secret with a custom rng
pub fn generate_secret_with_rng(rng: &mut impl Rng, options: &SecretOptions) -> Result<String> {
    if options.length == 0 {
        tracing::warn!("rejected secret length of zero");
        return Err(OtpError::InvalidConfiguration(
            "secret length must be at least 1".to_owned(),
        ));
    }

    let alphabet: Vec<u8> = if options.symbols {
        [ALPHANUMERIC, SYMBOLS].concat()
    } else {
        ALPHANUMERIC.to_vec()
    };
    let raw: Zeroizing<Vec<u8>> = Zeroizing::new(
        (0..options.length)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect(),
    );

    tracing::trace!(
        length = options.length,
        symbols = options.symbols,
        encoding = ?options.encoding,
        "generated secret"
    );
    Ok(match options.encoding {
        SecretEncoding::Ascii => raw.iter().copied().map(char::from).collect(),
        SecretEncoding::Base32 => codec::base32_encode(raw.as_slice()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ascii_draws_from_alphanumerics() {
        let options = SecretOptions {
            encoding: SecretEncoding::Ascii,
            ..SecretOptions::default()
        };
        let secret = generate_secret(&options).unwrap();
        assert_eq!(secret.len(), DEFAULT_SECRET_LENGTH);
        assert!(secret.bytes().all(|b| ALPHANUMERIC.contains(&b)));
    }

    #[test]
    fn symbols_extend_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let options = SecretOptions {
            length: 512,
            symbols: true,
            encoding: SecretEncoding::Ascii,
        };
        let secret = generate_secret_with_rng(&mut rng, &options).unwrap();
        assert!(secret.bytes().all(|b| ALPHANUMERIC.contains(&b) || SYMBOLS.contains(&b)));
        assert!(secret.bytes().any(|b| SYMBOLS.contains(&b)));
    }

    #[test]
    fn base32_is_unpadded_and_decodes_to_ascii() {
        let secret = generate_secret(&SecretOptions {
            length: 10,
            ..SecretOptions::default()
        })
        .unwrap();
        assert!(!secret.contains('='));
        // 10 bytes encode to 16 characters
        assert_eq!(secret.len(), 16);
        let raw = codec::base32_decode(&secret).unwrap();
        assert_eq!(raw.len(), 10);
        assert!(raw.iter().all(|b| ALPHANUMERIC.contains(b)));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let options = SecretOptions::default();
        let first = generate_secret_with_rng(&mut StdRng::seed_from_u64(1), &options).unwrap();
        let second = generate_secret_with_rng(&mut StdRng::seed_from_u64(1), &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ascii_and_base32_draw_the_same_characters() {
        let ascii = generate_secret_with_rng(
            &mut StdRng::seed_from_u64(3),
            &SecretOptions {
                encoding: SecretEncoding::Ascii,
                ..SecretOptions::default()
            },
        )
        .unwrap();
        let base32 =
            generate_secret_with_rng(&mut StdRng::seed_from_u64(3), &SecretOptions::default())
                .unwrap();
        assert_eq!(codec::base32_decode(&base32).unwrap(), ascii.as_bytes());
    }

    #[test]
    fn zero_length_is_rejected() {
        let options = SecretOptions {
            length: 0,
            ..SecretOptions::default()
        };
        assert!(matches!(
            generate_secret(&options),
            Err(OtpError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn encoding_parses_known_names_only() {
        assert_eq!("ascii".parse::<SecretEncoding>().unwrap(), SecretEncoding::Ascii);
        assert_eq!("base32".parse::<SecretEncoding>().unwrap(), SecretEncoding::Base32);
        assert!(matches!(
            "hex".parse::<SecretEncoding>(),
            Err(OtpError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: SecretOptions = serde_json::from_str(r#"{"encoding":"ascii"}"#).unwrap();
        assert_eq!(options.length, DEFAULT_SECRET_LENGTH);
        assert_eq!(options.encoding, SecretEncoding::Ascii);
    }
}
