/// Error type for every fallible operation in this crate
#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    /// The secret is empty or could not be decoded into key bytes
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),

    /// Malformed hex or base32 text
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// An option value is out of range or names an unsupported variant
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The QR code or its image could not be produced
    #[error("Failed to render QR code: {0}")]
    QrCode(String),

    /// Writing a rendered QR code failed
    #[error("Failed to write QR code: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, OtpError>;
