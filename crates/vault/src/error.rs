//! Vault error types.

/// Errors produced by vault construction and cipher operations.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// Vault was constructed with an empty secret.
    #[error("secret required")]
    MissingSecret,

    /// The configured cipher name matches no known family.
    #[error("cipher not supported: {0}")]
    UnsupportedCipher(String),

    /// `decrypt` was invoked on a one-way family.
    #[error("operation not supported: {0}")]
    UnsupportedOperation(&'static str),

    /// Payload is neither tagged text nor tagged binary.
    #[error("not a string or buffer")]
    TypeMismatch,

    /// Encryption or decryption failed (tampered data, wrong key, bad parameters).
    #[error("cipher error: {0}")]
    Cipher(String),

    /// Base64 decoding failed.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Hex decoding failed.
    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
}
