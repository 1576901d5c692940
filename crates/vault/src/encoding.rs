//! Output text encodings for ciphertext and digests.

use base64::Engine;

use crate::error::VaultError;

/// Text encoding applied to cipher output (and expected on cipher input).
///
/// The configured encoding is a default; every encrypt/decrypt call may
/// override it for that single call without touching the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Lowercase hex (the default).
    #[default]
    Hex,
    /// Standard base64 with padding.
    Base64,
    /// URL-safe base64 without padding.
    Base64Url,
}

impl Encoding {
    /// Parse a configuration string (`"hex"`, `"base64"`, `"base64url"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hex" => Some(Self::Hex),
            "base64" => Some(Self::Base64),
            "base64url" => Some(Self::Base64Url),
            _ => None,
        }
    }

    /// Encode raw bytes into this text encoding.
    pub fn encode(self, data: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(data),
            Self::Base64 => base64::engine::general_purpose::STANDARD.encode(data),
            Self::Base64Url => base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(data),
        }
    }

    /// Decode text in this encoding back into raw bytes.
    pub fn decode(self, data: &str) -> Result<Vec<u8>, VaultError> {
        match self {
            Self::Hex => Ok(hex::decode(data)?),
            Self::Base64 => Ok(base64::engine::general_purpose::STANDARD.decode(data)?),
            Self::Base64Url => Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(data)?),
        }
    }
}
