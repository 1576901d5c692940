//! Cipher trait for swappable cookie-encryption backends.

use crate::{encoding::Encoding, error::VaultError};

/// Input handed to a cipher backend.
///
/// The stream family tags the two shapes on the wire (`s` for text, `b` for
/// binary) so decryption can reconstruct the original; the other families
/// only see the raw bytes.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// UTF-8 text.
    Text(&'a str),
    /// Raw bytes.
    Binary(&'a [u8]),
}

impl<'a> Payload<'a> {
    /// The payload bytes, whichever shape they arrived in.
    pub fn bytes(&self) -> &'a [u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }
}

/// Output of a successful decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decrypted {
    /// The ciphertext carried a text payload.
    Text(String),
    /// The ciphertext carried a binary payload.
    Binary(Vec<u8>),
}

impl Decrypted {
    /// Convert into a `String`, failing if a binary payload is not UTF-8.
    pub fn into_text(self) -> Result<String, VaultError> {
        match self {
            Self::Text(s) => Ok(s),
            Self::Binary(b) => String::from_utf8(b)
                .map_err(|_| VaultError::Cipher("decrypted payload is not valid utf-8".into())),
        }
    }
}

/// Trait for cookie-encryption backends.
///
/// Implementations can be swapped without changing the vault facade. Not
/// every backend is reversible: one-way families return
/// [`VaultError::UnsupportedOperation`] from [`decrypt`](Self::decrypt).
pub trait Cipher: Send + Sync {
    /// Transform `payload` into an encoded string.
    fn encrypt(&self, payload: Payload<'_>, encoding: Encoding) -> Result<String, VaultError>;

    /// Recover the payload from a string previously produced by
    /// [`encrypt`](Self::encrypt) with the same secret and encoding.
    fn decrypt(&self, data: &str, encoding: Encoding) -> Result<Decrypted, VaultError>;
}
