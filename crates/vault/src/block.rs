//! Block/AEAD cipher family, keyed by material derived from the secret.
//!
//! These run in passphrase mode: key and nonce are both derived from the
//! secret, so a given plaintext always encrypts to the same ciphertext under
//! the same secret. That mirrors the classic passphrase-cipher contract the
//! configuration surface promises, and is what lets repeated cookie writes
//! compare equal. Treat it accordingly: equal plaintexts are observable.

use aes_gcm::Aes256Gcm;
use chacha20poly1305::{
    ChaCha20Poly1305, Nonce, XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::VaultError;

/// Supported AEAD algorithms, as named in the provider's cipher list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAlgorithm {
    /// ChaCha20-Poly1305 (12-byte nonce).
    ChaCha20Poly1305,
    /// XChaCha20-Poly1305 (24-byte nonce).
    XChaCha20Poly1305,
    /// AES-256-GCM (12-byte nonce).
    Aes256Gcm,
}

impl BlockAlgorithm {
    /// Resolve a configured cipher name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "chacha20-poly1305" => Some(Self::ChaCha20Poly1305),
            "xchacha20-poly1305" => Some(Self::XChaCha20Poly1305),
            "aes-256-gcm" => Some(Self::Aes256Gcm),
            _ => None,
        }
    }

    /// Every name this family answers to.
    pub fn names() -> &'static [&'static str] {
        &["chacha20-poly1305", "xchacha20-poly1305", "aes-256-gcm"]
    }

    fn nonce_len(self) -> usize {
        match self {
            Self::XChaCha20Poly1305 => 24,
            Self::ChaCha20Poly1305 | Self::Aes256Gcm => 12,
        }
    }
}

/// An AEAD cipher bound to a secret for the lifetime of its vault.
pub struct BlockCipher {
    algorithm: BlockAlgorithm,
    key: Zeroizing<[u8; 32]>,
    nonce: Zeroizing<[u8; 24]>,
}

impl BlockCipher {
    /// Derive key and nonce from the secret and hold them for reuse.
    pub fn new(algorithm: BlockAlgorithm, secret: &str) -> Self {
        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&domain_hash(b"covault.block.key", secret));

        let mut nonce = Zeroizing::new([0u8; 24]);
        nonce.copy_from_slice(&domain_hash(b"covault.block.nonce", secret)[..24]);

        Self {
            algorithm,
            key,
            nonce,
        }
    }

    /// Seal `plaintext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
        let key: &[u8; 32] = &self.key;
        let nonce = &self.nonce[..self.algorithm.nonce_len()];
        let sealed = match self.algorithm {
            BlockAlgorithm::ChaCha20Poly1305 => {
                ChaCha20Poly1305::new(key.into()).encrypt(Nonce::from_slice(nonce), plaintext)
            },
            BlockAlgorithm::XChaCha20Poly1305 => {
                XChaCha20Poly1305::new(key.into()).encrypt(XNonce::from_slice(nonce), plaintext)
            },
            BlockAlgorithm::Aes256Gcm => {
                let nonce = aes_gcm::Nonce::from_slice(nonce);
                Aes256Gcm::new(key.into()).encrypt(nonce, plaintext)
            },
        };
        sealed.map_err(|e| VaultError::Cipher(e.to_string()))
    }

    /// Open a blob previously produced by [`encrypt`](Self::encrypt) under
    /// the same secret and algorithm.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, VaultError> {
        if ciphertext.len() < 16 {
            return Err(VaultError::Cipher("ciphertext too short".to_string()));
        }
        let key: &[u8; 32] = &self.key;
        let nonce = &self.nonce[..self.algorithm.nonce_len()];
        let opened = match self.algorithm {
            BlockAlgorithm::ChaCha20Poly1305 => {
                ChaCha20Poly1305::new(key.into()).decrypt(Nonce::from_slice(nonce), ciphertext)
            },
            BlockAlgorithm::XChaCha20Poly1305 => {
                XChaCha20Poly1305::new(key.into()).decrypt(XNonce::from_slice(nonce), ciphertext)
            },
            BlockAlgorithm::Aes256Gcm => {
                let nonce = aes_gcm::Nonce::from_slice(nonce);
                Aes256Gcm::new(key.into()).decrypt(nonce, ciphertext)
            },
        };
        opened.map_err(|e| VaultError::Cipher(e.to_string()))
    }
}

/// SHA-256 over a domain label and the secret.
fn domain_hash(label: &[u8], secret: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(label);
    hasher.update(secret.as_bytes());
    hasher.finalize().into()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_algorithms() {
        for &name in BlockAlgorithm::names() {
            let algorithm = BlockAlgorithm::from_name(name).unwrap();
            let cipher = BlockCipher::new(algorithm, "hello_world!");
            let sealed = cipher.encrypt(b"pippo").unwrap();
            assert_eq!(cipher.decrypt(&sealed).unwrap(), b"pippo", "{name}");
        }
    }

    #[test]
    fn output_is_deterministic_per_secret() {
        let cipher = BlockCipher::new(BlockAlgorithm::XChaCha20Poly1305, "hello_world!");
        assert_eq!(cipher.encrypt(b"pippo").unwrap(), cipher.encrypt(b"pippo").unwrap());
    }

    #[test]
    fn wrong_secret_fails() {
        let a = BlockCipher::new(BlockAlgorithm::Aes256Gcm, "secret-a");
        let b = BlockCipher::new(BlockAlgorithm::Aes256Gcm, "secret-b");
        let sealed = a.encrypt(b"pippo").unwrap();
        assert!(b.decrypt(&sealed).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let cipher = BlockCipher::new(BlockAlgorithm::ChaCha20Poly1305, "secret");
        let mut sealed = cipher.encrypt(b"pippo").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(cipher.decrypt(&sealed).is_err());
    }

    #[test]
    fn too_short_ciphertext_fails() {
        let cipher = BlockCipher::new(BlockAlgorithm::Aes256Gcm, "secret");
        assert!(cipher.decrypt(&[0u8; 4]).is_err());
    }
}
