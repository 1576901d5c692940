//! Cipher selection: names in, constructed backend out.
//!
//! The provider owns the enumeration of supported algorithm names and is
//! passed in explicitly — there is no global registry and nothing is loaded
//! lazily behind the caller's back.

use crate::{
    backend::{CipherBackend, DhGroup, HashAlgorithm, KeyDerivation, KeyedHash},
    block::{BlockAlgorithm, BlockCipher},
    config::Param,
    error::VaultError,
    stream::{StreamCipher, StreamVariant},
};

/// Family names matched exactly, ahead of any list membership.
const KEY_DERIVATION_NAME: &str = "pbkdf2";
const KEY_AGREEMENT_NAME: &str = "dh";

/// Enumerates the algorithm names this build can serve and constructs
/// backends from them.
#[derive(Debug, Clone)]
pub struct CryptoProvider {
    ciphers: Vec<&'static str>,
    hashes: Vec<&'static str>,
    groups: Vec<&'static str>,
}

impl Default for CryptoProvider {
    fn default() -> Self {
        Self {
            ciphers: BlockAlgorithm::names().to_vec(),
            hashes: HashAlgorithm::names().to_vec(),
            groups: DhGroup::names().to_vec(),
        }
    }
}

impl CryptoProvider {
    /// Supported block/AEAD cipher names.
    pub fn ciphers(&self) -> &[&'static str] {
        &self.ciphers
    }

    /// Supported hash names.
    pub fn hashes(&self) -> &[&'static str] {
        &self.hashes
    }

    /// Supported key-agreement group names.
    pub fn groups(&self) -> &[&'static str] {
        &self.groups
    }

    /// Select a backend by name. First match wins, in this order:
    ///
    /// 1. the key-derivation family name,
    /// 2. the key-agreement family name or a group name (one entry point),
    /// 3. the fixed stream-cipher name set,
    /// 4. the block-cipher name list,
    /// 5. the hash name list — keyed variant when `extra[0]` is present,
    /// 6. otherwise [`VaultError::UnsupportedCipher`].
    pub fn select(
        &self,
        name: &str,
        secret: &str,
        extra: &[Param],
    ) -> Result<CipherBackend, VaultError> {
        if name == KEY_DERIVATION_NAME {
            return Ok(CipherBackend::KeyDerivation(KeyDerivation::new(
                name,
                extra.to_vec(),
            )));
        }
        if name == KEY_AGREEMENT_NAME || self.groups.contains(&name) {
            // Unreachable for a default provider: from_name covers every
            // listed group plus the family name.
            let group = DhGroup::from_name(name)
                .ok_or_else(|| VaultError::UnsupportedCipher(name.to_string()))?;
            return Ok(CipherBackend::KeyAgreement(group));
        }
        if let Some(variant) = StreamVariant::from_name(name) {
            return Ok(CipherBackend::Stream(StreamCipher::new(variant, secret)));
        }
        if self.ciphers.contains(&name) {
            let algorithm = BlockAlgorithm::from_name(name)
                .ok_or_else(|| VaultError::UnsupportedCipher(name.to_string()))?;
            return Ok(CipherBackend::Block(BlockCipher::new(algorithm, secret)));
        }
        if self.hashes.contains(&name) {
            let algorithm = HashAlgorithm::from_name(name)
                .ok_or_else(|| VaultError::UnsupportedCipher(name.to_string()))?;
            return Ok(if extra.first().is_some() {
                CipherBackend::Hmac(KeyedHash::new(algorithm, secret))
            } else {
                CipherBackend::Hash(algorithm)
            });
        }
        Err(VaultError::UnsupportedCipher(name.to_string()))
    }
}
