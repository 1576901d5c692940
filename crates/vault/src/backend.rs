//! The closed set of cipher families behind a vault.
//!
//! A backend variant is chosen once at construction (see
//! [`CryptoProvider::select`](crate::provider::CryptoProvider::select)) and
//! never changes for the vault's lifetime. Only the stream and block families
//! are reversible; the rest refuse [`decrypt`](Cipher::decrypt).

use hmac::{Hmac, Mac};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::{
    block::BlockCipher,
    config::Param,
    encoding::Encoding,
    error::VaultError,
    stream::StreamCipher,
    traits::{Cipher, Decrypted, Payload},
};

/// Digest algorithms served by the hash and keyed-hash families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Resolve a configured hash name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Every name this family answers to.
    pub fn names() -> &'static [&'static str] {
        &["sha256", "sha384", "sha512"]
    }

    /// One-shot digest.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

/// HMAC keyed by the vault secret.
pub struct KeyedHash {
    algorithm: HashAlgorithm,
    key: Zeroizing<Vec<u8>>,
}

impl KeyedHash {
    /// Key an HMAC instance with the vault secret.
    pub fn new(algorithm: HashAlgorithm, secret: &str) -> Self {
        Self {
            algorithm,
            key: Zeroizing::new(secret.as_bytes().to_vec()),
        }
    }

    /// Compute the authentication tag over `data`.
    pub fn tag(&self, data: &[u8]) -> Result<Vec<u8>, VaultError> {
        match self.algorithm {
            HashAlgorithm::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(&self.key)
                    .map_err(|e| VaultError::Cipher(e.to_string()))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            },
            HashAlgorithm::Sha384 => {
                let mut mac = Hmac::<Sha384>::new_from_slice(&self.key)
                    .map_err(|e| VaultError::Cipher(e.to_string()))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            },
            HashAlgorithm::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(&self.key)
                    .map_err(|e| VaultError::Cipher(e.to_string()))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            },
        }
    }
}

/// Key-agreement groups. Both the family name `dh` and the concrete group
/// names resolve here; there is a single entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhGroup {
    /// NIST P-256 (aka prime256v1).
    P256,
}

impl DhGroup {
    /// Resolve a group name (the bare family name picks the default group).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dh" | "p256" | "prime256v1" => Some(Self::P256),
            _ => None,
        }
    }

    /// Concrete group names (excludes the bare family name).
    pub fn names() -> &'static [&'static str] {
        &["p256", "prime256v1"]
    }

    /// Generate a fresh key pair and return the compressed public key.
    /// The secret scalar is discarded; this family only publishes key
    /// material, it never encrypts.
    pub fn generate_public_key(self) -> Vec<u8> {
        match self {
            Self::P256 => {
                let mut candidate = Zeroizing::new([0u8; 32]);
                loop {
                    rand::RngCore::fill_bytes(&mut rand::rng(), candidate.as_mut());
                    // Rejection-sample until the bytes form a valid scalar.
                    if let Ok(secret) = p256::SecretKey::from_slice(candidate.as_slice()) {
                        return secret.public_key().to_encoded_point(true).as_bytes().to_vec();
                    }
                }
            },
        }
    }
}

/// PBKDF2-HMAC-SHA256 key derivation.
///
/// Positional extras: `[salt, iterations, key length]`. The password material
/// is the cipher name string, not the payload; the payload is ignored.
pub struct KeyDerivation {
    password: String,
    extra: Vec<Param>,
}

impl KeyDerivation {
    /// Bind the derivation to its password material and positional extras.
    /// Extras are validated lazily, at call time.
    pub fn new(password: impl Into<String>, extra: Vec<Param>) -> Self {
        Self {
            password: password.into(),
            extra,
        }
    }

    /// Derive the key.
    pub fn derive(&self) -> Result<Vec<u8>, VaultError> {
        let salt = match self.extra.first() {
            Some(Param::Text(s)) => s.clone().into_bytes(),
            Some(Param::Int(n)) => n.to_string().into_bytes(),
            None => return Err(VaultError::Cipher("pbkdf2 requires a salt".into())),
        };
        let iterations = self
            .extra
            .get(1)
            .and_then(Param::as_int)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|&n| n > 0)
            .ok_or_else(|| VaultError::Cipher("pbkdf2 requires an iteration count".into()))?;
        let key_len = self
            .extra
            .get(2)
            .and_then(Param::as_int)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n > 0)
            .ok_or_else(|| VaultError::Cipher("pbkdf2 requires a key length".into()))?;

        let mut out = vec![0u8; key_len];
        pbkdf2::pbkdf2_hmac::<Sha256>(self.password.as_bytes(), &salt, iterations, &mut out);
        Ok(out)
    }
}

/// A constructed cipher backend, bound to a secret and ready to serve a vault.
pub enum CipherBackend {
    /// Reversible keystream cipher (`arc4` and friends).
    Stream(StreamCipher),
    /// Reversible AEAD in passphrase mode.
    Block(BlockCipher),
    /// One-way digest.
    Hash(HashAlgorithm),
    /// One-way keyed digest.
    Hmac(KeyedHash),
    /// Key-pair generation; ignores the payload.
    KeyAgreement(DhGroup),
    /// PBKDF2 derivation; ignores the payload.
    KeyDerivation(KeyDerivation),
}

impl Cipher for CipherBackend {
    fn encrypt(&self, payload: Payload<'_>, encoding: Encoding) -> Result<String, VaultError> {
        match self {
            Self::Stream(cipher) => {
                let (tag, bytes) = match payload {
                    Payload::Text(s) => ('s', cipher.encrypt_bytes(s.as_bytes())),
                    Payload::Binary(b) => ('b', cipher.encrypt_bytes(b)),
                };
                Ok(format!("{tag}{}", encoding.encode(&bytes)))
            },
            Self::Block(cipher) => Ok(encoding.encode(&cipher.encrypt(payload.bytes())?)),
            Self::Hash(algorithm) => Ok(encoding.encode(&algorithm.digest(payload.bytes()))),
            Self::Hmac(keyed) => Ok(encoding.encode(&keyed.tag(payload.bytes())?)),
            Self::KeyAgreement(group) => Ok(encoding.encode(&group.generate_public_key())),
            Self::KeyDerivation(derivation) => Ok(encoding.encode(&derivation.derive()?)),
        }
    }

    fn decrypt(&self, data: &str, encoding: Encoding) -> Result<Decrypted, VaultError> {
        match self {
            Self::Stream(cipher) => match data.as_bytes().first() {
                Some(b's') => {
                    let plain = cipher.decrypt_bytes(&encoding.decode(&data[1..])?);
                    Ok(Decrypted::Text(String::from_utf8(plain).map_err(|_| {
                        VaultError::Cipher("decrypted payload is not valid utf-8".into())
                    })?))
                },
                Some(b'b') => {
                    let plain = cipher.decrypt_bytes(&encoding.decode(&data[1..])?);
                    Ok(Decrypted::Binary(plain))
                },
                _ => Err(VaultError::TypeMismatch),
            },
            Self::Block(cipher) => {
                let plain = cipher.decrypt(&encoding.decode(data)?)?;
                Ok(Decrypted::Text(String::from_utf8(plain).map_err(|_| {
                    VaultError::Cipher("decrypted payload is not valid utf-8".into())
                })?))
            },
            Self::Hash(_) => Err(VaultError::UnsupportedOperation("hash is one-way")),
            Self::Hmac(_) => Err(VaultError::UnsupportedOperation("hmac is one-way")),
            Self::KeyAgreement(_) => {
                Err(VaultError::UnsupportedOperation("key agreement is not a cipher"))
            },
            Self::KeyDerivation(_) => Err(VaultError::UnsupportedOperation("pbkdf2 is one-way")),
        }
    }
}
