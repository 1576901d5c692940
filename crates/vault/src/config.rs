//! Vault configuration: the recognized option surface and its defaults.

use crate::{encoding::Encoding, store::CookieAttributes};

/// One year, the default cookie lifetime.
const ONE_YEAR_MS: u64 = 1000 * 3600 * 24 * 365;

/// A positional, cipher-specific extra parameter.
///
/// The key-derivation family reads `[salt, iterations, key length]`; the
/// hash families only check whether position 0 is present at all (present
/// selects the keyed variant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Text value.
    Text(String),
    /// Integer value.
    Int(u64),
}

impl Param {
    /// The integer value, if this parameter holds one.
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

/// Options accepted at vault construction. Everything has a default; only
/// the secret (passed separately) is mandatory.
#[derive(Debug, Clone)]
pub struct VaultOptions {
    /// Cipher family/algorithm name (default `"arc4"`).
    pub cipher: String,
    /// Cookie name (default `"vault"`).
    pub cookie: String,
    /// Cookie domain attribute.
    pub domain: Option<String>,
    /// Cookie path attribute (default `"/"`).
    pub path: String,
    /// Cookie max-age in milliseconds (default one year).
    pub age_ms: u64,
    /// HttpOnly attribute.
    pub http_only: bool,
    /// Secure attribute.
    pub secure: bool,
    /// Address the signed cookie namespace instead of the plain one.
    pub signed: bool,
    /// Default output encoding (default hex).
    pub encoding: Encoding,
    /// Ordered cipher-specific extras.
    pub extra: Vec<Param>,
}

impl Default for VaultOptions {
    fn default() -> Self {
        Self {
            cipher: "arc4".to_string(),
            cookie: "vault".to_string(),
            domain: None,
            path: "/".to_string(),
            age_ms: ONE_YEAR_MS,
            http_only: false,
            secure: false,
            signed: false,
            encoding: Encoding::Hex,
            extra: Vec::new(),
        }
    }
}

/// Options frozen at construction; immutable for the vault's lifetime.
#[derive(Debug, Clone)]
pub(crate) struct VaultConfig {
    pub cookie: String,
    pub signed: bool,
    pub encoding: Encoding,
    domain: Option<String>,
    path: String,
    age_ms: u64,
    http_only: bool,
    secure: bool,
}

impl VaultConfig {
    pub fn freeze(options: &VaultOptions) -> Self {
        Self {
            cookie: options.cookie.clone(),
            signed: options.signed,
            encoding: options.encoding,
            domain: options.domain.clone(),
            path: options.path.clone(),
            age_ms: options.age_ms,
            http_only: options.http_only,
            secure: options.secure,
        }
    }

    /// Transport attributes for an outgoing cookie.
    pub fn attributes(&self) -> CookieAttributes {
        CookieAttributes {
            domain: self.domain.clone(),
            path: self.path.clone(),
            max_age_ms: self.age_ms,
            http_only: self.http_only,
            secure: self.secure,
            signed: self.signed,
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let options = VaultOptions::default();
        assert_eq!(options.cipher, "arc4");
        assert_eq!(options.cookie, "vault");
        assert_eq!(options.path, "/");
        assert_eq!(options.age_ms, 31_536_000_000);
        assert_eq!(options.encoding, Encoding::Hex);
        assert!(!options.http_only && !options.secure && !options.signed);
        assert!(options.extra.is_empty());
    }

    #[test]
    fn frozen_attributes_carry_the_namespace() {
        let options = VaultOptions {
            signed: true,
            domain: Some("example.com".into()),
            ..VaultOptions::default()
        };
        let attrs = VaultConfig::freeze(&options).attributes();
        assert!(attrs.signed);
        assert_eq!(attrs.domain.as_deref(), Some("example.com"));
        assert_eq!(attrs.max_age_ms, 31_536_000_000);
    }
}
