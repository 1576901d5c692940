//! Vault facade: encrypt-on-write, decrypt-on-read, single-slot memoization.

use std::sync::{Mutex, PoisonError};

use crate::{
    backend::CipherBackend,
    cache::SingleSlot,
    config::{VaultConfig, VaultOptions},
    encoding::Encoding,
    error::VaultError,
    provider::CryptoProvider,
    store::CookieStore,
    traits::{Cipher, Payload},
};

/// Encrypted-cookie vault.
///
/// Generic over [`Cipher`] but defaults to the [`CipherBackend`] selected
/// from the configured cipher name. A vault is constructed once and shared
/// across requests; the two memo slots are mutex-guarded so concurrent
/// handlers stay sound. Note that the slots hold one entry each — a
/// concurrent writer with a different key still evicts the other request's
/// entry, which only costs a recomputation.
///
/// Whether the vault addresses the plain or the signed cookie namespace is
/// fixed at construction by the `signed` option.
pub struct Vault<C: Cipher = CipherBackend> {
    config: VaultConfig,
    cipher: C,
    write_cache: Mutex<SingleSlot>,
    read_cache: Mutex<SingleSlot>,
}

impl Vault<CipherBackend> {
    /// Create a vault with the default crypto provider.
    ///
    /// Fails with [`VaultError::MissingSecret`] on an empty secret and with
    /// [`VaultError::UnsupportedCipher`] when the configured name matches no
    /// family. Construction errors are fatal: no partial vault exists.
    pub fn new(secret: &str, options: VaultOptions) -> Result<Self, VaultError> {
        Self::with_provider(secret, options, &CryptoProvider::default())
    }

    /// Create a vault with a caller-supplied provider.
    pub fn with_provider(
        secret: &str,
        options: VaultOptions,
        provider: &CryptoProvider,
    ) -> Result<Self, VaultError> {
        if secret.is_empty() {
            return Err(VaultError::MissingSecret);
        }
        let cipher = provider.select(&options.cipher, secret, &options.extra)?;
        tracing::debug!(cipher = %options.cipher, cookie = %options.cookie, "vault constructed");
        Ok(Self::assemble(&options, cipher))
    }
}

impl<C: Cipher> Vault<C> {
    /// Create a vault around an injected cipher, bypassing name selection.
    pub fn with_cipher(
        secret: &str,
        options: VaultOptions,
        cipher: C,
    ) -> Result<Self, VaultError> {
        if secret.is_empty() {
            return Err(VaultError::MissingSecret);
        }
        Ok(Self::assemble(&options, cipher))
    }

    fn assemble(options: &VaultOptions, cipher: C) -> Self {
        Self {
            config: VaultConfig::freeze(options),
            cipher,
            write_cache: Mutex::new(SingleSlot::default()),
            read_cache: Mutex::new(SingleSlot::default()),
        }
    }

    /// Encrypt `data` and store it in the session's cookie.
    ///
    /// Consecutive writes of the same plaintext reuse the memoized
    /// ciphertext without re-invoking the cipher. The cookie is only set
    /// when the session's current value differs from the computed
    /// ciphertext. Returns the ciphertext.
    pub fn write<S: CookieStore>(
        &self,
        session: &mut S,
        data: &str,
        cookie: Option<&str>,
        encoding: Option<Encoding>,
    ) -> Result<String, VaultError> {
        let name = cookie.unwrap_or(&self.config.cookie);
        let encoding = encoding.unwrap_or(self.config.encoding);

        let mut cache = self
            .write_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let out = match cache.get(data) {
            Some(hit) => {
                tracing::debug!(cookie = name, "write cache hit");
                hit.to_owned()
            },
            None => {
                let out = self.cipher.encrypt(Payload::Text(data), encoding)?;
                cache.put(data, &out);
                out
            },
        };
        drop(cache);

        if session.cookie(name, self.config.signed).as_deref() != Some(out.as_str()) {
            session.set_cookie(name, &out, &self.config.attributes());
            tracing::debug!(cookie = name, "cookie set");
        }
        Ok(out)
    }

    /// Decrypt the session's cookie and return the plaintext.
    ///
    /// A missing or blank cookie yields `Ok("")` — never an error. A cookie
    /// under a one-way cipher configuration fails on every call with
    /// [`VaultError::UnsupportedOperation`]; such configurations are
    /// write-only by design and `read` does not guard against them.
    pub fn read<S: CookieStore>(
        &self,
        session: &S,
        cookie: Option<&str>,
        encoding: Option<Encoding>,
    ) -> Result<String, VaultError> {
        let name = cookie.unwrap_or(&self.config.cookie);
        let encoding = encoding.unwrap_or(self.config.encoding);

        let Some(raw) = session.cookie(name, self.config.signed) else {
            return Ok(String::new());
        };
        if raw.trim().is_empty() {
            return Ok(String::new());
        }

        let mut cache = self
            .read_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(&raw) {
            tracing::debug!(cookie = name, "read cache hit");
            return Ok(hit.to_owned());
        }
        let plain = self.cipher.decrypt(&raw, encoding)?.into_text()?;
        cache.put(&raw, &plain);
        Ok(plain)
    }
}
