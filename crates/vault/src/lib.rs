//! Encrypted-cookie vault.
//!
//! A request handler hands this library a secret and a cipher name; the
//! library picks a backend among six primitive families (stream cipher,
//! block/AEAD cipher, hash, HMAC, key agreement, key derivation), exposes a
//! uniform encrypt/decrypt contract, and memoizes the most recent write and
//! read so repeated identical calls never re-invoke the primitive.
//!
//! Trait-based [`Cipher`] design allows swapping the backend; the cookie
//! transport is reached only through the [`CookieStore`] collaborator trait
//! (see the `covault-web` crate for the HTTP implementation).
//!
//! Only the stream and block families are reversible. Configuring a one-way
//! family gives a write-only vault: every `read` fails with
//! [`VaultError::UnsupportedOperation`], by contract.

pub mod backend;
pub mod block;
pub mod cache;
pub mod config;
pub mod encoding;
pub mod error;
pub mod provider;
pub mod store;
pub mod stream;
pub mod traits;
pub mod vault;

pub use {
    backend::CipherBackend,
    config::{Param, VaultOptions},
    encoding::Encoding,
    error::VaultError,
    provider::CryptoProvider,
    store::{CookieAttributes, CookieStore, MemoryCookies},
    traits::{Cipher, Decrypted, Payload},
    vault::Vault,
};
