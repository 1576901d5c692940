//! Cookie-store collaborator interface.
//!
//! The vault never talks to a web framework directly; it reads and writes
//! cookies through this trait. The `covault-web` crate implements it over
//! HTTP headers; [`MemoryCookies`] serves tests and non-HTTP callers.

use std::collections::HashMap;

/// Transport attributes attached to an outgoing cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Domain attribute, if any.
    pub domain: Option<String>,
    /// Path attribute.
    pub path: String,
    /// Max-age in milliseconds.
    pub max_age_ms: u64,
    /// HttpOnly attribute.
    pub http_only: bool,
    /// Secure attribute.
    pub secure: bool,
    /// Whether the value belongs to the signed namespace.
    pub signed: bool,
}

/// A request/response cookie jar with a plain and a signed namespace.
///
/// The signed namespace is protected against client tampering by a signing
/// mechanism owned by the implementation; that protection is orthogonal to
/// the vault's own encryption.
pub trait CookieStore {
    /// Read a cookie value from the requested namespace.
    fn cookie(&self, name: &str, signed: bool) -> Option<String>;

    /// Set a cookie, addressed to the namespace named in `attrs.signed`.
    fn set_cookie(&mut self, name: &str, value: &str, attrs: &CookieAttributes);
}

/// In-memory cookie jar.
#[derive(Debug, Default)]
pub struct MemoryCookies {
    plain: HashMap<String, String>,
    signed: HashMap<String, String>,
}

impl MemoryCookies {
    /// Seed a cookie, as if it arrived with a request.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>, signed: bool) {
        let jar = if signed { &mut self.signed } else { &mut self.plain };
        jar.insert(name.into(), value.into());
    }
}

impl CookieStore for MemoryCookies {
    fn cookie(&self, name: &str, signed: bool) -> Option<String> {
        let jar = if signed { &self.signed } else { &self.plain };
        jar.get(name).cloned()
    }

    fn set_cookie(&mut self, name: &str, value: &str, attrs: &CookieAttributes) {
        self.insert(name, value, attrs.signed);
    }
}
