//! Per-request cookie session over HTTP headers.
//!
//! Parses the incoming `Cookie` header into the plain and signed namespaces,
//! implements the vault's [`CookieStore`] contract, and queues outgoing
//! `Set-Cookie` headers until [`HttpSession::apply`] writes them onto a
//! response.

use std::collections::HashMap;

use covault::{CookieAttributes, CookieStore};
use http::{HeaderMap, HeaderValue, header};

use crate::signer::CookieSigner;

/// Request cookies split by namespace, plus queued response cookies.
///
/// Signed-namespace values arrive as `s:<value>.<signature>`; only values
/// that verify land in the signed namespace, everything else stays plain.
/// Without a signer the signed namespace is empty and signed writes fall
/// back to the plain wire form (with a warning).
pub struct HttpSession {
    plain: HashMap<String, String>,
    signed: HashMap<String, String>,
    pending: Vec<String>,
    signer: Option<CookieSigner>,
}

impl HttpSession {
    /// An empty session (no incoming cookies).
    pub fn new(signer: Option<CookieSigner>) -> Self {
        Self {
            plain: HashMap::new(),
            signed: HashMap::new(),
            pending: Vec::new(),
            signer,
        }
    }

    /// Parse the `Cookie` header out of a request's headers.
    pub fn from_headers(headers: &HeaderMap, signer: Option<CookieSigner>) -> Self {
        let header = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        Self::from_cookie_header(header, signer)
    }

    /// Parse a raw `Cookie` header string.
    pub fn from_cookie_header(header: &str, signer: Option<CookieSigner>) -> Self {
        let mut session = Self::new(signer);
        for (name, value) in parse_cookie_header(header) {
            match session
                .signer
                .as_ref()
                .and_then(|signer| value.starts_with("s:").then(|| signer.unsign(value)))
            {
                Some(Some(inner)) => {
                    session.signed.insert(name.to_string(), inner);
                },
                Some(None) => {
                    tracing::warn!(cookie = name, "signed cookie failed verification, dropped");
                },
                None => {
                    session.plain.insert(name.to_string(), value.to_string());
                },
            }
        }
        session
    }

    /// Queued `Set-Cookie` header values.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Append the queued `Set-Cookie` headers to a response's headers.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for cookie in &self.pending {
            match HeaderValue::from_str(cookie) {
                Ok(value) => {
                    headers.append(header::SET_COOKIE, value);
                },
                Err(_) => {
                    tracing::warn!("cookie value is not a valid header value, dropped");
                },
            }
        }
    }
}

impl CookieStore for HttpSession {
    fn cookie(&self, name: &str, signed: bool) -> Option<String> {
        let jar = if signed { &self.signed } else { &self.plain };
        jar.get(name).cloned()
    }

    fn set_cookie(&mut self, name: &str, value: &str, attrs: &CookieAttributes) {
        let wire = if attrs.signed {
            match &self.signer {
                Some(signer) => signer.sign(value),
                None => {
                    tracing::warn!(cookie = name, "signed write without a signer, sent unsigned");
                    value.to_string()
                },
            }
        } else {
            value.to_string()
        };

        let mut cookie = format!("{name}={wire}; Max-Age={}", attrs.max_age_ms / 1000);
        if let Some(domain) = &attrs.domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        cookie.push_str("; Path=");
        cookie.push_str(&attrs.path);
        if attrs.http_only {
            cookie.push_str("; HttpOnly");
        }
        if attrs.secure {
            cookie.push_str("; Secure");
        }
        self.pending.push(cookie);

        // Later reads in the same request observe the new value.
        let jar = if attrs.signed { &mut self.signed } else { &mut self.plain };
        jar.insert(name.to_string(), value.to_string());
    }
}

/// Split a `Cookie` header into name/value pairs.
pub fn parse_cookie_header(header: &str) -> impl Iterator<Item = (&str, &str)> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
}
