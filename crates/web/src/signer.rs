//! Signed-cookie scheme for the signed namespace.
//!
//! Wire format: `s:<value>.<signature>` where the signature is the
//! URL-safe base64 HMAC-SHA256 of the value under the signer's secret.
//! Signing guards against client tampering; it is orthogonal to whatever
//! encryption the vault applied to the value itself.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Prefix marking a signed cookie value on the wire.
const SIGNED_PREFIX: &str = "s:";

/// Signs and verifies cookie values for the signed namespace.
#[derive(Clone)]
pub struct CookieSigner {
    mac: Hmac<Sha256>,
}

impl CookieSigner {
    /// Key a signer with the cookie-signing secret.
    pub fn new(secret: &str) -> Self {
        // HMAC accepts keys of any length.
        let mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("hmac accepts any key length"));
        Self { mac }
    }

    /// Produce the wire form `s:<value>.<signature>`.
    pub fn sign(&self, value: &str) -> String {
        format!("{SIGNED_PREFIX}{value}.{}", self.signature(value))
    }

    /// Verify a wire value and return the inner value, or `None` when the
    /// prefix is missing or the signature does not match.
    pub fn unsign(&self, wire: &str) -> Option<String> {
        let rest = wire.strip_prefix(SIGNED_PREFIX)?;
        let (value, signature) = rest.rsplit_once('.')?;
        let sig_bytes = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(value.as_bytes());
        mac.verify_slice(&sig_bytes).ok()?;
        Some(value.to_string())
    }

    fn signature(&self, value: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(value.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_unsign_round_trips() {
        let signer = CookieSigner::new("foo");
        let wire = signer.sign("d9d7356dae75d3");
        assert!(wire.starts_with("s:d9d7356dae75d3."));
        assert_eq!(signer.unsign(&wire).unwrap(), "d9d7356dae75d3");
    }

    #[test]
    fn tampered_value_fails_verification() {
        let signer = CookieSigner::new("foo");
        let wire = signer.sign("pippo");
        let tampered = wire.replacen("pippo", "pluto", 1);
        assert_eq!(signer.unsign(&tampered), None);
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let wire = CookieSigner::new("foo").sign("pippo");
        assert_eq!(CookieSigner::new("bar").unsign(&wire), None);
    }

    #[test]
    fn unsigned_values_are_rejected() {
        let signer = CookieSigner::new("foo");
        assert_eq!(signer.unsign("pippo"), None);
        assert_eq!(signer.unsign("s:no-dot-here"), None);
    }

    #[test]
    fn values_containing_dots_survive() {
        let signer = CookieSigner::new("foo");
        let wire = signer.sign("a.b.c");
        assert_eq!(signer.unsign(&wire).unwrap(), "a.b.c");
    }
}
