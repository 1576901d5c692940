//! HTTP integration for the covault encrypted-cookie vault.
//!
//! Bridges the vault's [`covault::CookieStore`] contract to `http` types:
//! [`HttpSession`] parses a request's `Cookie` header (verifying the signed
//! namespace via [`CookieSigner`]) and queues `Set-Cookie` headers for the
//! response. Framework-agnostic: anything exposing `http::HeaderMap` works.

pub mod session;
pub mod signer;

pub use {
    session::{HttpSession, parse_cookie_header},
    signer::CookieSigner,
};
