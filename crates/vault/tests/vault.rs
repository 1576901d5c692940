//! End-to-end vault behavior: cache laws, round trips, one-way contracts.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use covault::{
    Cipher, CipherBackend, CryptoProvider, Decrypted, Encoding, MemoryCookies, Param, Payload,
    Vault, VaultError, VaultOptions,
};

/// Wraps a real backend and counts primitive invocations, so tests can
/// observe whether the memo slots actually short-circuit.
struct CountingCipher {
    inner: CipherBackend,
    encrypts: Arc<AtomicUsize>,
    decrypts: Arc<AtomicUsize>,
}

/// An arc4 counting vault plus handles on its invocation counters.
fn counting_vault() -> (Vault<CountingCipher>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let encrypts = Arc::new(AtomicUsize::new(0));
    let decrypts = Arc::new(AtomicUsize::new(0));
    let cipher = CountingCipher {
        inner: CryptoProvider::default()
            .select("arc4", "hello_world!", &[])
            .unwrap(),
        encrypts: Arc::clone(&encrypts),
        decrypts: Arc::clone(&decrypts),
    };
    let vault = Vault::with_cipher("hello_world!", VaultOptions::default(), cipher).unwrap();
    (vault, encrypts, decrypts)
}

impl Cipher for CountingCipher {
    fn encrypt(&self, payload: Payload<'_>, encoding: Encoding) -> Result<String, VaultError> {
        self.encrypts.fetch_add(1, Ordering::SeqCst);
        self.inner.encrypt(payload, encoding)
    }

    fn decrypt(&self, data: &str, encoding: Encoding) -> Result<Decrypted, VaultError> {
        self.decrypts.fetch_add(1, Ordering::SeqCst);
        self.inner.decrypt(data, encoding)
    }
}

#[test]
fn repeated_write_is_idempotent_and_skips_the_primitive() {
    let (vault, encrypts, _) = counting_vault();
    let mut session = MemoryCookies::default();

    let first = vault.write(&mut session, "pippo", None, None).unwrap();
    let second = vault.write(&mut session, "pippo", None, None).unwrap();

    assert_eq!(first, second, "byte-identical ciphertext");
    assert_eq!(encrypts.load(Ordering::SeqCst), 1, "second call served from the write slot");
}

#[test]
fn write_cache_flushes_on_a_new_key_and_recomputes() {
    let (vault, encrypts, _) = counting_vault();
    let mut session = MemoryCookies::default();

    let a1 = vault.write(&mut session, "a", None, None).unwrap();
    assert_eq!(encrypts.load(Ordering::SeqCst), 1);

    vault.write(&mut session, "b", None, None).unwrap();
    assert_eq!(encrypts.load(Ordering::SeqCst), 2);

    // The slot held only "b", so "a" must be recomputed...
    let a2 = vault.write(&mut session, "a", None, None).unwrap();
    assert_eq!(encrypts.load(Ordering::SeqCst), 3);
    // ...to the identical ciphertext.
    assert_eq!(a1, a2);

    // And a consecutive repeat is served from the slot again.
    let a3 = vault.write(&mut session, "a", None, None).unwrap();
    assert_eq!(encrypts.load(Ordering::SeqCst), 3);
    assert_eq!(a2, a3);
}

#[test]
fn read_cache_skips_the_primitive_on_a_repeat() {
    let (vault, _, decrypts) = counting_vault();
    let mut session = MemoryCookies::default();
    vault.write(&mut session, "pippo", None, None).unwrap();

    assert_eq!(vault.read(&session, None, None).unwrap(), "pippo");
    assert_eq!(decrypts.load(Ordering::SeqCst), 1);
    assert_eq!(vault.read(&session, None, None).unwrap(), "pippo");
    assert_eq!(decrypts.load(Ordering::SeqCst), 1, "served from the read slot");
}

#[test]
fn arc4_ciphertext_is_deterministic_across_vault_instances() {
    let mut first_session = MemoryCookies::default();
    let first = Vault::new("hello_world!", VaultOptions::default())
        .unwrap()
        .write(&mut first_session, "pippo", None, None)
        .unwrap();

    let mut second_session = MemoryCookies::default();
    let second = Vault::new("hello_world!", VaultOptions::default())
        .unwrap()
        .write(&mut second_session, "pippo", None, None)
        .unwrap();

    assert_eq!(first, second);

    // A session that arrives with exactly that cookie value reads back the
    // original plaintext.
    let vault = Vault::new("hello_world!", VaultOptions::default()).unwrap();
    let mut session = MemoryCookies::default();
    session.insert("vault", first, false);
    assert_eq!(vault.read(&session, None, None).unwrap(), "pippo");
}

#[test]
fn reversible_families_round_trip_through_the_vault() {
    for cipher in ["arc4", "rc4a", "vmpc", "rc4+", "autokey", "xchacha20-poly1305", "aes-256-gcm"]
    {
        let options = VaultOptions {
            cipher: cipher.into(),
            ..VaultOptions::default()
        };
        let vault = Vault::new("hello_world!", options).unwrap();
        let mut session = MemoryCookies::default();
        vault.write(&mut session, "pippo", None, None).unwrap();
        assert_eq!(vault.read(&session, None, None).unwrap(), "pippo", "{cipher}");
    }
}

#[test]
fn one_way_families_fail_every_read() {
    let cases: &[(&str, Vec<Param>)] = &[
        ("sha256", vec![]),
        ("sha256", vec![Param::Int(1)]),
        ("dh", vec![]),
        (
            "pbkdf2",
            vec![Param::Text("salt".into()), Param::Int(4), Param::Int(5)],
        ),
    ];
    for (cipher, extra) in cases {
        let options = VaultOptions {
            cipher: (*cipher).into(),
            extra: extra.clone(),
            ..VaultOptions::default()
        };
        let vault = Vault::new("hello_world!", options).unwrap();
        let mut session = MemoryCookies::default();
        let out = vault.write(&mut session, "pippo", None, None).unwrap();
        assert!(!out.is_empty());
        assert!(
            matches!(
                vault.read(&session, None, None),
                Err(VaultError::UnsupportedOperation(_))
            ),
            "{cipher} must be write-only"
        );
    }
}

#[test]
fn pbkdf2_output_uses_the_requested_encoding_and_length() {
    let options = VaultOptions {
        cipher: "pbkdf2".into(),
        encoding: Encoding::Base64,
        extra: vec![Param::Text("salt".into()), Param::Int(4), Param::Int(5)],
        ..VaultOptions::default()
    };
    let vault = Vault::new("ciao", options).unwrap();
    let mut session = MemoryCookies::default();
    let out = vault.write(&mut session, "pippo", None, None).unwrap();
    // 5 derived bytes, base64: 8 chars.
    assert_eq!(Encoding::Base64.decode(&out).unwrap().len(), 5);
    // The payload is ignored: any data derives the same key.
    let mut other = MemoryCookies::default();
    let out2 = vault.write(&mut other, "totally-different", None, None).unwrap();
    assert_eq!(out, out2);
}

#[test]
fn absent_and_blank_cookies_read_as_empty() {
    let vault = Vault::new("hello_world!", VaultOptions::default()).unwrap();
    let session = MemoryCookies::default();
    assert_eq!(vault.read(&session, None, None).unwrap(), "");

    let mut blank = MemoryCookies::default();
    blank.insert("vault", " ", false);
    assert_eq!(vault.read(&blank, None, None).unwrap(), "");
}
