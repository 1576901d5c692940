//! Stream-cipher family: RC4 and friends, keyed directly by the secret.
//!
//! These are the legacy keystream generators behind the fixed name set
//! `arc4`, `rc4a`, `vmpc`, `rc4+` and `autokey`. Key scheduling runs afresh
//! on every call, so output is deterministic for a fixed variant and secret.
//! None of them authenticate anything; they exist for cookie obfuscation,
//! not for integrity.

use zeroize::Zeroizing;

/// Which keystream generator a [`StreamCipher`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamVariant {
    /// Classic RC4.
    Arc4,
    /// RC4A (two-state RC4).
    Rc4a,
    /// VMPC.
    Vmpc,
    /// RC4+ (layered key schedule, widened output function).
    Rc4Plus,
    /// Byte autokey: the keystream continues with the plaintext itself.
    Autokey,
}

impl StreamVariant {
    /// Resolve a configured cipher name into a variant.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "arc4" => Some(Self::Arc4),
            "rc4a" => Some(Self::Rc4a),
            "vmpc" => Some(Self::Vmpc),
            "rc4+" => Some(Self::Rc4Plus),
            "autokey" => Some(Self::Autokey),
            _ => None,
        }
    }
}

/// A stream cipher bound to a secret for the lifetime of its vault.
pub struct StreamCipher {
    variant: StreamVariant,
    key: Zeroizing<Vec<u8>>,
}

impl StreamCipher {
    /// Key a stream cipher. The secret must be non-empty (the vault enforces
    /// this before construction).
    pub fn new(variant: StreamVariant, secret: &str) -> Self {
        Self {
            variant,
            key: Zeroizing::new(secret.as_bytes().to_vec()),
        }
    }

    /// Encrypt raw bytes.
    pub fn encrypt_bytes(&self, data: &[u8]) -> Vec<u8> {
        match self.variant {
            StreamVariant::Arc4 => rc4_xor(&self.key, data),
            StreamVariant::Rc4a => rc4a_xor(&self.key, data),
            StreamVariant::Vmpc => vmpc_xor(&self.key, data),
            StreamVariant::Rc4Plus => rc4_plus_xor(&self.key, data),
            StreamVariant::Autokey => autokey_encrypt(&self.key, data),
        }
    }

    /// Decrypt raw bytes. For the XOR-keystream variants this is the same
    /// transform as encryption; autokey must rebuild its keystream from the
    /// recovered plaintext.
    pub fn decrypt_bytes(&self, data: &[u8]) -> Vec<u8> {
        match self.variant {
            StreamVariant::Autokey => autokey_decrypt(&self.key, data),
            _ => self.encrypt_bytes(data),
        }
    }
}

/// Standard RC4 key-scheduling algorithm.
fn ksa(key: &[u8]) -> [u8; 256] {
    let mut s = [0u8; 256];
    for (i, b) in s.iter_mut().enumerate() {
        *b = i as u8;
    }
    let mut j = 0u8;
    for i in 0..256 {
        j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
        s.swap(i, j as usize);
    }
    s
}

fn rc4_xor(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s = ksa(key);
    let (mut i, mut j) = (0u8, 0u8);
    data.iter()
        .map(|&b| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(s[i as usize]);
            s.swap(i as usize, j as usize);
            b ^ s[s[i as usize].wrapping_add(s[j as usize]) as usize]
        })
        .collect()
}

fn rc4a_xor(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s1 = ksa(key);
    // The second state is keyed by keystream drawn from the first.
    let mut key2 = vec![0u8; key.len()];
    {
        let mut s = s1;
        let (mut i, mut j) = (0u8, 0u8);
        for b in key2.iter_mut() {
            i = i.wrapping_add(1);
            j = j.wrapping_add(s[i as usize]);
            s.swap(i as usize, j as usize);
            *b = s[s[i as usize].wrapping_add(s[j as usize]) as usize];
        }
    }
    let mut s2 = ksa(&key2);

    let (mut i, mut j1, mut j2) = (0u8, 0u8, 0u8);
    let mut even = true;
    data.iter()
        .map(|&b| {
            let k = if even {
                i = i.wrapping_add(1);
                j1 = j1.wrapping_add(s1[i as usize]);
                s1.swap(i as usize, j1 as usize);
                s2[s1[i as usize].wrapping_add(s1[j1 as usize]) as usize]
            } else {
                j2 = j2.wrapping_add(s2[i as usize]);
                s2.swap(i as usize, j2 as usize);
                s1[s2[i as usize].wrapping_add(s2[j2 as usize]) as usize]
            };
            even = !even;
            b ^ k
        })
        .collect()
}

fn vmpc_xor(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut p = [0u8; 256];
    for (i, b) in p.iter_mut().enumerate() {
        *b = i as u8;
    }
    let mut s = 0u8;
    for m in 0..768 {
        let i = m % 256;
        s = p[s
            .wrapping_add(p[i])
            .wrapping_add(key[m % key.len()]) as usize];
        p.swap(i, s as usize);
    }

    let mut i = 0u8;
    data.iter()
        .map(|&b| {
            s = p[s.wrapping_add(p[i as usize]) as usize];
            let k = p[p[p[s as usize] as usize].wrapping_add(1) as usize];
            p.swap(i as usize, s as usize);
            i = i.wrapping_add(1);
            b ^ k
        })
        .collect()
}

fn rc4_plus_xor(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s = ksa(key);
    // Extra scrambling layer over the basic schedule, mixing the key back in
    // from both ends of the state.
    let mut j = 0u8;
    for i in (0..128).rev() {
        j = (j ^ s[i]).wrapping_add(key[i % key.len()]);
        s.swap(i, j as usize);
    }
    for i in 128..256 {
        j = (j ^ s[i]).wrapping_add(key[i % key.len()]);
        s.swap(i, j as usize);
    }

    let (mut i, mut j) = (0u8, 0u8);
    data.iter()
        .map(|&b| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(s[i as usize]);
            s.swap(i as usize, j as usize);
            let t = s[i as usize].wrapping_add(s[j as usize]);
            let t1 = s[((i >> 3) ^ (j << 5)) as usize];
            let t2 = s[((j >> 3) ^ (i << 5)) as usize];
            let k = s[t as usize].wrapping_add(t1 ^ t2 ^ 0xAA) ^ s[j.wrapping_add(s[j as usize]) as usize];
            b ^ k
        })
        .collect()
}

fn autokey_encrypt(key: &[u8], data: &[u8]) -> Vec<u8> {
    let kl = key.len();
    data.iter()
        .enumerate()
        .map(|(n, &b)| b ^ if n < kl { key[n] } else { data[n - kl] })
        .collect()
}

fn autokey_decrypt(key: &[u8], data: &[u8]) -> Vec<u8> {
    let kl = key.len();
    let mut out = Vec::with_capacity(data.len());
    for (n, &b) in data.iter().enumerate() {
        let k = if n < kl { key[n] } else { out[n - kl] };
        out.push(b ^ k);
    }
    out
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc4_known_vectors() {
        // Published RC4 test vectors.
        assert_eq!(rc4_xor(b"Key", b"Plaintext"), hex::decode("bbf316e8d940af0ad3").unwrap());
        assert_eq!(rc4_xor(b"Wiki", b"pedia"), hex::decode("1021bf0420").unwrap());
        assert_eq!(
            rc4_xor(b"Secret", b"Attack at dawn"),
            hex::decode("45a01f645fc35b383552544b9bf5").unwrap()
        );
    }

    #[test]
    fn every_variant_round_trips() {
        let variants = [
            StreamVariant::Arc4,
            StreamVariant::Rc4a,
            StreamVariant::Vmpc,
            StreamVariant::Rc4Plus,
            StreamVariant::Autokey,
        ];
        for variant in variants {
            let cipher = StreamCipher::new(variant, "hello_world!");
            let plain = b"pippo and some longer payload bytes \x00\xff";
            let ct = cipher.encrypt_bytes(plain);
            assert_eq!(cipher.decrypt_bytes(&ct), plain, "{variant:?}");
        }
    }

    #[test]
    fn keystream_restarts_every_call() {
        let cipher = StreamCipher::new(StreamVariant::Arc4, "hello_world!");
        assert_eq!(cipher.encrypt_bytes(b"pippo"), cipher.encrypt_bytes(b"pippo"));
    }

    #[test]
    fn variants_differ() {
        let a = StreamCipher::new(StreamVariant::Arc4, "secret");
        let b = StreamCipher::new(StreamVariant::Vmpc, "secret");
        assert_ne!(a.encrypt_bytes(b"pippo"), b.encrypt_bytes(b"pippo"));
    }

    #[test]
    fn autokey_short_and_long_inputs() {
        let cipher = StreamCipher::new(StreamVariant::Autokey, "k");
        for plain in [&b""[..], b"a", b"a much longer input than the key"] {
            let ct = cipher.encrypt_bytes(plain);
            assert_eq!(cipher.decrypt_bytes(&ct), plain);
        }
    }

    #[test]
    fn from_name_covers_the_fixed_set() {
        for name in ["arc4", "rc4a", "vmpc", "rc4+", "autokey"] {
            assert!(StreamVariant::from_name(name).is_some(), "{name}");
        }
        assert!(StreamVariant::from_name("rc5").is_none());
    }
}
