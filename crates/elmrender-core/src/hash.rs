//! Deterministic naming hashes.
//!
//! Every generated name (module, render function, port) is derived from the
//! SHA-256 digest of view-function identifiers. Model values and formatting
//! never take part in the hash.

use sha2::{Digest, Sha256};

/// Hash a view-function identifier (or a concatenation of them).
///
/// The result is lowercase hex, so it can be appended directly to an Elm
/// identifier such as `PrivateMain` or `render`.
pub fn hash(id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    hash_hex(&digest)
}

/// Hash an ordered sequence of view-function identifiers.
pub fn hash_all<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let joined: String = ids.into_iter().collect();
    hash(&joined)
}

fn hash_hex(digest: &[u8; 32]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_hash() {
        assert_eq!(hash("Show.page"), hash("Show.page"));
    }

    #[test]
    fn different_inputs_different_hash() {
        let samples = ["Show.page", "Show.view", "Main.view", "Pages.About.view"];
        for (i, a) in samples.iter().enumerate() {
            for b in &samples[i + 1..] {
                assert_ne!(hash(a), hash(b), "{a} and {b} collided");
            }
        }
    }

    #[test]
    fn hash_is_lowercase_hex() {
        let h = hash("Show.page");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn hash_all_is_order_sensitive() {
        let ab = hash_all(["A.a", "B.b"]);
        let ba = hash_all(["B.b", "A.a"]);
        assert_ne!(ab, ba);
        assert_eq!(ab, hash("A.aB.b"));
    }
}
