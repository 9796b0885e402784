use sha2::{Digest, Sha256};
use std::fmt;

/// Lowercase hex SHA-256 digest of a page body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hashes the body exactly as received, without any charset decoding.
    pub fn of(body: impl AsRef<[u8]>) -> Self {
        let digest = Sha256::digest(body.as_ref());
        Fingerprint(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `previous` names the same digest, ignoring surrounding whitespace.
    pub fn matches(&self, previous: &str) -> bool {
        self.0 == previous.trim()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            Fingerprint::of("A").as_str(),
            "559aead08264d5795d3909718cdd05abd49572e84fe55590eef31a88a08fdffd"
        );
    }

    #[test]
    fn identical_bodies_share_a_fingerprint() {
        assert_eq!(Fingerprint::of("<html>same</html>"), Fingerprint::of("<html>same</html>"));
        assert_ne!(Fingerprint::of("A"), Fingerprint::of("A "));
    }

    #[test]
    fn invalid_utf8_bytes_are_not_collapsed() {
        let a = Fingerprint::of([b'x', 0xff]);
        let b = Fingerprint::of([b'x', 0xfe]);
        assert_ne!(a, b);
        assert_ne!(a, Fingerprint::of("x\u{FFFD}"));
    }

    #[test]
    fn matches_tolerates_trailing_newline() {
        let fp = Fingerprint::of("B");
        assert!(fp.matches(&format!("{}\n", fp)));
        assert!(!fp.matches(""));
    }
}
