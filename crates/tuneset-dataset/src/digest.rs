//! Export body digest
//!
//! [`DatasetDigest`] identifies an exact JSONL body. Two exports of the
//! same session state carry the same digest.

use serde::{Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// A 32-byte Blake3 digest of an export body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetDigest([u8; 32]);

impl DatasetDigest {
    /// Digest arbitrary bytes
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Digest the newline-joined form of `lines` without allocating it
    #[must_use]
    pub fn of_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                hasher.update(b"\n");
            }
            hasher.update(line.as_ref().as_bytes());
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Raw bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 16 hex chars
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for DatasetDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for DatasetDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = DatasetDigest::compute(b"line");
        let b = DatasetDigest::compute(b"line");
        assert_eq!(a, b);
        assert_ne!(a, DatasetDigest::compute(b"other"));
    }

    #[test]
    fn lines_match_joined_body() {
        let lines = ["{\"a\":1}", "{\"b\":2}", "{\"c\":3}"];
        let joined = lines.join("\n");
        assert_eq!(DatasetDigest::of_lines(&lines), DatasetDigest::compute(joined.as_bytes()));
        assert_eq!(DatasetDigest::of_lines::<&str>(&[]), DatasetDigest::compute(b""));
    }

    #[test]
    fn display_is_full_hex() {
        let digest = DatasetDigest::compute(b"x");
        let shown = digest.to_string();
        assert_eq!(shown.len(), 64);
        assert!(shown.starts_with(&digest.short()));
        assert_eq!(digest.short().len(), 16);
    }

    #[test]
    fn serializes_as_hex_string() {
        let digest = DatasetDigest::compute(b"x");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{digest}\""));
    }
}
