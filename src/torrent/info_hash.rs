use crate::bencode::{encode, BencodeValue};
use sha1::{Digest, Sha1};
use std::fmt;

/// SHA1 hash of the bencoded info dictionary, identifying the torrent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    /// Hash the canonical encoding of the info dictionary.
    ///
    /// The value must be the untouched subtree as decoded from the
    /// descriptor; its re-encoding is byte-identical to the original
    /// input, so the digest matches what other clients compute.
    pub fn of(info: &BencodeValue) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(encode(info));
        let digest = hasher.finalize();

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&digest);
        Self(hash)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render as 40 lowercase hex characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for InfoHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
