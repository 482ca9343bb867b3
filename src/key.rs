//! Opaque 32-byte identifiers for list elements.
//!
//! Collaborators bring their own identities (validator addresses, oracle
//! ids, group names). A `Key` is just 32 bytes; use `Key::from_u64` for
//! small integer ids or `Key::derive` to hash an arbitrary label into one.
//!
//! There is no reserved "zero" key. Absence of a neighbour is always
//! expressed as `Option::None`.

use blake3::Hasher;

/// Domain separation prefix for derived keys.
const DERIVE_CONTEXT: &[u8] = b"median-list/key";

/// A list element identifier, 32 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key(pub [u8; 32]);

impl Key {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Key {
        return Key(bytes);
    }

    /// A key holding `n` big-endian in its low 8 bytes, the way a short
    /// integer id is padded into a word.
    pub fn from_u64(n: u64) -> Key {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        return Key(bytes);
    }

    /// Derive a key by hashing a label with blake3.
    ///
    /// The same label always produces the same key.
    pub fn derive(label: &[u8]) -> Key {
        let mut hasher = Hasher::new();
        hasher.update(DERIVE_CONTEXT);
        hasher.update(&(label.len() as u64).to_le_bytes());
        hasher.update(label);
        return Key(*hasher.finalize().as_bytes());
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        return &self.0;
    }
}

impl From<[u8; 32]> for Key {
    fn from(bytes: [u8; 32]) -> Key {
        return Key(bytes);
    }
}

impl From<u64> for Key {
    fn from(n: u64) -> Key {
        return Key::from_u64(n);
    }
}

fn hex(bytes: &[u8]) -> String {
    return bytes.iter().map(|b| format!("{:02x}", b)).collect();
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "Key({})", hex(&self.0));
    }
}

impl std::fmt::Display for Key {
    /// Abbreviated form: first four and last four bytes.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}..{}", hex(&self.0[..4]), hex(&self.0[28..]));
    }
}
