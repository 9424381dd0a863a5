//! Deterministic object identifiers.
//!
//! Every object in a project file is addressed by a 24-character uppercase
//! hexadecimal token. Instead of generating random tokens the way Xcode does,
//! this module derives them from a semantic key such as `file:<path>`, so the
//! same inputs always produce the same descriptor byte-for-byte.
//!
//! - [`ObjectId`] - the identifier itself, derived with [`ObjectId::from_key`]
//! - [`IdMinter`] - per-run bookkeeping that detects truncation collisions

use std::collections::hash_map::Entry;
use std::fmt;

use rustc_hash::FxHashMap;
use sha1::{Digest, Sha1};

use crate::error::GraphError;

/// Number of digest bytes kept in an identifier (24 hex characters).
const ID_BYTES: usize = 12;

/// A 24-character object identifier.
///
/// The identifier is the upper-cased hex rendering of the first 96 bits of
/// the SHA-1 digest of its key.
///
/// # Examples
///
/// ```
/// use pbx_core::ObjectId;
///
/// let id = ObjectId::from_key("project");
/// assert_eq!(id.to_string(), "98F54143AB4E86B28C3AFEE0");
/// assert_eq!(id, ObjectId::from_key("project"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ID_BYTES]);

impl ObjectId {
    /// Length of the rendered identifier in characters.
    pub const LEN: usize = ID_BYTES * 2;

    /// Derives the identifier for `key`.
    ///
    /// Pure: the result depends only on the UTF-8 bytes of `key`. The empty
    /// key is legal.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let digest = Sha1::digest(key.as_bytes());
        let mut bytes = [0u8; ID_BYTES];
        bytes.copy_from_slice(&digest[..ID_BYTES]);
        Self(bytes)
    }

    /// Parses a rendered identifier.
    ///
    /// Only the canonical form is accepted: exactly 24 characters of
    /// `0-9` / `A-F`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbx_core::ObjectId;
    ///
    /// let id = ObjectId::parse("98F54143AB4E86B28C3AFEE0");
    /// assert_eq!(id, Some(ObjectId::from_key("project")));
    /// assert!(ObjectId::parse("98f54143ab4e86b28c3afee0").is_none());
    /// assert!(ObjectId::parse("ABC").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let canonical = text.len() == Self::LEN
            && text
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
        if !canonical {
            return None;
        }

        let mut bytes = [0u8; ID_BYTES];
        hex::decode_to_slice(text, &mut bytes).ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

/// Mints identifiers for one generation run.
///
/// Remembers which key produced each identifier. Minting the same key twice
/// returns the same identifier; two different keys landing on the same
/// truncated digest is reported as [`GraphError::IdentifierCollision`]
/// instead of silently merging two objects.
///
/// # Examples
///
/// ```
/// use pbx_core::{IdMinter, ObjectId};
///
/// let mut minter = IdMinter::new();
/// let a = minter.mint("file:Sources/App.swift")?;
/// let b = minter.mint("build:Sources/App.swift")?;
///
/// assert_ne!(a, b);
/// assert_eq!(minter.mint("file:Sources/App.swift")?, a);
/// assert_eq!(minter.len(), 2);
/// # Ok::<(), pbx_core::GraphError>(())
/// ```
#[derive(Debug, Default)]
pub struct IdMinter {
    keys: FxHashMap<ObjectId, String>,
}

impl IdMinter {
    /// Creates an empty minter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the identifier for `key` and records it.
    pub fn mint(&mut self, key: &str) -> Result<ObjectId, GraphError> {
        let id = ObjectId::from_key(key);
        match self.keys.entry(id) {
            Entry::Occupied(entry) => {
                if entry.get() != key {
                    return Err(GraphError::IdentifierCollision {
                        id,
                        first: entry.get().clone(),
                        second: key.to_owned(),
                    });
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(key.to_owned());
            }
        }
        Ok(id)
    }

    /// Returns the key that produced `id`, if it was minted here.
    #[must_use]
    pub fn key_of(&self, id: ObjectId) -> Option<&str> {
        self.keys.get(&id).map(String::as_str)
    }

    /// Number of distinct keys minted so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing has been minted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Records a pre-existing `id`/`key` pair.
    ///
    /// Used to simulate a truncation collision in tests, which cannot be
    /// produced with real keys.
    #[cfg(test)]
    pub(crate) fn force(&mut self, id: ObjectId, key: &str) {
        self.keys.insert(id, key.to_owned());
    }
}
