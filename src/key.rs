//! Resource key derivation.
//!
//! Two strategies exist side by side: the gettext-style families key on the
//! cleaned source text itself, while the resource-bundle family keys on a
//! stable hash of it. The hash must match the resource-bundle runtime
//! bit-for-bit, so it is pinned by literal vectors in the test suite and
//! must never change.

use serde::{Deserialize, Serialize};

/// How a resource key is derived from source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScheme {
    /// The cleaned source text is the key.
    Text,
    /// `"r"` followed by a modular hash of the cleaned source text.
    Hashed,
}

impl KeyScheme {
    /// Derives the key for a cleaned source string.
    pub fn key_for(self, cleaned: &str) -> String {
        match self {
            KeyScheme::Text => cleaned.to_string(),
            KeyScheme::Hashed => hash_key(cleaned),
        }
    }
}

const HASH_MODULUS: u64 = 1_073_741_789; // largest prime below 2^30
const HASH_MULTIPLIER: u64 = 65_521; // largest prime below 2^16

/// Hashes a cleaned source string into a resource-bundle key.
///
/// The hash runs over UTF-16 code units so that keys agree with the bundle
/// runtime on astral-plane characters.
pub fn hash_key(cleaned: &str) -> String {
    let mut hash: u64 = 0;
    for unit in cleaned.encode_utf16() {
        hash = (hash + u64::from(unit)) * HASH_MULTIPLIER % HASH_MODULUS;
    }
    format!("r{hash}")
}

/// Derives `(key, auto_key)` for one extracted literal: an explicit id is
/// used verbatim and marked not auto-keyed, otherwise the scheme is applied
/// to the cleaned source text.
pub fn derive_key(scheme: KeyScheme, cleaned: &str, explicit: Option<&str>) -> (String, bool) {
    match explicit {
        Some(id) => (id.to_string(), false),
        None => (scheme.key_for(cleaned), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_key_pinned_vectors() {
        assert_eq!(hash_key("This is a test"), "r654479252");
        assert_eq!(hash_key("Preferences in your profile"), "r372802078");
        assert_eq!(hash_key("All settings"), "r725930887");
        assert_eq!(hash_key("Colour scheme"), "r734599412");
        assert_eq!(hash_key("Experts"), "r343852585");
        assert_eq!(hash_key("Can't find id"), "r743945592");
        assert_eq!(hash_key("{name}({generic_name})"), "r300446104");
        assert_eq!(hash_key("A B"), "r191336864");
        assert_eq!(hash_key("#"), "r2293235");
        assert_eq!(hash_key(""), "r0");
    }

    #[test]
    fn test_text_scheme_is_verbatim() {
        assert_eq!(KeyScheme::Text.key_for("Can't find id"), "Can't find id");
    }

    #[test]
    fn test_derive_key_from_source() {
        let (key, auto) = derive_key(KeyScheme::Hashed, "This is a test", None);
        assert_eq!(key, "r654479252");
        assert!(auto);

        let (key, auto) = derive_key(KeyScheme::Text, "A B", None);
        assert_eq!(key, "A B");
        assert!(auto);
    }

    #[test]
    fn test_derive_key_explicit_id_wins() {
        let (key, auto) = derive_key(KeyScheme::Hashed, "This is a test", Some("unique_id"));
        assert_eq!(key, "unique_id");
        assert!(!auto);
    }

    #[test]
    fn test_escaped_and_real_whitespace_hash_alike() {
        use crate::escape::{Modifiers, clean};

        let escaped = KeyScheme::Hashed.key_for(&clean(r"A \n B", Modifiers::default()));
        let real = KeyScheme::Hashed.key_for(&clean("A \n B", Modifiers::default()));
        assert_eq!(escaped, "r191336864");
        assert_eq!(escaped, real);
    }
}
