//! Signing-identity key pairs.
//!
//! A `KeyPair` bundles a private key with its derived public key and WIF
//! encoding. Pairs come from a seed plus index (deterministic account
//! derivation) or from an imported secret (WIF or raw hex scalar).

use eos_primitives::ec::{PrivateKey, PublicKey};

use crate::WalletError;

/// A private key with its derived public key and WIF form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    /// The private scalar.
    pub private: PrivateKey,
    /// The corresponding public key (`private * G`).
    pub public: PublicKey,
    /// The checksummed WIF encoding of the private scalar.
    pub wif: String,
}

impl KeyPair {
    /// Build a pair from an existing private key.
    ///
    /// # Arguments
    /// * `private` - The private key.
    ///
    /// # Returns
    /// A `KeyPair` with the derived public key and WIF.
    pub fn from_private(private: PrivateKey) -> Self {
        let public = private.public_key();
        let wif = private.to_wif();
        KeyPair {
            private,
            public,
            wif,
        }
    }

    /// Derive a pair deterministically from a seed and index.
    ///
    /// The same `(seed, index)` always yields the same pair, so a single
    /// seed can back a whole family of signing identities.
    ///
    /// # Arguments
    /// * `seed` - Arbitrary seed bytes.
    /// * `index` - The key index within the seed's family.
    ///
    /// # Returns
    /// `Ok(KeyPair)`, or an error if the derived scalar is invalid.
    pub fn from_seed(seed: &[u8], index: u32) -> Result<Self, WalletError> {
        Ok(Self::from_private(PrivateKey::from_seed(seed, index)?))
    }

    /// Import a pair from a secret string: WIF first, raw hex second.
    ///
    /// # Arguments
    /// * `secret` - A WIF string or a 64-character hex scalar.
    ///
    /// # Returns
    /// `Ok(KeyPair)`, or `InvalidPrivateKey` if the string decodes as
    /// neither format.
    pub fn from_secret(secret: &str) -> Result<Self, WalletError> {
        let private = PrivateKey::from_wif(secret)
            .or_else(|_| PrivateKey::from_hex(secret))
            .map_err(|_| {
                WalletError::InvalidPrivateKey(
                    "secret is neither a valid WIF nor a hex scalar".to_string(),
                )
            })?;
        Ok(Self::from_private(private))
    }
}

/// Derive the textual public key for a secret string.
///
/// # Arguments
/// * `secret` - A WIF string or hex scalar.
///
/// # Returns
/// `Ok(String)` with the prefixed, checksummed public key.
pub fn public_key_of(secret: &str) -> Result<String, WalletError> {
    Ok(KeyPair::from_secret(secret)?.public.to_string())
}

/// Validate a textual public key.
///
/// Total over all inputs: never panics, returns `false` on any
/// malformation.
///
/// # Arguments
/// * `text` - The candidate public key string.
///
/// # Returns
/// `true` if the string is a valid public key encoding.
pub fn is_valid_public_key(text: &str) -> bool {
    PublicKey::is_valid(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixtures from the reference wallet test suite.
    const SEED: &str = "da2a48a1b9fbade07552281143814b3cd7ba4b53a7de5241439417b9bb540e229c45a30b0ce32174aaccc80072df7cbdff24f0c0ae327cd5170d1f276b890173";
    const WIF: &str = "5Hz1Sw8x2haM2xKvuuh5d4MZUkJDnnd3ffVgQQSVYKgBFSN2yWP";
    const PUBKEY: &str = "EOS5G1ixaCHP3vNMhQsKPMnwSnjCrfYqLEZB87wDmVefQ7bcjw7ir";

    #[test]
    fn test_from_seed_vector() {
        let pair = KeyPair::from_seed(SEED.as_bytes(), 0).unwrap();
        assert_eq!(pair.wif, WIF);
        assert_eq!(pair.public.to_string(), PUBKEY);
    }

    #[test]
    fn test_from_seed_is_deterministic() {
        let a = KeyPair::from_seed(b"family seed", 3).unwrap();
        let b = KeyPair::from_seed(b"family seed", 3).unwrap();
        assert_eq!(a, b);

        let c = KeyPair::from_seed(b"family seed", 4).unwrap();
        assert_ne!(a.wif, c.wif);
    }

    #[test]
    fn test_from_secret_accepts_wif_and_hex() {
        let from_wif = KeyPair::from_secret(WIF).unwrap();
        assert_eq!(from_wif.public.to_string(), PUBKEY);

        let from_hex = KeyPair::from_secret(&from_wif.private.to_hex()).unwrap();
        assert_eq!(from_hex, from_wif);
    }

    #[test]
    fn test_from_secret_rejects_garbage() {
        assert!(matches!(
            KeyPair::from_secret("not a key"),
            Err(WalletError::InvalidPrivateKey(_))
        ));
        assert!(KeyPair::from_secret("").is_err());
        // corrupted WIF checksum
        assert!(KeyPair::from_secret("5Hz1Sw8x2haM2xKvuuh5d4MZUkJDnnd3ffVgQQSVYKgBFSN2yWQ").is_err());
    }

    #[test]
    fn test_public_key_of_vector() {
        assert_eq!(public_key_of(WIF).unwrap(), PUBKEY);
    }

    #[test]
    fn test_is_valid_public_key() {
        assert!(is_valid_public_key(PUBKEY));
        // dropping the last character breaks the checksum
        assert!(!is_valid_public_key(&PUBKEY[..PUBKEY.len() - 1]));
        assert!(!is_valid_public_key(""));
    }
}
