//! secp256k1 private key with ledger-specific functionality.
//!
//! Wraps a k256 signing key and adds WIF encoding, deterministic seed
//! derivation, ECDH shared-secret computation, and canonical signing.

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::Scalar;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::hash::{sha256, sha256d, sha512};
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// WIF prefix byte shared with the Bitcoin mainnet encoding.
const WIF_PREFIX: u8 = 0x80;

/// A secp256k1 private key for signing and key agreement.
///
/// Wraps a k256 `SigningKey` and provides the ledger's key formats:
/// legacy uncompressed WIF serialization, sha256-based seed derivation,
/// and the sha512 ECDH shared-secret scheme used by memo encryption.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

/// An ECDH shared secret: sha512 of the x-coordinate of `scalar * point`.
///
/// The buffer is zeroed when dropped; callers should treat it as ephemeral
/// and not store it beyond the operation that produced it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; 64]);

impl SharedSecret {
    /// Access the 64-byte secret.
    ///
    /// # Returns
    /// A reference to the raw shared-secret bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    ///
    /// # Returns
    /// A new randomly generated `PrivateKey`.
    pub fn new() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        PrivateKey {
            inner: signing_key,
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_bytes(bytes.into()).map_err(|e| {
            PrimitivesError::InvalidPrivateKey(e.to_string())
        })?;
        Ok(PrivateKey {
            inner: signing_key,
        })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex is invalid or the
    /// scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes =
            hex::decode(hex_str).map_err(|e| PrimitivesError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// The ledger uses the legacy uncompressed WIF layout: one prefix byte
    /// (0x80), the 32-byte scalar, and a 4-byte sha256d checksum, with no
    /// compression flag.
    ///
    /// # Arguments
    /// * `wif` - A Base58Check-encoded WIF string.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the WIF is malformed or
    /// the checksum fails.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let decoded = bs58::decode(wif)
            .into_vec()
            .map_err(|e| PrimitivesError::InvalidWif(e.to_string()))?;

        // 1 byte prefix + 32 bytes key + 4 byte checksum
        if decoded.len() != 1 + PRIVATE_KEY_BYTES_LEN + 4 {
            return Err(PrimitivesError::InvalidWif(format!(
                "malformed private key: invalid length {}",
                decoded.len()
            )));
        }
        if decoded[0] != WIF_PREFIX {
            return Err(PrimitivesError::InvalidWif(format!(
                "malformed private key: invalid prefix 0x{:02x}",
                decoded[0]
            )));
        }

        let payload_end = 1 + PRIVATE_KEY_BYTES_LEN;
        let checksum = sha256d(&decoded[..payload_end]);
        if checksum[..4] != decoded[payload_end..] {
            return Err(PrimitivesError::ChecksumMismatch);
        }

        Self::from_bytes(&decoded[1..payload_end])
    }

    /// Derive a private key deterministically from a seed and an index.
    ///
    /// Hashes the seed bytes concatenated with the decimal representation
    /// of the index, and uses the sha256 digest as the key scalar. The same
    /// `(seed, index)` pair always yields the same key.
    ///
    /// # Arguments
    /// * `seed` - Arbitrary seed bytes.
    /// * `index` - Key index appended to the seed as ASCII decimal digits.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the digest falls outside
    /// the scalar range (retry with a different index).
    pub fn from_seed(seed: &[u8], index: u32) -> Result<Self, PrimitivesError> {
        let mut material = Vec::with_capacity(seed.len() + 10);
        material.extend_from_slice(seed);
        material.extend_from_slice(index.to_string().as_bytes());
        let digest = sha256(&material);
        material.zeroize();
        Self::from_bytes(&digest)
    }

    /// Encode the private key as a WIF string.
    ///
    /// # Returns
    /// A Base58Check-encoded WIF string in the legacy uncompressed layout.
    pub fn to_wif(&self) -> String {
        let key_bytes = self.to_bytes();
        let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 4);
        payload.push(WIF_PREFIX);
        payload.extend_from_slice(&key_bytes);

        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);

        bs58::encode(payload).into_string()
    }

    /// Serialize the private key as a 32-byte big-endian array.
    ///
    /// # Returns
    /// A 32-byte array containing the private key scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    ///
    /// # Returns
    /// A 64-character hex string representing the 32-byte scalar.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key for this private key.
    ///
    /// # Returns
    /// The `PublicKey` corresponding to this private key.
    pub fn public_key(&self) -> PublicKey {
        let verifying_key = self.inner.verifying_key();
        PublicKey::from_k256_verifying_key(verifying_key)
    }

    /// Sign a 32-byte digest, producing a canonical recoverable signature.
    ///
    /// Deterministic: the same digest and key always yield the same
    /// signature. See [`Signature::sign`] for the canonicality rules.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte message digest to sign.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        Signature::sign(digest, self)
    }

    /// Compute an ECDH shared secret with another party's public key.
    ///
    /// Multiplies the public key point by this key's scalar and hashes the
    /// 32-byte big-endian x-coordinate of the product with sha512. ECDH is
    /// symmetric: `a.shared_secret(B) == b.shared_secret(A)`.
    ///
    /// # Arguments
    /// * `pub_key` - The other party's public key.
    ///
    /// # Returns
    /// `Ok(SharedSecret)` with the 64-byte derived secret, or an error if
    /// the public key is not a valid curve point.
    pub fn shared_secret(
        &self,
        pub_key: &PublicKey,
    ) -> Result<SharedSecret, PrimitivesError> {
        let their_point = pub_key.to_projective_point()?;
        let scalar = self.to_scalar();
        let shared_point = their_point * scalar;

        let affine = shared_point.to_affine();
        let encoded = affine.to_encoded_point(false);
        let x = encoded
            .x()
            .ok_or(PrimitivesError::PointNotOnCurve)?;

        let mut x_bytes = [0u8; 32];
        x_bytes.copy_from_slice(x);
        let secret = SharedSecret(sha512(&x_bytes));
        x_bytes.zeroize();
        Ok(secret)
    }

    /// Convert the private key to a k256 `Scalar` for arithmetic operations.
    ///
    /// # Returns
    /// The scalar representation of this private key.
    pub(crate) fn to_scalar(&self) -> Scalar {
        *self.inner.as_nonzero_scalar().as_ref()
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        // Overwrite the signing key's scalar bytes with zeros.
        let mut bytes = self.inner.to_bytes();
        bytes.zeroize();
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixtures from the reference wallet test suite.
    const SEED: &str = "da2a48a1b9fbade07552281143814b3cd7ba4b53a7de5241439417b9bb540e229c45a30b0ce32174aaccc80072df7cbdff24f0c0ae327cd5170d1f276b890173";
    const WIF_0: &str = "5Hz1Sw8x2haM2xKvuuh5d4MZUkJDnnd3ffVgQQSVYKgBFSN2yWP";
    const WIF_1: &str = "5KWBCYvVftyimFHfwa2cKAZTR13ZcRqookXbke1Tbs9NHGeaKnd";

    #[test]
    fn test_seed_derivation_vectors() {
        let key0 = PrivateKey::from_seed(SEED.as_bytes(), 0).unwrap();
        assert_eq!(key0.to_wif(), WIF_0);

        let key1 = PrivateKey::from_seed(SEED.as_bytes(), 1).unwrap();
        assert_eq!(key1.to_wif(), WIF_1);
    }

    #[test]
    fn test_seed_derivation_is_deterministic() {
        let a = PrivateKey::from_seed(b"some seed", 7).unwrap();
        let b = PrivateKey::from_seed(b"some seed", 7).unwrap();
        assert_eq!(a, b);

        let c = PrivateKey::from_seed(b"some seed", 8).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_key_serialization_roundtrip() {
        let pk = PrivateKey::new();

        let serialized = pk.to_bytes();
        let deserialized = PrivateKey::from_bytes(&serialized).unwrap();
        assert_eq!(pk, deserialized);

        let wif = pk.to_wif();
        let deserialized = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(pk, deserialized);
    }

    #[test]
    fn test_wif_roundtrip() {
        let key = PrivateKey::from_wif(WIF_0).unwrap();
        assert_eq!(key.to_wif(), WIF_0);

        let hex_str = key.to_hex();
        let from_hex = PrivateKey::from_hex(&hex_str).unwrap();
        assert_eq!(key, from_hex);
    }

    #[test]
    fn test_from_invalid_wif() {
        // modified character
        assert!(PrivateKey::from_wif(
            "5Hz1Sw8x2haM2xKvuuh5d4MZUkJDnnd3ffVgQQSVYKgBFSN2yWQ"
        )
        .is_err());
        // truncated
        assert!(PrivateKey::from_wif(
            "5Hz1Sw8x2haM2xKvuuh5d4MZUkJDnnd3ffVgQQSVYKgBFSN2yW"
        )
        .is_err());
        // compressed-format WIF carries an extra flag byte
        assert!(PrivateKey::from_wif(
            "L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq"
        )
        .is_err());
        assert!(PrivateKey::from_wif("").is_err());
    }

    #[test]
    fn test_from_invalid_hex() {
        assert!(PrivateKey::from_hex("").is_err());
        assert!(PrivateKey::from_hex("zz").is_err());
        // valid hex, wrong length
        assert!(PrivateKey::from_hex("abcdef").is_err());
        // zero scalar is rejected
        assert!(PrivateKey::from_hex(&"00".repeat(32)).is_err());
    }

    #[test]
    fn test_shared_secret_is_symmetric() {
        let a = PrivateKey::from_seed(b"alice", 0).unwrap();
        let b = PrivateKey::from_seed(b"bob", 0).unwrap();

        let ab = a.shared_secret(&b.public_key()).unwrap();
        let ba = b.shared_secret(&a.public_key()).unwrap();
        assert_eq!(ab.as_bytes(), ba.as_bytes());

        let c = PrivateKey::from_seed(b"carol", 0).unwrap();
        let ac = a.shared_secret(&c.public_key()).unwrap();
        assert_ne!(ab.as_bytes(), ac.as_bytes());
    }

    #[test]
    fn test_shared_secret_vector() {
        let key = PrivateKey::from_wif(WIF_0).unwrap();
        let other = PublicKey::from_text(
            "EOS6fzek8UfAsdDzgdHGGx5FUGHBp7gZnru5tkT7yivFTsdP74CpX",
        )
        .unwrap();
        let secret = key.shared_secret(&other).unwrap();
        assert_eq!(
            hex::encode(secret.as_bytes()),
            "090cb3e9eb56d8dd2d7305cc8c16caef05224301c9fcf0d1d3d2da368f38e436\
             0a6ef7c55f2c67d796e39eb99edc43fc6bcc069427ecfa5466a13eb031d44f43"
        );
    }
}
