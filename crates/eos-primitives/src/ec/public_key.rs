//! secp256k1 public key in the ledger's legacy text format.
//!
//! The text encoding is a network prefix ("EOS") followed by Base58 of the
//! 33-byte compressed SEC1 point and a 4-byte RIPEMD-160 checksum over the
//! point bytes.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, ProjectivePoint};
use std::fmt;

use crate::hash::ripemd160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
const COMPRESSED_LEN: usize = 33;

/// Network prefix on the textual encoding.
const TEXT_PREFIX: &str = "EOS";

/// A secp256k1 public key for signature verification and key agreement.
///
/// Wraps a k256 `VerifyingKey` and provides the ledger's prefixed,
/// checksummed text encoding alongside raw SEC1 serialization.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent
    /// a valid curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Parse a public key from its prefixed textual encoding.
    ///
    /// Expects `"EOS"` followed by Base58 of 37 bytes: the compressed point
    /// and the first 4 bytes of its RIPEMD-160 digest.
    ///
    /// # Arguments
    /// * `text` - The textual public key, e.g. `"EOS5G1ix…"`.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the prefix, length,
    /// checksum, or point is invalid.
    pub fn from_text(text: &str) -> Result<Self, PrimitivesError> {
        let body = text.strip_prefix(TEXT_PREFIX).ok_or_else(|| {
            PrimitivesError::InvalidPublicKey(format!(
                "missing {} prefix",
                TEXT_PREFIX
            ))
        })?;

        let decoded = bs58::decode(body)
            .into_vec()
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        if decoded.len() != COMPRESSED_LEN + 4 {
            return Err(PrimitivesError::InvalidPublicKey(format!(
                "invalid length {}",
                decoded.len()
            )));
        }

        let (point, checksum) = decoded.split_at(COMPRESSED_LEN);
        if ripemd160(point)[..4] != *checksum {
            return Err(PrimitivesError::ChecksumMismatch);
        }

        Self::from_bytes(point)
    }

    /// Validate a textual public key without constructing one.
    ///
    /// Total over all input strings: never panics, returns `false` for any
    /// malformation (wrong prefix, truncation, corrupted checksum, point
    /// not on the curve).
    ///
    /// # Arguments
    /// * `text` - The candidate public key string.
    ///
    /// # Returns
    /// `true` if the string parses as a valid public key.
    pub fn is_valid(text: &str) -> bool {
        Self::from_text(text).is_ok()
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the
    /// 32-byte X coordinate.
    ///
    /// # Returns
    /// A 33-byte array containing the compressed public key.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key as a lowercase hexadecimal string
    /// (compressed format).
    ///
    /// # Returns
    /// A 66-character hex string of the compressed public key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Construct a PublicKey from a k256 `VerifyingKey`.
    ///
    /// # Arguments
    /// * `vk` - A k256 VerifyingKey.
    ///
    /// # Returns
    /// A new `PublicKey` wrapping the verifying key.
    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    /// Convert this public key to a k256 `ProjectivePoint` for EC arithmetic.
    ///
    /// # Returns
    /// `Ok(ProjectivePoint)` or an error if the point cannot be decoded.
    pub(crate) fn to_projective_point(&self) -> Result<ProjectivePoint, PrimitivesError> {
        let encoded = self.inner.to_encoded_point(false);
        let ct_option = AffinePoint::from_encoded_point(&encoded);
        if bool::from(ct_option.is_some()) {
            Ok(ProjectivePoint::from(ct_option.unwrap()))
        } else {
            Err(PrimitivesError::PointNotOnCurve)
        }
    }

    /// Access the underlying k256 `VerifyingKey`.
    ///
    /// # Returns
    /// A reference to the inner `VerifyingKey`.
    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    /// Display the key in its prefixed, checksummed text encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let point = self.to_compressed();
        let mut payload = Vec::with_capacity(COMPRESSED_LEN + 4);
        payload.extend_from_slice(&point);
        payload.extend_from_slice(&ripemd160(&point)[..4]);
        write!(f, "{}{}", TEXT_PREFIX, bs58::encode(payload).into_string())
    }
}
