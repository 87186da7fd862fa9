//! Hash function primitives for the EOS SDK.
//!
//! Provides SHA-256, double SHA-256, RIPEMD-160, Hash160, SHA-512, and
//! HMAC-SHA256. SHA-256 backs transaction digests and key-format checksums,
//! RIPEMD-160 backs the public-key and signature text checksums, SHA-512
//! is the ECDH key-derivation hash, and HMAC-SHA256 drives RFC6979 nonce
//! generation.

use sha2::{Sha256, Sha512, Digest};
use ripemd::Ripemd160;
use hmac::{Hmac, Mac};

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute double SHA-256 (SHA-256d) hash of the input data.
///
/// Used for the 4-byte checksum embedded in WIF private key strings.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte double-SHA-256 digest.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160 hash of the input data.
///
/// Used for the 4-byte checksum embedded in public-key and signature
/// text encodings.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte RIPEMD-160 digest.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 20];
    output.copy_from_slice(&result);
    output
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte Hash160 digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Compute SHA-512 hash of the input data.
///
/// Used as the key-derivation hash over ECDH shared points and over the
/// nonce-salted key material of the memo cipher.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 64-byte SHA-512 digest.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}

/// Compute HMAC-SHA256 of the input data with the given key.
///
/// # Arguments
/// * `key` - The HMAC key bytes.
/// * `data` - The message bytes to authenticate.
///
/// # Returns
/// A 32-byte HMAC-SHA256 tag.
pub fn sha256_hmac(key: &[u8], data: &[u8]) -> [u8; 32] {
    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(key)
        .expect("HMAC accepts any key length");
    mac.update(data);
    let result = mac.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result.into_bytes());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DATA: &[u8] = b"this is the data I want to hash";

    #[test]
    fn test_sha256_empty_string() {
        let hash = sha256(b"");
        assert_eq!(
            hex::encode(hash),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_string() {
        let hash = sha256(TEST_DATA);
        assert_eq!(
            hex::encode(hash),
            "f88eec7ecabf88f9a64c4100cac1e0c0c4581100492137d1b656ea626cad63e3"
        );
    }

    #[test]
    fn test_sha256d_empty_string() {
        let hash = sha256d(b"");
        assert_eq!(
            hex::encode(hash),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_sha256d_string() {
        let hash = sha256d(TEST_DATA);
        assert_eq!(
            hex::encode(hash),
            "2209ddda5914a3fbad507ff2284c4b6e559c18a669f9fc3ad3b5826a2a999d58"
        );
    }

    #[test]
    fn test_ripemd160_empty_string() {
        let hash = ripemd160(b"");
        assert_eq!(
            hex::encode(hash),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn test_hash160_string() {
        let hash = hash160(TEST_DATA);
        assert_eq!(
            hex::encode(hash),
            "e7fb13ef86fef4203f042fbfc2703fa628301e90"
        );
    }

    #[test]
    fn test_sha512_empty_string() {
        let hash = sha512(b"");
        assert_eq!(
            hex::encode(hash),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn test_sha256_hmac_nist() {
        let key = hex::decode(
            "000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F\
             202122232425262728292A2B2C2D2E2F303132333435363738393A3B3C3D3E3F"
        ).unwrap();
        let msg = b"Sample message for keylen=blocklen";
        let mac = sha256_hmac(&key, msg);
        assert_eq!(
            hex::encode(mac),
            "8bb9a1db9806f20df7f77b82138c7914d174d59e13dc4d0169c9057b133e1d62"
        );
    }
}
