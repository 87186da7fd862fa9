//! Confidential transfer memos.
//!
//! A memo is encrypted under a symmetric key both parties can derive:
//! the sender combines their private key with the recipient's public key
//! via ECDH, the recipient combines theirs with the sender's public key,
//! and both arrive at the same shared secret. The key material is sha512
//! over the little-endian nonce followed by the shared secret; bytes
//! 0..32 are the AES-256-CBC key, bytes 32..48 the IV, and the checksum
//! is the little-endian u32 of the first four bytes of sha256 over the
//! key material.
//!
//! Nonces are generated internally; the caller-supplied override exists
//! for deterministic tests and for decrypting memos produced elsewhere.

use rand::RngCore;

use eos_primitives::aes;
use eos_primitives::ec::{PrivateKey, PublicKey, SharedSecret};
use eos_primitives::hash::{sha256, sha512};

use crate::WalletError;

/// An encrypted memo with its nonce and integrity checksum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedMemo {
    /// The nonce the key material was salted with.
    pub nonce: u64,
    /// The ciphertext as lowercase hex.
    pub message: String,
    /// Checksum over the key material, for pre-decryption verification.
    pub checksum: u32,
}

/// Encrypt a memo from sender to recipient.
///
/// # Arguments
/// * `sender` - The sender's private key.
/// * `recipient` - The recipient's public key.
/// * `plaintext` - The memo text.
/// * `nonce` - Deterministic override; `None` generates a random nonce.
///
/// # Returns
/// `Ok(EncryptedMemo)` with the nonce, hex ciphertext, and checksum.
pub fn encrypt(
    sender: &PrivateKey,
    recipient: &PublicKey,
    plaintext: &str,
    nonce: Option<u64>,
) -> Result<EncryptedMemo, WalletError> {
    let nonce = nonce.unwrap_or_else(|| rand::rngs::OsRng.next_u64());
    let shared = sender.shared_secret(recipient)?;
    let (key, iv, checksum) = derive_key_material(&shared, nonce);

    let ciphertext = aes::encrypt(&key, &iv, plaintext.as_bytes());
    Ok(EncryptedMemo {
        nonce,
        message: hex::encode(ciphertext),
        checksum,
    })
}

/// Decrypt a memo, verifying the key-material checksum first.
///
/// # Arguments
/// * `recipient` - The recipient's private key.
/// * `sender` - The sender's public key.
/// * `message_hex` - The ciphertext as hex.
/// * `nonce` - The nonce the memo was encrypted with.
/// * `checksum` - The checksum from the encrypted memo.
///
/// # Returns
/// `Ok(String)` with the plaintext, or `DecryptionFailed` on a checksum
/// mismatch, malformed ciphertext, or non-text plaintext.
pub fn decrypt(
    recipient: &PrivateKey,
    sender: &PublicKey,
    message_hex: &str,
    nonce: u64,
    checksum: u32,
) -> Result<String, WalletError> {
    let shared = recipient.shared_secret(sender)?;
    let (key, iv, expected) = derive_key_material(&shared, nonce);
    if checksum != expected {
        return Err(WalletError::DecryptionFailed(
            "checksum mismatch".to_string(),
        ));
    }
    decrypt_with(&key, &iv, message_hex)
}

/// Decrypt a memo without a checksum to verify.
///
/// Used for memos whose transport carries only the ciphertext and nonce.
///
/// # Arguments
/// * `recipient` - The recipient's private key.
/// * `sender` - The sender's public key.
/// * `message_hex` - The ciphertext as hex.
/// * `nonce` - The nonce the memo was encrypted with.
///
/// # Returns
/// `Ok(String)` with the plaintext, or `DecryptionFailed` on malformed
/// ciphertext or non-text plaintext.
pub fn decrypt_unchecked(
    recipient: &PrivateKey,
    sender: &PublicKey,
    message_hex: &str,
    nonce: u64,
) -> Result<String, WalletError> {
    let shared = recipient.shared_secret(sender)?;
    let (key, iv, _) = derive_key_material(&shared, nonce);
    decrypt_with(&key, &iv, message_hex)
}

/// Derive the AES key, IV, and checksum from a shared secret and nonce.
fn derive_key_material(shared: &SharedSecret, nonce: u64) -> ([u8; 32], [u8; 16], u32) {
    let mut material = Vec::with_capacity(8 + 64);
    material.extend_from_slice(&nonce.to_le_bytes());
    material.extend_from_slice(shared.as_bytes());
    let digest = sha512(&material);

    let mut key = [0u8; 32];
    let mut iv = [0u8; 16];
    key.copy_from_slice(&digest[..32]);
    iv.copy_from_slice(&digest[32..48]);

    let check = sha256(&digest);
    let checksum = u32::from_le_bytes([check[0], check[1], check[2], check[3]]);
    (key, iv, checksum)
}

fn decrypt_with(key: &[u8; 32], iv: &[u8; 16], message_hex: &str) -> Result<String, WalletError> {
    let ciphertext = hex::decode(message_hex)
        .map_err(|e| WalletError::DecryptionFailed(format!("invalid hex: {}", e)))?;
    let plaintext = aes::decrypt(key, iv, &ciphertext)
        .map_err(|e| WalletError::DecryptionFailed(e.to_string()))?;
    String::from_utf8(plaintext)
        .map_err(|_| WalletError::DecryptionFailed("plaintext is not UTF-8".to_string()))
}
