//! AES-256-CBC encryption with PKCS#7 padding.
//!
//! The memo cipher encrypts with a key and IV derived from an ECDH shared
//! secret; this module provides the raw block-cipher layer it sits on.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::PrimitivesError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypt a plaintext with AES-256-CBC and PKCS#7 padding.
///
/// # Arguments
/// * `key` - The 32-byte AES key.
/// * `iv` - The 16-byte initialization vector.
/// * `plaintext` - The data to encrypt.
///
/// # Returns
/// The ciphertext (always a whole number of 16-byte blocks).
pub fn encrypt(key: &[u8; 32], iv: &[u8; 16], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt an AES-256-CBC ciphertext and strip the PKCS#7 padding.
///
/// # Arguments
/// * `key` - The 32-byte AES key.
/// * `iv` - The 16-byte initialization vector.
/// * `ciphertext` - The data to decrypt.
///
/// # Returns
/// `Ok(Vec<u8>)` with the plaintext, or `DecryptionError` if the data is
/// not block-aligned or the padding is invalid.
pub fn decrypt(
    key: &[u8; 32],
    iv: &[u8; 16],
    ciphertext: &[u8],
) -> Result<Vec<u8>, PrimitivesError> {
    Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|e| PrimitivesError::DecryptionError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [0x11; 32];
    const IV: [u8; 16] = [0x22; 16];

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"attack at dawn";
        let ciphertext = encrypt(&KEY, &IV, plaintext);
        assert_eq!(ciphertext.len() % 16, 0);

        let decrypted = decrypt(&KEY, &IV, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_empty_plaintext_pads_to_one_block() {
        let ciphertext = encrypt(&KEY, &IV, b"");
        assert_eq!(ciphertext.len(), 16);
        assert_eq!(decrypt(&KEY, &IV, &ciphertext).unwrap(), b"");
    }

    #[test]
    fn test_wrong_key_fails_or_garbles() {
        let plaintext = b"sixteen byte msg";
        let ciphertext = encrypt(&KEY, &IV, plaintext);

        let mut wrong_key = KEY;
        wrong_key[0] ^= 0xff;
        // Wrong key either trips the padding check or yields different bytes.
        match decrypt(&wrong_key, &IV, &ciphertext) {
            Ok(garbled) => assert_ne!(garbled, plaintext),
            Err(PrimitivesError::DecryptionError(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_unaligned_ciphertext_rejected() {
        assert!(decrypt(&KEY, &IV, &[0u8; 15]).is_err());
    }
}
