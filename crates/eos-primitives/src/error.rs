/// Unified error type for all primitives operations.
///
/// Covers errors from hashing, EC operations, encryption, and encoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("encryption error: {0}")]
    EncryptionError(String),

    #[error("decryption error: {0}")]
    DecryptionError(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("varuint overflows 32 bits")]
    VarUintTooLarge,

    #[error("unexpected end of data")]
    UnexpectedEof,
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
