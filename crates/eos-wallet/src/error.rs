/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// A secret string is neither a valid WIF nor a valid hex scalar.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    /// Signing was requested with no keys supplied.
    #[error("no private key installed")]
    NoPrivateKeyInstalled,
    /// A memo could not be decrypted: checksum mismatch, bad padding, or
    /// non-text plaintext.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
    /// An underlying chain serialization error.
    #[error("chain error: {0}")]
    Chain(#[from] eos_chain::ChainError),
    /// An underlying primitives error.
    #[error("primitives error: {0}")]
    Primitives(#[from] eos_primitives::PrimitivesError),
}
