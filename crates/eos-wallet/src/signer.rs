//! Per-key transaction signers.
//!
//! Each `Signer` owns exactly one private key. Callers needing multi-key
//! signing hold one value per key and pass them together; there is no
//! shared installed-key slot, so independent signers can work from
//! different threads without coordination.

use eos_chain::Transaction;
use eos_primitives::ec::{PrivateKey, PublicKey, Signature};

use crate::keys::KeyPair;
use crate::WalletError;

/// A signer bound to a single private key.
#[derive(Clone, Debug)]
pub struct Signer {
    key: PrivateKey,
}

impl Signer {
    /// Create a signer over a private key.
    ///
    /// # Arguments
    /// * `key` - The key to sign with.
    ///
    /// # Returns
    /// A new `Signer`.
    pub fn new(key: PrivateKey) -> Self {
        Signer { key }
    }

    /// Create a signer from a secret string (WIF or hex).
    ///
    /// # Arguments
    /// * `secret` - A WIF string or hex scalar.
    ///
    /// # Returns
    /// `Ok(Signer)`, or `InvalidPrivateKey` on a malformed secret.
    pub fn from_secret(secret: &str) -> Result<Self, WalletError> {
        Ok(Signer::new(KeyPair::from_secret(secret)?.private))
    }

    /// The public key this signer's signatures recover to.
    ///
    /// # Returns
    /// The signer's public key.
    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Sign a raw 32-byte digest.
    ///
    /// Deterministic: the same digest always yields the same signature.
    ///
    /// # Arguments
    /// * `digest` - The digest to sign.
    ///
    /// # Returns
    /// `Ok(Signature)` on success.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature, WalletError> {
        Ok(self.key.sign(digest)?)
    }

    /// Sign a transaction for a specific chain.
    ///
    /// Computes the transaction's signing digest under `chain_id` and
    /// signs it.
    ///
    /// # Arguments
    /// * `tx` - The transaction, with all action data encoded.
    /// * `chain_id` - The 32-byte chain id.
    ///
    /// # Returns
    /// `Ok(Signature)` on success.
    pub fn sign_transaction(
        &self,
        tx: &Transaction,
        chain_id: &[u8; 32],
    ) -> Result<Signature, WalletError> {
        let digest = tx.signing_digest(chain_id)?;
        self.sign_digest(&digest)
    }
}
