//! Transaction assembly and multi-key signing.
//!
//! The builder turns a list of actions into a ready-to-sign transaction:
//! it encodes structured action arguments through an [`ActionCodec`],
//! stamps an expiration, and binds the transaction to a recent block for
//! replay protection. Signing takes explicit [`Signer`] values and
//! returns one signature per signer, in order.

use serde::Serialize;

use eos_chain::abi::{ActionCodec, LayoutResolver};
use eos_chain::{Action, TimePointSec, Transaction};
use eos_primitives::ec::Signature;
use eos_primitives::hash::sha256;
use eos_primitives::PrimitivesError;

use crate::signer::Signer;
use crate::WalletError;

/// The chain head reference used for replay protection.
#[derive(Clone, Copy, Debug)]
pub struct HeadBlock {
    /// The head block number.
    pub num: u32,
    /// The head block id.
    pub id: [u8; 32],
}

impl HeadBlock {
    /// Create a head-block reference.
    ///
    /// # Arguments
    /// * `num` - The block number.
    /// * `id` - The 32-byte block id.
    ///
    /// # Returns
    /// A new `HeadBlock`.
    pub fn new(num: u32, id: [u8; 32]) -> Self {
        HeadBlock { num, id }
    }

    /// Create a head-block reference from a hex block id.
    ///
    /// # Arguments
    /// * `num` - The block number.
    /// * `id_hex` - The block id as a 64-character hex string.
    ///
    /// # Returns
    /// `Ok(HeadBlock)`, or an error on malformed hex or wrong length.
    pub fn from_hex_id(num: u32, id_hex: &str) -> Result<Self, WalletError> {
        let bytes = hex::decode(id_hex).map_err(PrimitivesError::from)?;
        let id: [u8; 32] = bytes.try_into().map_err(|_| {
            WalletError::Primitives(PrimitivesError::InvalidHex(
                "block id must be 32 bytes".to_string(),
            ))
        })?;
        Ok(HeadBlock { num, id })
    }
}

/// A signed transaction ready for broadcast.
#[derive(Clone, Debug, Serialize)]
pub struct SignedTransaction {
    /// Textual signatures, in signer order.
    pub signatures: Vec<String>,
    /// The packed transaction bytes as hex.
    pub packed_trx: String,
    /// The transaction id (sha256 of the packed bytes) as hex.
    pub id: String,
}

/// Assembles and signs transactions.
#[derive(Debug, Default)]
pub struct TransactionBuilder<R> {
    codec: ActionCodec<R>,
}

impl<R: LayoutResolver> TransactionBuilder<R> {
    /// Create a builder over a layout resolver.
    ///
    /// # Arguments
    /// * `resolver` - The layout source for encoding structured actions.
    ///
    /// # Returns
    /// A new `TransactionBuilder`.
    pub fn new(resolver: R) -> Self {
        TransactionBuilder {
            codec: ActionCodec::new(resolver),
        }
    }

    /// Assemble a transaction from actions and replay-protection inputs.
    ///
    /// Structured action arguments are encoded through the codec; action
    /// order is preserved exactly as supplied. The expiration is `now +
    /// expiration_secs`; the reference fields are the head block's number
    /// (low 16 bits) and the little-endian u32 at byte offset 8 of its id.
    ///
    /// # Arguments
    /// * `actions` - The actions to execute, in order.
    /// * `expiration_secs` - Validity window from now, in seconds.
    /// * `head_block` - A recent block to bind the transaction to.
    ///
    /// # Returns
    /// `Ok(Transaction)` with every action in the encoded byte form, or a
    /// codec error for an unknown layout or mismatched argument.
    pub fn build(
        &self,
        actions: Vec<Action>,
        expiration_secs: u32,
        head_block: &HeadBlock,
    ) -> Result<Transaction, WalletError> {
        let mut tx = Transaction::new();
        tx.expiration = TimePointSec::from_now(expiration_secs);
        tx.ref_block_num = (head_block.num & 0xffff) as u16;
        tx.ref_block_prefix = u32::from_le_bytes([
            head_block.id[8],
            head_block.id[9],
            head_block.id[10],
            head_block.id[11],
        ]);
        for action in actions {
            tx.actions.push(self.codec.encode_action(action)?);
        }
        Ok(tx)
    }

    /// Sign a transaction with each supplied signer.
    ///
    /// # Arguments
    /// * `tx` - The transaction, with all action data encoded.
    /// * `chain_id` - The 32-byte chain id.
    /// * `signers` - The signers, one per required key.
    ///
    /// # Returns
    /// `Ok(Vec<Signature>)` in signer order, or `NoPrivateKeyInstalled`
    /// if no signers were supplied.
    pub fn sign(
        &self,
        tx: &Transaction,
        chain_id: &[u8; 32],
        signers: &[Signer],
    ) -> Result<Vec<Signature>, WalletError> {
        if signers.is_empty() {
            return Err(WalletError::NoPrivateKeyInstalled);
        }
        let digest = tx.signing_digest(chain_id)?;
        signers
            .iter()
            .map(|signer| signer.sign_digest(&digest))
            .collect()
    }

    /// Build, sign, and package a transaction for broadcast.
    ///
    /// # Arguments
    /// * `actions` - The actions to execute, in order.
    /// * `expiration_secs` - Validity window from now, in seconds.
    /// * `head_block` - A recent block to bind the transaction to.
    /// * `chain_id` - The 32-byte chain id.
    /// * `signers` - The signers, one per required key.
    ///
    /// # Returns
    /// `Ok(SignedTransaction)` carrying the signatures, packed hex, and
    /// transaction id.
    pub fn build_signed(
        &self,
        actions: Vec<Action>,
        expiration_secs: u32,
        head_block: &HeadBlock,
        chain_id: &[u8; 32],
        signers: &[Signer],
    ) -> Result<SignedTransaction, WalletError> {
        let tx = self.build(actions, expiration_secs, head_block)?;
        let signatures = self.sign(&tx, chain_id, signers)?;
        Ok(SignedTransaction {
            signatures: signatures.iter().map(|s| s.to_string()).collect(),
            packed_trx: tx.to_hex()?,
            id: tx.id_hex()?,
        })
    }
}

/// Compute a transaction id from packed transaction hex.
///
/// The id is sha256 over the hex-decoded bytes, matching
/// [`Transaction::id`] on the same transaction.
///
/// # Arguments
/// * `tx_hex` - The packed transaction as hex (either case).
///
/// # Returns
/// `Ok(String)` with the 64-character id.
pub fn compute_id(tx_hex: &str) -> Result<String, WalletError> {
    let bytes = hex::decode(tx_hex).map_err(PrimitivesError::from)?;
    Ok(hex::encode(sha256(&bytes)))
}
