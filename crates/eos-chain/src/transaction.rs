//! Core transaction type and canonical serialization.
//!
//! A transaction binds an ordered list of actions to replay-protection
//! fields: an expiration time and a reference to a recent block (TAPOS).
//! The wire layout is consensus-critical; a single mis-ordered field
//! invalidates every signature over the transaction.
//!
//! # Wire format
//!
//! | Field                  | Size            |
//! |------------------------|-----------------|
//! | expiration             | 4 bytes (LE)    |
//! | ref_block_num          | 2 bytes (LE)    |
//! | ref_block_prefix       | 4 bytes (LE)    |
//! | max_net_usage_words    | varuint32       |
//! | max_cpu_usage_ms       | 1 byte          |
//! | delay_sec              | varuint32       |
//! | context_free_actions   | varuint32 + n   |
//! | actions                | varuint32 + n   |
//! | transaction_extensions | varuint32 + n   |

use serde::{Deserialize, Serialize};

use eos_primitives::hash::sha256;
use eos_primitives::util::{ByteReader, ByteWriter};

use crate::action::{hex_bytes, Action};
use crate::time::TimePointSec;
use crate::ChainError;

/// A transaction extension: a type tag and opaque payload, serialized in
/// JSON as a `[type, "hex"]` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension(pub u16, #[serde(with = "hex_bytes")] pub Vec<u8>);

/// A transaction: replay-protection fields, resource limits, and actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Time after which the ledger rejects the transaction.
    pub expiration: TimePointSec,
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,
    /// 32 bits taken from the middle of the reference block id.
    pub ref_block_prefix: u32,
    /// Upper bound on network bandwidth, in 8-byte words (0 = no limit).
    #[serde(default)]
    pub max_net_usage_words: u32,
    /// Upper bound on CPU time in milliseconds (0 = no limit).
    #[serde(default)]
    pub max_cpu_usage_ms: u8,
    /// Seconds to delay execution after inclusion.
    #[serde(default)]
    pub delay_sec: u32,
    /// Actions executed without access to chain state.
    #[serde(default)]
    pub context_free_actions: Vec<Action>,
    /// The actions to execute, in order. Order is preserved byte-for-byte.
    pub actions: Vec<Action>,
    /// Protocol extensions, normally empty.
    #[serde(default)]
    pub transaction_extensions: Vec<Extension>,
}

impl Transaction {
    /// Create an empty transaction with zeroed replay-protection fields.
    ///
    /// # Returns
    /// A `Transaction` with no actions.
    pub fn new() -> Self {
        Transaction {
            expiration: TimePointSec::default(),
            ref_block_num: 0,
            ref_block_prefix: 0,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
            context_free_actions: Vec::new(),
            actions: Vec::new(),
            transaction_extensions: Vec::new(),
        }
    }

    /// Derive the TAPOS reference fields from a block id.
    ///
    /// The block number is the big-endian u32 at the start of the id
    /// (masked to 16 bits); the prefix is the little-endian u32 at byte
    /// offset 8.
    ///
    /// # Arguments
    /// * `block_id` - The 32-byte id of the reference block.
    pub fn set_reference_block(&mut self, block_id: &[u8; 32]) {
        let num = u32::from_be_bytes([block_id[0], block_id[1], block_id[2], block_id[3]]);
        self.ref_block_num = (num & 0xffff) as u16;
        self.ref_block_prefix =
            u32::from_le_bytes([block_id[8], block_id[9], block_id[10], block_id[11]]);
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction to raw wire bytes.
    ///
    /// All action data must be in the encoded byte form.
    ///
    /// # Returns
    /// `Ok(Vec<u8>)` with the canonical bytes, or `UnencodedActionData`
    /// if any action still carries structured arguments.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ChainError> {
        let mut writer = ByteWriter::with_capacity(256);
        self.write_to(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Serialize this transaction into a writer.
    ///
    /// # Arguments
    /// * `writer` - The destination writer.
    ///
    /// # Returns
    /// `Ok(())` or `UnencodedActionData`.
    pub fn write_to(&self, writer: &mut ByteWriter) -> Result<(), ChainError> {
        self.expiration.write_to(writer);
        writer.write_u16_le(self.ref_block_num);
        writer.write_u32_le(self.ref_block_prefix);
        writer.write_varuint32(self.max_net_usage_words);
        writer.write_u8(self.max_cpu_usage_ms);
        writer.write_varuint32(self.delay_sec);

        writer.write_varuint32(self.context_free_actions.len() as u32);
        for action in &self.context_free_actions {
            action.write_to(writer)?;
        }

        writer.write_varuint32(self.actions.len() as u32);
        for action in &self.actions {
            action.write_to(writer)?;
        }

        writer.write_varuint32(self.transaction_extensions.len() as u32);
        for Extension(kind, data) in &self.transaction_extensions {
            writer.write_u16_le(*kind);
            writer.write_varuint32(data.len() as u32);
            writer.write_bytes(data);
        }
        Ok(())
    }

    /// Serialize this transaction to a lowercase hex string.
    ///
    /// # Returns
    /// `Ok(String)` with the hex form of the wire bytes.
    pub fn to_hex(&self) -> Result<String, ChainError> {
        Ok(hex::encode(self.to_bytes()?))
    }

    /// Parse a transaction from raw wire bytes.
    ///
    /// The byte slice must contain exactly one transaction: short data
    /// fails with `TruncatedData`, excess bytes with `TrailingData`.
    ///
    /// # Arguments
    /// * `bytes` - The raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChainError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(ChainError::TrailingData(reader.remaining()));
        }
        Ok(tx)
    }

    /// Parse a transaction from a hex string.
    ///
    /// # Arguments
    /// * `hex_str` - Hex of the raw transaction bytes (either case).
    ///
    /// # Returns
    /// `Ok(Transaction)` on success.
    pub fn from_hex(hex_str: &str) -> Result<Self, ChainError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| ChainError::Serialization(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Deserialize a transaction from a reader.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of a transaction.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or `TruncatedData` if the data runs
    /// short.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, ChainError> {
        let expiration = TimePointSec::read_from(reader)?;
        let ref_block_num = reader.read_u16_le()?;
        let ref_block_prefix = reader.read_u32_le()?;
        let max_net_usage_words = reader.read_varuint32()?;
        let max_cpu_usage_ms = reader.read_u8()?;
        let delay_sec = reader.read_varuint32()?;

        let cfa_count = reader.read_varuint32()?;
        let mut context_free_actions = Vec::with_capacity(cfa_count as usize);
        for _ in 0..cfa_count {
            context_free_actions.push(Action::read_from(reader)?);
        }

        let action_count = reader.read_varuint32()?;
        let mut actions = Vec::with_capacity(action_count as usize);
        for _ in 0..action_count {
            actions.push(Action::read_from(reader)?);
        }

        let ext_count = reader.read_varuint32()?;
        let mut transaction_extensions = Vec::with_capacity(ext_count as usize);
        for _ in 0..ext_count {
            let kind = reader.read_u16_le()?;
            let len = reader.read_varuint32()? as usize;
            let data = reader.read_bytes(len)?.to_vec();
            transaction_extensions.push(Extension(kind, data));
        }

        Ok(Transaction {
            expiration,
            ref_block_num,
            ref_block_prefix,
            max_net_usage_words,
            max_cpu_usage_ms,
            delay_sec,
            context_free_actions,
            actions,
            transaction_extensions,
        })
    }

    // -----------------------------------------------------------------
    // Digests
    // -----------------------------------------------------------------

    /// Compute the digest that signatures commit to.
    ///
    /// The digest is sha256 over the chain id, the packed transaction, and
    /// 32 zero bytes standing in for the context-free data hash.
    ///
    /// # Arguments
    /// * `chain_id` - The 32-byte chain id (signing domain separator).
    ///
    /// # Returns
    /// `Ok([u8; 32])` with the signing digest.
    pub fn signing_digest(&self, chain_id: &[u8; 32]) -> Result<[u8; 32], ChainError> {
        let packed = self.to_bytes()?;
        let mut buf = Vec::with_capacity(32 + packed.len() + 32);
        buf.extend_from_slice(chain_id);
        buf.extend_from_slice(&packed);
        buf.extend_from_slice(&[0u8; 32]);
        Ok(sha256(&buf))
    }

    /// Compute the transaction id: sha256 of the packed bytes.
    ///
    /// Stable across calls; used for idempotent submission tracking, not
    /// for signing.
    ///
    /// # Returns
    /// `Ok([u8; 32])` with the id.
    pub fn id(&self) -> Result<[u8; 32], ChainError> {
        Ok(sha256(&self.to_bytes()?))
    }

    /// Compute the transaction id as a hex string.
    ///
    /// # Returns
    /// `Ok(String)` with the 64-character id.
    pub fn id_hex(&self) -> Result<String, ChainError> {
        Ok(hex::encode(self.id()?))
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}
