/// EOS SDK - Key management, transaction building, and memo encryption.
///
/// Provides the caller-facing wallet layer: deterministic key pairs
/// (seed + index, WIF, hex), per-key transaction signers, the
/// transaction builder with replay protection, and encrypted transfer
/// memos.

mod error;
pub use error::WalletError;

pub mod keys;
pub mod signer;
pub mod builder;
pub mod memo;

pub use builder::{compute_id, HeadBlock, SignedTransaction, TransactionBuilder};
pub use keys::{is_valid_public_key, public_key_of, KeyPair};
pub use memo::EncryptedMemo;
pub use signer::Signer;
